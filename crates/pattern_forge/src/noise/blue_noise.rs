//! Blue-noise threshold masks by best-candidate selection on a torus.
//!
//! Each step grants the cell whose minimum toroidal distance to the already
//! granted set is largest; the grant order is the rank. Masks are generated once
//! per `(size, seed)` and shared through a process-wide cache holding at most
//! [`MAX_CACHED_MASKS`] entries.
use std::collections::{HashMap, VecDeque};
use std::sync::{Arc, Mutex, OnceLock};

use tracing::{debug, warn};

use crate::hash::stable_hash;
use crate::noise::threshold::ThresholdMatrix;

/// Largest side generated; larger requests are clamped.
pub const MAX_BLUE_NOISE_SIZE: usize = 128;

/// Masks kept by the process-wide cache; the oldest entry is dropped first.
pub const MAX_CACHED_MASKS: usize = 32;

type Key = (usize, u64);
type Latch = Arc<OnceLock<Arc<ThresholdMatrix>>>;

/// Generation latches keyed by `(size, seed)`, evicted in insertion order.
///
/// Evicting a latch never invalidates masks already handed out; a later
/// request for the same key generates the mask again.
struct MaskCache {
    capacity: usize,
    latches: HashMap<Key, Latch>,
    order: VecDeque<Key>,
}

impl MaskCache {
    fn new(capacity: usize) -> Self {
        Self {
            capacity: capacity.max(1),
            latches: HashMap::new(),
            order: VecDeque::new(),
        }
    }

    fn latch(&mut self, key: Key) -> Latch {
        if let Some(latch) = self.latches.get(&key) {
            return latch.clone();
        }
        while self.order.len() >= self.capacity {
            let Some(old) = self.order.pop_front() else {
                break;
            };
            self.latches.remove(&old);
            debug!(size = old.0, seed = old.1, "Blue-noise mask evicted.");
        }
        let latch = Latch::default();
        self.latches.insert(key, latch.clone());
        self.order.push_back(key);
        latch
    }

    fn len(&self) -> usize {
        self.latches.len()
    }
}

fn cache() -> &'static Mutex<MaskCache> {
    static CACHE: OnceLock<Mutex<MaskCache>> = OnceLock::new();
    CACHE.get_or_init(|| Mutex::new(MaskCache::new(MAX_CACHED_MASKS)))
}

/// Returns the shared blue-noise mask for `(size, seed)`, generating it on first use.
pub fn blue_noise(size: usize, seed: u64) -> Arc<ThresholdMatrix> {
    let size = clamp_size(size);
    let latch = cache()
        .lock()
        .unwrap_or_else(|e| e.into_inner())
        .latch((size, seed));
    latch
        .get_or_init(|| Arc::new(generate(size, seed)))
        .clone()
}

/// Number of masks currently cached.
pub fn cached_blue_noise_masks() -> usize {
    cache().lock().unwrap_or_else(|e| e.into_inner()).len()
}

fn clamp_size(size: usize) -> usize {
    if size == 0 {
        warn!("Blue-noise size 0 replaced by 1.");
        return 1;
    }
    if size > MAX_BLUE_NOISE_SIZE {
        warn!(
            "Blue-noise size {} clamped to {}.",
            size, MAX_BLUE_NOISE_SIZE
        );
        return MAX_BLUE_NOISE_SIZE;
    }
    size
}

/// Uncached generation; deterministic in `(size, seed)`.
pub fn generate(size: usize, seed: u64) -> ThresholdMatrix {
    let n = size.max(1);
    let cells = n * n;
    debug!(size = n, seed, "Generating blue-noise mask.");

    // Tie-break key per cell: lower hash wins among equally distant candidates.
    let keys: Vec<u64> = (0..cells)
        .map(|i| stable_hash((i % n) as i32, (i / n) as i32, seed))
        .collect();

    let mut granted = vec![false; cells];
    let mut min_d2 = vec![u64::MAX; cells];
    let mut order = Vec::with_capacity(cells);

    let first = (stable_hash(0, 0, seed) % cells as u64) as usize;
    grant(n, first, &mut granted, &mut min_d2, &mut order);

    while order.len() < cells {
        let mut best: Option<usize> = None;
        for c in 0..cells {
            if granted[c] {
                continue;
            }
            best = match best {
                None => Some(c),
                Some(b) => {
                    let better = min_d2[c] > min_d2[b]
                        || (min_d2[c] == min_d2[b] && keys[c] < keys[b]);
                    Some(if better { c } else { b })
                }
            };
        }
        match best {
            Some(c) => grant(n, c, &mut granted, &mut min_d2, &mut order),
            None => break,
        }
    }

    ThresholdMatrix::from_order(n, &order)
}

fn grant(n: usize, cell: usize, granted: &mut [bool], min_d2: &mut [u64], order: &mut Vec<usize>) {
    granted[cell] = true;
    order.push(cell);
    let (gx, gy) = (cell % n, cell / n);
    for (i, d) in min_d2.iter_mut().enumerate() {
        let dx = torus_delta(i % n, gx, n);
        let dy = torus_delta(i / n, gy, n);
        let d2 = (dx * dx + dy * dy) as u64;
        if d2 < *d {
            *d = d2;
        }
    }
}

#[inline]
fn torus_delta(a: usize, b: usize, n: usize) -> usize {
    let d = a.abs_diff(b);
    d.min(n - d)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_rank_appears_once() {
        for size in [1, 2, 5, 16] {
            let m = generate(size, 3);
            assert_eq!(m.cells(), size * size);
            assert!(m.is_permutation(), "size {size}");
        }
    }

    #[test]
    fn generation_is_deterministic_per_seed() {
        assert_eq!(generate(8, 11), generate(8, 11));
        assert_ne!(generate(8, 11), generate(8, 12));
    }

    #[test]
    fn early_ranks_are_spread_out() {
        let n = 16;
        let m = generate(n, 5);
        let mut first: Vec<(usize, usize)> = Vec::new();
        for y in 0..n {
            for x in 0..n {
                if m.rank(x as i32, y as i32) < 4 {
                    first.push((x, y));
                }
            }
        }
        assert_eq!(first.len(), 4);
        for (i, a) in first.iter().enumerate() {
            for b in &first[i + 1..] {
                let dx = torus_delta(a.0, b.0, n);
                let dy = torus_delta(a.1, b.1, n);
                assert!(dx * dx + dy * dy >= 32, "{a:?} {b:?}");
            }
        }
    }

    #[test]
    fn mask_cache_evicts_oldest_first() {
        let mut cache = MaskCache::new(2);
        let a = cache.latch((4, 1));
        assert!(Arc::ptr_eq(&a, &cache.latch((4, 1))));
        cache.latch((4, 2));
        cache.latch((4, 3));
        assert_eq!(cache.len(), 2);
        assert!(!Arc::ptr_eq(&a, &cache.latch((4, 1))));
        assert_eq!(cache.len(), 2);
    }

    #[test]
    fn evicted_masks_stay_usable() {
        let mut cache = MaskCache::new(1);
        let latch = cache.latch((4, 9));
        let mask = latch.get_or_init(|| Arc::new(generate(4, 9))).clone();
        cache.latch((4, 10));
        assert_eq!(cache.len(), 1);
        assert!(mask.is_permutation());
        let again = cache.latch((4, 9));
        assert!(again.get().is_none());
    }

    #[test]
    fn global_cache_is_bounded() {
        blue_noise(2, 5);
        let count = cached_blue_noise_masks();
        assert!((1..=MAX_CACHED_MASKS).contains(&count), "{count}");
    }

    #[test]
    fn cache_returns_the_same_mask() {
        let a = blue_noise(8, 77);
        let b = blue_noise(8, 77);
        assert!(Arc::ptr_eq(&a, &b));
        assert_eq!(*a, generate(8, 77));
    }

    #[test]
    fn sizes_are_clamped() {
        assert_eq!(blue_noise(0, 1).size(), 1);
    }
}
