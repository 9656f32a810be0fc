//! Rasterized cache in front of an expensive pattern.
//!
//! A [`Buffer`] serves pixels from its last snapshot while it is clean and
//! passes through to the source otherwise. It is dirty when flagged, when the
//! snapshot is older than the expiry, or when a dirty-aware source says so.
//!
//! Snapshots are published whole behind a lock, so a concurrent `sample`
//! sees either the old or the new raster, never a mix. `set_dirty` bumps a
//! generation; a refresh only marks clean the generation it started from, so
//! a flag raised while rasterizing survives the publish.
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, RwLock};
use std::time::{Duration, Instant};

use image::RgbaImage;
use tracing::debug;

use crate::color::Color;
use crate::geom::Rect;
use crate::pattern::{ColorModel, Pattern, PatternRef};
use crate::raster::rasterize;

struct Snapshot {
    image: RgbaImage,
    rect: Rect,
    taken: Instant,
}

impl Snapshot {
    fn get(&self, x: i32, y: i32) -> Option<Color> {
        if !self.rect.contains(x, y) {
            return None;
        }
        let px = (x as i64 - self.rect.min_x as i64) as u32;
        let py = (y as i64 - self.rect.min_y as i64) as u32;
        self.image.get_pixel_checked(px, py).map(|p| Color::from(*p))
    }
}

pub struct Buffer {
    source: PatternRef,
    bounds: Rect,
    expiry: Option<Duration>,
    /// Bumped by every `set_dirty`.
    requested: AtomicU64,
    /// Generation covered by the current snapshot.
    published: AtomicU64,
    snapshot: RwLock<Option<Arc<Snapshot>>>,
}

impl Buffer {
    /// Buffers `source` over its own bounds; the buffer starts empty.
    pub fn new(source: PatternRef) -> Self {
        let bounds = source.bounds();
        Self {
            source,
            bounds,
            expiry: None,
            requested: AtomicU64::new(0),
            published: AtomicU64::new(0),
            snapshot: RwLock::new(None),
        }
    }

    pub fn with_bounds(mut self, bounds: Rect) -> Self {
        self.bounds = bounds;
        self
    }

    /// Snapshots older than `expiry` count as dirty; `None` never expires.
    pub fn with_expiry(mut self, expiry: Option<Duration>) -> Self {
        self.expiry = expiry;
        self
    }

    /// Rasterizes the source and publishes the result as the new snapshot.
    pub fn refresh(&self) {
        let started = Instant::now();
        let generation = self.requested.load(Ordering::Acquire);
        let image = rasterize(self.source.as_ref(), self.bounds);
        let snapshot = Arc::new(Snapshot {
            image,
            rect: self.bounds,
            taken: Instant::now(),
        });
        {
            let mut slot = self.snapshot.write().unwrap_or_else(|e| e.into_inner());
            *slot = Some(snapshot);
            self.published.fetch_max(generation, Ordering::AcqRel);
        }
        debug!(
            width = self.bounds.width(),
            height = self.bounds.height(),
            elapsed_us = started.elapsed().as_micros() as u64,
            "Buffer refreshed."
        );
    }

    pub fn set_dirty(&self) {
        self.requested.fetch_add(1, Ordering::AcqRel);
    }

    fn flagged(&self) -> bool {
        self.requested.load(Ordering::Acquire) > self.published.load(Ordering::Acquire)
    }

    /// Whether a snapshot has been taken.
    pub fn is_initialized(&self) -> bool {
        self.current().is_some()
    }

    /// Age of the current snapshot.
    pub fn age(&self) -> Option<Duration> {
        self.current().map(|s| s.taken.elapsed())
    }

    /// Flag, expiry and source state combined.
    pub fn dirty(&self) -> bool {
        if self.flagged() {
            return true;
        }
        if let (Some(expiry), Some(age)) = (self.expiry, self.age()) {
            if age >= expiry {
                return true;
            }
        }
        self.source.is_dirty().unwrap_or(false)
    }

    fn current(&self) -> Option<Arc<Snapshot>> {
        self.snapshot
            .read()
            .unwrap_or_else(|e| e.into_inner())
            .clone()
    }
}

impl fmt::Debug for Buffer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Buffer")
            .field("bounds", &self.bounds)
            .field("expiry", &self.expiry)
            .field("dirty", &self.flagged())
            .field("initialized", &self.is_initialized())
            .finish()
    }
}

impl Pattern for Buffer {
    fn bounds(&self) -> Rect {
        self.bounds
    }

    fn color_model(&self) -> ColorModel {
        self.source.color_model()
    }

    fn sample(&self, x: i32, y: i32) -> Color {
        if self.dirty() {
            return self.source.sample(x, y);
        }
        match self.current().and_then(|s| s.get(x, y)) {
            Some(c) => c,
            None => self.source.sample(x, y),
        }
    }

    fn intrinsic_size(&self) -> Option<(i32, i32)> {
        self.source.intrinsic_size()
    }

    fn is_dirty(&self) -> Option<bool> {
        Some(self.dirty())
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::AtomicBool;
    use std::sync::{Mutex, OnceLock, Weak};
    use std::thread;

    use super::*;

    /// Dirty-aware source whose color can be swapped at runtime.
    struct Live {
        color: Mutex<Color>,
        dirty: AtomicBool,
    }

    impl Live {
        fn new(color: Color) -> Arc<Self> {
            Arc::new(Self {
                color: Mutex::new(color),
                dirty: AtomicBool::new(false),
            })
        }

        fn set(&self, color: Color) {
            *self.color.lock().unwrap() = color;
        }
    }

    impl Pattern for Live {
        fn bounds(&self) -> Rect {
            Rect::from_size(4, 4)
        }

        fn sample(&self, _x: i32, _y: i32) -> Color {
            *self.color.lock().unwrap()
        }

        fn is_dirty(&self) -> Option<bool> {
            Some(self.dirty.load(Ordering::SeqCst))
        }
    }

    #[test]
    fn dirty_expiry_lifecycle() {
        let live = Live::new(Color::RED);
        let buffer = Buffer::new(live.clone()).with_expiry(Some(Duration::from_millis(100)));

        buffer.refresh();
        assert_eq!(buffer.sample(1, 1), Color::RED);

        live.set(Color::BLUE);
        live.dirty.store(true, Ordering::SeqCst);
        assert_eq!(buffer.sample(1, 1), Color::BLUE);

        live.dirty.store(false, Ordering::SeqCst);
        buffer.refresh();
        assert_eq!(buffer.sample(1, 1), Color::BLUE);
        assert_eq!(buffer.is_dirty(), Some(false));

        thread::sleep(Duration::from_millis(150));
        assert_eq!(buffer.is_dirty(), Some(true));
    }

    #[test]
    fn clean_buffer_serves_the_snapshot() {
        let live = Live::new(Color::RED);
        let buffer = Buffer::new(live.clone());
        assert!(!buffer.is_initialized());
        buffer.refresh();
        // Source changes without flagging: the snapshot still answers.
        live.set(Color::GREEN);
        assert_eq!(buffer.sample(0, 0), Color::RED);
        // Outside the snapshot the source answers.
        assert_eq!(buffer.sample(10, 10), Color::GREEN);

        buffer.set_dirty();
        assert_eq!(buffer.sample(0, 0), Color::GREEN);
        buffer.refresh();
        assert_eq!(buffer.sample(0, 0), Color::GREEN);
    }

    /// Turns blue and flags its buffer the first time (1, 1) is sampled.
    struct Interrupting {
        color: Mutex<Color>,
        buffer: OnceLock<Weak<Buffer>>,
        fired: AtomicBool,
    }

    impl Pattern for Interrupting {
        fn bounds(&self) -> Rect {
            Rect::from_size(4, 4)
        }

        fn sample(&self, x: i32, y: i32) -> Color {
            if (x, y) == (1, 1) && !self.fired.swap(true, Ordering::SeqCst) {
                *self.color.lock().unwrap() = Color::BLUE;
                if let Some(buffer) = self.buffer.get().and_then(Weak::upgrade) {
                    buffer.set_dirty();
                }
            }
            *self.color.lock().unwrap()
        }
    }

    #[test]
    fn dirty_flag_raised_during_refresh_is_kept() {
        let source = Arc::new(Interrupting {
            color: Mutex::new(Color::RED),
            buffer: OnceLock::new(),
            fired: AtomicBool::new(false),
        });
        let buffer = Arc::new(Buffer::new(source.clone()));
        source.buffer.set(Arc::downgrade(&buffer)).unwrap();

        buffer.refresh();
        assert_eq!(buffer.is_dirty(), Some(true));
        assert_eq!(buffer.sample(0, 0), Color::BLUE);

        buffer.refresh();
        assert_eq!(buffer.is_dirty(), Some(false));
        assert_eq!(buffer.sample(0, 0), Color::BLUE);
    }

    #[test]
    fn uninitialized_buffer_passes_through() {
        let live = Live::new(Color::WHITE);
        let buffer = Buffer::new(live);
        assert_eq!(buffer.sample(2, 2), Color::WHITE);
        assert!(buffer.age().is_none());
    }

    #[test]
    fn concurrent_samples_during_refresh() {
        let live = Live::new(Color::RED);
        let buffer = Arc::new(Buffer::new(live.clone()));
        buffer.refresh();
        let readers: Vec<_> = (0..4)
            .map(|_| {
                let buffer = Arc::clone(&buffer);
                thread::spawn(move || {
                    for _ in 0..200 {
                        let c = buffer.sample(1, 2);
                        assert!(c == Color::RED || c == Color::BLUE);
                    }
                })
            })
            .collect();
        live.set(Color::BLUE);
        for _ in 0..20 {
            buffer.refresh();
        }
        for r in readers {
            r.join().unwrap();
        }
        assert_eq!(buffer.sample(1, 2), Color::BLUE);
    }
}
