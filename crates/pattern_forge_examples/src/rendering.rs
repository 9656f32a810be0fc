use std::fs;
use std::path::{Path, PathBuf};

use anyhow::Context;
use pattern_forge::prelude::*;
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Installs a fmt subscriber; `RUST_LOG` overrides the default `info` level.
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = tracing_subscriber::fmt().with_env_filter(filter).try_init();
}

/// Output size and directory for rendered images.
#[derive(Clone, Debug)]
pub struct RenderConfig {
    pub size: (i32, i32),
    pub out_dir: PathBuf,
}

impl RenderConfig {
    pub fn new(size: (i32, i32)) -> Self {
        Self {
            size,
            out_dir: PathBuf::from("."),
        }
    }

    pub fn with_out_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.out_dir = dir.into();
        self
    }

    pub fn rect(&self) -> Rect {
        Rect::from_size(self.size.0, self.size.1)
    }

    pub fn path_for(&self, name: &str) -> PathBuf {
        self.out_dir.join(format!("{name}.png"))
    }
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self::new((256, 256))
    }
}

/// Rasterizes `pattern` over `rect` and writes it as PNG.
pub fn save_pattern(
    pattern: &dyn Pattern,
    rect: Rect,
    path: impl AsRef<Path>,
) -> anyhow::Result<()> {
    let path = path.as_ref();
    let image = rasterize(pattern, rect);
    image
        .save(path)
        .with_context(|| format!("writing {}", path.display()))?;
    info!(
        "Saved {}x{} image to {}",
        image.width(),
        image.height(),
        path.display()
    );
    Ok(())
}

/// Renders every registered scene and every references table entry.
///
/// Reference images are written as `<table>-<entry>.png`. Returns the number
/// of files written.
pub fn render_registry(config: &RenderConfig) -> anyhow::Result<usize> {
    fs::create_dir_all(&config.out_dir)
        .with_context(|| format!("creating {}", config.out_dir.display()))?;
    let registry = registry();
    let rect = config.rect();
    let mut written = 0;

    for name in registry.names() {
        let pattern = registry.generate(name, rect)?;
        save_pattern(pattern.as_ref(), rect, config.path_for(name))?;
        written += 1;
    }

    for table in registry.reference_names() {
        let references = registry.references(table)?;
        for (entry, generator) in references.ordered() {
            let pattern = generator(rect);
            let path = config.path_for(&format!("{table}-{entry}"));
            save_pattern(pattern.as_ref(), rect, path)?;
            written += 1;
        }
    }

    info!(
        "Rendered {} images into {}",
        written,
        config.out_dir.display()
    );
    Ok(written)
}
