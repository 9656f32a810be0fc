use std::env;

use pattern_forge_examples::{init_tracing, render_registry, RenderConfig};

fn main() -> anyhow::Result<()> {
    init_tracing();
    // Usage: render-scenes [OUT_DIR] [SIZE]
    let mut args = env::args().skip(1);
    let out_dir = args.next().unwrap_or_else(|| "scenes".to_string());
    let size = match args.next() {
        Some(s) => s.parse::<i32>()?,
        None => 256,
    };

    let config = RenderConfig::new((size, size)).with_out_dir(out_dir);
    render_registry(&config)?;
    Ok(())
}
