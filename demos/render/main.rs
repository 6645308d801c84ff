//! Renders the trefoil knot to a PNG with the fallback projection renderer.
//!
//! Usage:
//! ```text
//! cargo run --example render                                  # trefoil.png
//! cargo run --example render -- out.png magnitude=3 param_a=1
//! ```
//!
//! Field names are those of `ParamField::name`; values are clamped to the
//! slider ranges.

use std::error::Error;
use std::time::Duration;

use trefoil::geometry::ParamField;
use trefoil::math::Color;
use trefoil::render::RasterSurface;
use trefoil::viewer::{ManualClock, ParameterStore, Viewer, ViewerConfig};

const WIDTH: u32 = 800;
const HEIGHT: u32 = 600;

fn main() -> Result<(), Box<dyn Error>> {
    // Default: WARN for everything, INFO for trefoil.
    // Override with RUST_LOG env var (e.g. RUST_LOG=trefoil=debug).
    let env_filter = tracing_subscriber::EnvFilter::from_default_env()
        .add_directive(tracing_subscriber::filter::LevelFilter::WARN.into())
        .add_directive("render=info".parse().unwrap_or_default())
        .add_directive("trefoil=info".parse().unwrap_or_default());
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    let mut output = String::from("trefoil.png");
    let mut store = ParameterStore::new();
    for arg in std::env::args().skip(1) {
        let Some((name, value)) = arg.split_once('=') else {
            output = arg;
            continue;
        };
        let Some(field) = ParamField::from_name(name) else {
            tracing::warn!(name, "unknown parameter");
            continue;
        };
        store.set_field(field, value.parse()?);
    }

    let clock = ManualClock::new();
    let mut viewer = Viewer::with_clock(store, ViewerConfig::default(), clock.clone())?;
    viewer.resize(WIDTH, HEIGHT);

    let mut surface =
        RasterSurface::new(WIDTH, HEIGHT).with_background(Color::from_hex(0x1a_1a_2e));
    viewer.frame(Some(&mut surface))?;
    // A little auto-rotation so the knot is not drawn edge-on.
    clock.advance(Duration::from_millis(600));
    viewer.frame(Some(&mut surface))?;

    let mesh = viewer.mesh().map_or(0, trefoil::tessellation::Mesh::triangle_count);
    tracing::info!(triangles = mesh, path = %output, "writing frame");
    surface.image().save(&output)?;
    Ok(())
}
