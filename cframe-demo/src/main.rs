//! CFrame Demo - aims a frame at a goal and pushes it along its look vector
//!
//! Logging follows `RUST_LOG` (default `info`); `RUST_LOG=debug` also shows
//! each interpolation step and any degenerate-case fallbacks.

use cframe_core::{FrameResult, Vector3f};
use cframe_demo::Tour;
use tracing::info;
use tracing_subscriber::EnvFilter;

fn main() -> FrameResult<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let tour = Tour::run(Vector3f::new(2.0, 2.0, 2.0), 4)?;

    println!("{}", tour.sum_2d);
    println!("{}", tour.origin);
    println!("{}", tour.goal);
    println!("{}", tour.pushed.position());
    info!(steps = tour.steps.len(), "done");
    Ok(())
}
