/// Headless fluid particle runner
///
/// Usage: fluid-particles [config.toml] [frames] [output.png]
use anyhow::{Context, Result};
use std::time::Instant;

use fluid_particles::{save_screenshot, Simulation, SimulationConfig};

const FRAME_DT: f64 = 1.0 / 60.0;
const DEFAULT_FRAMES: u32 = 120;

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let mut args = std::env::args().skip(1);
    let config = match args.next() {
        Some(path) if path != "-" => SimulationConfig::load(&path)
            .with_context(|| format!("loading config {}", path))?,
        _ => SimulationConfig::default(),
    };
    let frames = match args.next() {
        Some(n) => n.parse::<u32>().with_context(|| format!("invalid frame count {:?}", n))?,
        None => DEFAULT_FRAMES,
    };
    let output = args.next();

    let mut simulation = Simulation::new(config)?;
    log::info!(
        "Running {} frames with {} particles on {} workers",
        frames,
        simulation.particles().particle_count(),
        simulation.backend().thread_count()
    );

    let start = Instant::now();
    for frame in 0..frames {
        simulation.frame(frame as f64 * FRAME_DT);
    }
    let elapsed = start.elapsed().as_secs_f64();
    if frames > 0 && elapsed > 0.0 {
        log::info!(
            "{} frames in {:.3}s ({:.1} frames/s, simulated clock {:.1} fps)",
            frames,
            elapsed,
            frames as f64 / elapsed,
            simulation.fps()
        );
    }

    if let Some(path) = output {
        save_screenshot(simulation.output(), &path)?;
    }
    Ok(())
}
