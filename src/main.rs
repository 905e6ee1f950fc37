use anyhow::Result;
use neurofield::{Config, Engine};

fn main() -> Result<()> {
    // Optional TOML config path as the first argument; defaults otherwise
    let config = match std::env::args().nth(1) {
        Some(path) => Config::from_file(&path)?,
        None => {
            let config = Config::default();
            config.validate()?;
            config
        }
    };
    config.print_summary();

    let mut engine = Engine::from_config(&config)?;

    println!("Starting simulation...");
    let steps = config.run.steps;
    for step in 1..=steps {
        engine.step();

        if step % config.run.report_period == 0 || step == steps {
            println!("Step {}/{} (t={:.3})", step, steps, engine.time());
        }
    }

    // Summary of the final energy-flow frame
    let flow = engine.energy_flow();
    let min = flow.iter().copied().fold(f64::INFINITY, f64::min);
    let max = flow.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    let mean = flow.sum() / flow.len() as f64;
    println!("Simulation complete!");
    println!(
        "Final energy flow: min={:.4}, max={:.4}, mean={:.4}",
        min, max, mean
    );
    let volume = engine.history_snapshot();
    println!(
        "History volume: {} frames of {}x{}",
        volume.dim().0,
        volume.dim().1,
        volume.dim().2
    );

    Ok(())
}
