//! Linear Regression Simulator Example
//!
//! This example replays a short control session:
//! - Start from the default sliders
//! - Move the sliders and press Simulate
//! - Press Clear and confirm the fitted line survives
//! - Write the chart to SVG after each step
//!
//! Set `RUST_LOG=regsim=debug` to see every event.

use regsim::prelude::*;
use tracing_subscriber::EnvFilter;

fn main() -> Result<(), RegSimError> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("regsim=info")),
        )
        .init();

    println!("{}", "=".repeat(80));
    println!("Linear Regression Simulator");
    println!("{}", "=".repeat(80));
    println!();

    let out_dir = std::env::temp_dir().join("regsim");
    std::fs::create_dir_all(&out_dir).map_err(|e| RegSimError::Render(e.to_string()))?;

    let mut sim = Simulator::new(2017)?;
    report("Initial data", &sim);
    sim.render_svg(out_dir.join("00_initial.svg"))?;

    let session = [
        Event::SetSamples(300),
        Event::SetBias(-25.0),
        Event::SetNoise(12.0),
        Event::Simulate,
    ];
    for event in session {
        sim.handle(event)?;
    }
    report("After Simulate (300 samples, bias -25, noise 12)", &sim);
    sim.render_svg(out_dir.join("01_simulated.svg"))?;

    sim.handle(Event::Clear)?;
    report("After Clear", &sim);
    sim.render_svg(out_dir.join("02_cleared.svg"))?;

    match sim.handle(Event::SetSamples(75)) {
        Ok(()) => println!("75 samples accepted"),
        Err(e) => println!("Rejected: {e}"),
    }

    println!();
    println!("Charts written to {}", out_dir.display());
    Ok(())
}

fn report(label: &str, sim: &Simulator) {
    let fit = sim.line_fit();
    let (x, y) = (sim.x_range(), sim.y_range());

    println!("{label}");
    println!("{}", "-".repeat(80));
    println!("  points:        {}", sim.data_source().len());
    println!("  true coef:     {:.3}", sim.true_coef());
    println!("  fitted line:   y = {:.3}·x + {:.3}", fit.slope, fit.intercept);
    println!("  x range:       [{:.3}, {:.3}]", x.start, x.end);
    println!("  y range:       [{:.3}, {:.3}]", y.start, y.end);
    println!();
}
