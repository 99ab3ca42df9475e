//! Scroll Runner headless driver
//!
//! Runs a scripted session without a renderer: fixed frame rate, scroll
//! pulses on a cadence, final world snapshot printed as JSON. Handy for
//! checking that a seed replays identically.

#[cfg(not(target_arch = "wasm32"))]
mod native {
    use std::path::PathBuf;

    use anyhow::Context;
    use clap::Parser;

    use scroll_runner::WorldConfig;
    use scroll_runner::consts::FRAME_DT;
    use scroll_runner::sim::{TickInput, WorldEvent, WorldSimulator};

    #[derive(Parser)]
    #[command(name = "scroll-runner", about = "Headless endless-runner simulation")]
    pub struct Cli {
        /// RNG seed for the session
        #[arg(short, long, default_value = "42")]
        seed: u64,
        /// Simulated seconds to run
        #[arg(short = 't', long, default_value = "30")]
        seconds: f32,
        /// Seconds between scroll pulses (0 disables scrolling)
        #[arg(short, long, default_value = "1.5")]
        pulse_every: f32,
        /// JSON world config; defaults are used when omitted
        #[arg(short, long)]
        config: Option<PathBuf>,
        /// Print the final snapshot as JSON
        #[arg(long)]
        json: bool,
    }

    pub fn run(cli: Cli) -> anyhow::Result<()> {
        let config = match &cli.config {
            Some(path) => WorldConfig::load(path)
                .with_context(|| format!("loading config {}", path.display()))?,
            None => WorldConfig::default(),
        };
        let mut sim = WorldSimulator::new(config, cli.seed)?;

        let frames = (cli.seconds / FRAME_DT).round().max(0.0) as u64;
        let pulse_frames = if cli.pulse_every > 0.0 {
            ((cli.pulse_every / FRAME_DT).round() as u64).max(1)
        } else {
            0
        };
        log::info!(
            "Running {} frames (seed {}, pulse every {} frames)",
            frames,
            cli.seed,
            pulse_frames
        );

        for frame in 0..frames {
            let pulse = pulse_frames > 0 && frame % pulse_frames == 0;
            sim.tick(&TickInput::pulses(u32::from(pulse)), FRAME_DT);

            for event in sim.drain_events() {
                if let WorldEvent::ScoreChanged { score } = event {
                    log::info!("[{:>6.2}s] SCORE: {}", sim.elapsed_secs(), score);
                }
            }
        }

        println!(
            "seed={} ticks={} score={} stars={} speed={:.3}",
            sim.seed(),
            sim.time_ticks(),
            sim.score(),
            sim.stars_collected(),
            sim.speed()
        );
        if cli.json {
            println!("{}", serde_json::to_string_pretty(&sim.snapshot())?);
        }
        Ok(())
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() -> anyhow::Result<()> {
    use clap::Parser;

    env_logger::init();
    native::run(native::Cli::parse())
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is `scroll_runner::wasm::start`, this is just to satisfy the compiler
}
