use clap::{Parser, Subcommand};
use std::error::Error;
use std::thread;
use std::time::Instant;
use traffic_light::{LightConfig, LightGroup};

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run lights with vehicles waiting on each of them
    Run {
        /// Number of independent lights
        #[arg(long, default_value_t = 1)]
        lights: usize,

        /// Vehicles waiting at each light
        #[arg(long, default_value_t = 3)]
        waiters: usize,

        /// Green phases each vehicle waits through before leaving
        #[arg(long, default_value_t = 2)]
        greens: usize,

        /// Shortest cycle in seconds
        #[arg(long, default_value_t = 4.0)]
        min_cycle: f64,

        /// Longest cycle in seconds
        #[arg(long, default_value_t = 6.0)]
        max_cycle: f64,

        /// Seed for reproducible cycle lengths
        #[arg(long)]
        seed: Option<u64>,
    },
}

fn main() -> Result<(), Box<dyn Error>> {
    env_logger::init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Run {
            lights,
            waiters,
            greens,
            min_cycle,
            max_cycle,
            seed,
        } => {
            let mut group = LightGroup::new();

            for index in 0..lights {
                let mut config = LightConfig::new().with_cycle_secs(min_cycle, max_cycle)?;

                if let Some(seed) = seed {
                    config = config.with_seed(seed.wrapping_add(index as u64));
                }

                group.add(&format!("light-{index}"), config)?;
            }

            println!(
                "Starting {} light(s) with {} vehicle(s) each...",
                group.len(),
                waiters
            );

            group.start_all()?;
            let started = Instant::now();
            let mut vehicles = Vec::with_capacity(lights * waiters);

            for light in group.lights() {
                for vehicle in 0..waiters {
                    let light = light.clone();
                    let handle = thread::spawn(move || -> Result<(), String> {
                        for green in 1..=greens {
                            light.wait_for_green().map_err(|e| e.to_string())?;
                            println!(
                                "[{:>6.2}s] {} vehicle {} saw green #{}",
                                started.elapsed().as_secs_f64(),
                                light.name(),
                                vehicle,
                                green
                            );
                        }

                        Ok(())
                    });

                    vehicles.push(handle);
                }
            }

            for vehicle in vehicles {
                match vehicle.join() {
                    Ok(Ok(())) => {}
                    Ok(Err(message)) => log::warn!("vehicle gave up: {message}"),
                    Err(_) => log::error!("vehicle thread panicked"),
                }
            }

            group.stop_all();

            for (name, phase) in group.phases() {
                println!("{name} stopped at {phase}");
            }

            println!("Simulation completed.");
        }
    }

    Ok(())
}
