use clap::{Parser, Subcommand, ValueEnum};
use glam::Vec2;
use headway_common::{FrameIntents, ThrottleIntent, TurnIntent};
use headway_kernel::{FrameSnapshot, HeadingModel, PointerProjection, PointerProjector, SimConfig, Simulation};
use headway_render::{DebugTextRenderer, Renderer};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "headway-cli", about = "Headless driver for the headway frame loop")]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// YAML configuration file
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print crate versions and the effective configuration
    Info,
    /// Run the frame loop with constant intents and print the last frame
    Simulate {
        /// Number of ticks to run
        #[arg(short, long, default_value = "60")]
        ticks: u64,
        #[arg(long, value_enum, default_value = "none")]
        turn: TurnArg,
        #[arg(long, value_enum, default_value = "none")]
        throttle: ThrottleArg,
        /// Override the configured heading model
        #[arg(long, value_enum)]
        model: Option<ModelArg>,
        /// Pointer position in window pixels; defaults to the window centre
        #[arg(long, num_args = 2, value_names = ["X", "Y"])]
        pointer: Option<Vec<f32>>,
        /// Print the frame as JSON
        #[arg(long)]
        json: bool,
    },
    /// Project a screen point through the configured camera
    Project {
        #[arg(long)]
        x: f32,
        #[arg(long)]
        y: f32,
        /// Print the projection as JSON
        #[arg(long)]
        json: bool,
    },
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum TurnArg {
    Left,
    Right,
    None,
}

impl From<TurnArg> for TurnIntent {
    fn from(arg: TurnArg) -> Self {
        match arg {
            TurnArg::Left => TurnIntent::Left,
            TurnArg::Right => TurnIntent::Right,
            TurnArg::None => TurnIntent::None,
        }
    }
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum ThrottleArg {
    Forward,
    Backward,
    None,
}

impl From<ThrottleArg> for ThrottleIntent {
    fn from(arg: ThrottleArg) -> Self {
        match arg {
            ThrottleArg::Forward => ThrottleIntent::Forward,
            ThrottleArg::Backward => ThrottleIntent::Backward,
            ThrottleArg::None => ThrottleIntent::None,
        }
    }
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum ModelArg {
    Planar,
    Quaternion,
}

impl From<ModelArg> for HeadingModel {
    fn from(arg: ModelArg) -> Self {
        match arg {
            ModelArg::Planar => HeadingModel::Planar,
            ModelArg::Quaternion => HeadingModel::Quaternion,
        }
    }
}

/// Run `ticks` ticks with the same intents every tick.
fn simulate(config: SimConfig, intents: FrameIntents, ticks: u64) -> Option<FrameSnapshot> {
    let camera = config.camera;
    let viewport = config.window.viewport();
    let mut sim = Simulation::new(config);
    let mut input = intents;
    sim.run(&mut input, &camera, viewport, ticks)
}

fn project(config: &SimConfig, screen: Vec2) -> PointerProjection {
    PointerProjector::new(config.ground_box).update(screen, &config.camera, config.window.viewport())
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(filter))
        .init();

    let mut config = SimConfig::load_or_default(cli.config.as_deref())?;

    match cli.command {
        Commands::Info => {
            println!("headway-cli v{}", env!("CARGO_PKG_VERSION"));
            println!("kernel: {}", headway_kernel::crate_info());
            println!("input: {}", headway_input::crate_info());
            println!("render: {}", headway_render::crate_info());
            println!();
            print!("{}", config.to_yaml()?);
        }
        Commands::Simulate {
            ticks,
            turn,
            throttle,
            model,
            pointer,
            json,
        } => {
            if let Some(model) = model {
                config.heading_model = model.into();
            }
            let viewport = config.window.viewport();
            let pointer = match pointer.as_deref() {
                Some([x, y]) => Vec2::new(*x, *y),
                _ => Vec2::new(viewport.width as f32 / 2.0, viewport.height as f32 / 2.0),
            };
            let intents = FrameIntents {
                turn: turn.into(),
                throttle: throttle.into(),
                reset: false,
                pointer,
            };
            tracing::info!(ticks, ?intents, model = ?config.heading_model, "simulating");

            let camera = config.camera;
            let Some(frame) = simulate(config, intents, ticks) else {
                println!("no frames simulated");
                return Ok(());
            };
            if json {
                println!("{}", serde_json::to_string_pretty(&frame)?);
            } else {
                print!("{}", DebugTextRenderer::new().render(&frame, &camera));
            }
        }
        Commands::Project { x, y, json } => {
            let projection = project(&config, Vec2::new(x, y));
            if json {
                println!("{}", serde_json::to_string_pretty(&projection)?);
            } else {
                let ray = projection.ray;
                println!("screen: ({x:.2}, {y:.2})");
                println!(
                    "ray: origin=({:.3}, {:.3}, {:.3}) direction=({:.3}, {:.3}, {:.3})",
                    ray.origin.x, ray.origin.y, ray.origin.z, ray.direction.x, ray.direction.y, ray.direction.z
                );
                match projection.world_point() {
                    Some(p) => println!(
                        "hit: ({:.3}, {:.3}, {:.3}) at distance {:.3}",
                        p.x, p.y, p.z, projection.hit.distance
                    ),
                    None => println!("hit: none"),
                }
            }
        }
    }

    Ok(())
}
