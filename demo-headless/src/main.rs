use clap::Parser;
use fire_grid_core::{
    Environment, Fahrenheit, Grid, MilesPerHour, Percent, PropagationEngine, ScenarioConfig,
    SimulationStats, StepOutcome, TileType, WindDirection,
};
use std::error::Error;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::thread;
use std::time::{Duration, Instant};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

/// Tile-grid wildfire spread demo
#[derive(Parser, Debug)]
#[command(name = "fire-grid-demo")]
#[command(about = "Step a tile-grid fire spread simulation", long_about = None)]
struct Args {
    /// Scenario JSON file; flags below override its fields
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// ASCII layout file, one grid row per line (first line is north)
    #[arg(short, long)]
    layout: Option<PathBuf>,

    /// Grid width when no layout is given
    #[arg(long)]
    width: Option<u32>,

    /// Grid height when no layout is given
    #[arg(long)]
    height: Option<u32>,

    /// Direction the wind blows toward (N, S, E, W, NE, NW, SE, SW)
    #[arg(short, long)]
    wind: Option<WindDirection>,

    /// Wind speed in mph (0-20)
    #[arg(short = 's', long)]
    wind_speed: Option<f32>,

    /// Temperature in °F (32-100)
    #[arg(short, long)]
    temperature: Option<f32>,

    /// Relative humidity in % (0-50)
    #[arg(long)]
    humidity: Option<f32>,

    /// Seed for terrain depths and spread draws
    #[arg(long)]
    seed: Option<u64>,

    /// Stop after this many steps (0 = run until the fire is out)
    #[arg(short, long)]
    max_steps: Option<u32>,

    /// Milliseconds between steps
    #[arg(long, default_value_t = 250)]
    tick_ms: u64,

    /// Print only the final summary
    #[arg(short, long)]
    quiet: bool,
}

fn main() -> ExitCode {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let args = Args::parse();
    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{e}");
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}

fn run(args: &Args) -> Result<(), Box<dyn Error>> {
    let scenario = load_scenario(args)?;
    let (mut grid, environment, mut rng) = scenario.build()?;

    println!("=== Fire Grid Demo ===\n");
    println!("Grid: {}x{}", grid.width(), grid.height());
    println!(
        "Wind: {} at {}, Temp: {}, Humidity: {}",
        environment.wind_direction(),
        environment.wind_speed(),
        environment.temperature(),
        environment.humidity()
    );
    if let Some(origin) = grid.ignition_tile() {
        println!("Ignition: {origin}\n");
    }

    let mut engine = PropagationEngine::with_config(scenario.engine)?;
    engine.start(&mut grid, &environment)?;
    engine.drain_events();
    if !args.quiet {
        print_frame(&grid, &engine.stats(&grid));
    }

    let tick = Duration::from_millis(args.tick_ms);
    let mut next_tick = Instant::now() + tick;
    let mut outcome = StepOutcome::Continuing;

    while outcome == StepOutcome::Continuing {
        if scenario.max_steps > 0 && engine.step_count() >= scenario.max_steps {
            info!(steps = scenario.max_steps, "Step cap reached");
            engine.stop();
            break;
        }
        if !args.quiet {
            thread::sleep(next_tick.saturating_duration_since(Instant::now()));
            next_tick += tick;
        }

        outcome = engine.advance_step(&mut grid, &environment, &mut rng)?;
        let ignited = engine
            .drain_events()
            .iter()
            .filter(|event| event.state.is_burning())
            .count();
        if !args.quiet {
            println!("{ignited} new ignition(s)");
            print_frame(&grid, &engine.stats(&grid));
        }
    }

    print_summary(&engine.stats(&grid), outcome);
    Ok(())
}

/// Layer CLI flags over the scenario file (or the defaults)
fn load_scenario(args: &Args) -> Result<ScenarioConfig, Box<dyn Error>> {
    let mut scenario = match &args.config {
        Some(path) => serde_json::from_str(&read_file(path)?)?,
        None => ScenarioConfig::default(),
    };

    if let Some(path) = &args.layout {
        let rows = read_file(path)?
            .lines()
            .filter(|line| !line.trim().is_empty())
            .map(str::to_string)
            .collect();
        scenario.layout = Some(rows);
    }
    if let Some(width) = args.width {
        scenario.width = width;
    }
    if let Some(height) = args.height {
        scenario.height = height;
    }
    if let Some(seed) = args.seed {
        scenario.seed = seed;
    }
    if let Some(max_steps) = args.max_steps {
        scenario.max_steps = max_steps;
    }

    let env = scenario.environment;
    scenario.environment = Environment::new(
        args.wind.unwrap_or(env.wind_direction()),
        args.wind_speed.map_or(env.wind_speed(), MilesPerHour::new),
        args.temperature.map_or(env.temperature(), Fahrenheit::new),
        args.humidity.map_or(env.humidity(), Percent::new),
    )?;
    Ok(scenario)
}

fn read_file(path: &Path) -> Result<String, Box<dyn Error>> {
    std::fs::read_to_string(path)
        .map_err(|e| format!("failed to read {}: {e}", path.display()).into())
}

fn print_frame(grid: &Grid, stats: &SimulationStats) {
    println!(
        "Step {:4} | Burning {:4} | Burned {:4} | Unburned fuel {:4}",
        stats.step, stats.burning, stats.burned, stats.unburned_flammable
    );
    println!("{}", grid.render_ascii());
}

fn print_summary(stats: &SimulationStats, outcome: StepOutcome) {
    let label = match outcome {
        StepOutcome::Finished => "Complete",
        StepOutcome::Continuing => "Stopped",
    };
    println!("=== Simulation {label} ===");
    println!("Steps: {}", stats.step);
    println!("Burned tiles: {}", stats.burned);
    println!("Still burning: {}", stats.burning);
    println!("Affected fuel: {:.1}%", stats.affected_fraction() * 100.0);

    for terrain in TileType::TERRAIN {
        if let Some(count) = stats.burned_by_terrain.get(&terrain) {
            println!("  {terrain:?}: {count}");
        }
    }
}
