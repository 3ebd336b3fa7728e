//! Bunker Builder - headless driver
//!
//! Loads a scenario, runs the scheduler for a number of ticks, and reports
//! what the dwarves built. Rendering and input live elsewhere; this binary
//! only drives the simulation.

use std::path::PathBuf;

use bunker_builder::core::config::SimulationConfig;
use bunker_builder::core::error::Result;
use bunker_builder::ecs::world::World;
use bunker_builder::simulation::tick::{run_simulation_tick, SimulationEvent};
use bunker_builder::world::loader::Scenario;
use clap::Parser;

/// Headless colony runner
#[derive(Parser, Debug)]
#[command(name = "bunker-builder")]
#[command(about = "Run the dwarf colony scheduler without a window")]
struct Args {
    /// Scenario file (TOML); the built-in starter bunker is used when absent
    #[arg(long)]
    scenario: Option<PathBuf>,

    /// Simulation config file (TOML)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Number of ticks to run
    #[arg(long, default_value_t = 1000)]
    ticks: u64,

    /// Seed for dwarf names (overrides the config file)
    #[arg(long)]
    seed: Option<u64>,

    /// Print a JSON snapshot of the final world to stdout
    #[arg(long)]
    json: bool,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("bunker_builder=info")),
        )
        .init();

    let args = Args::parse();

    let mut config = match &args.config {
        Some(path) => SimulationConfig::load(path)?,
        None => SimulationConfig::default(),
    };
    if let Some(seed) = args.seed {
        config.name_seed = seed;
    }
    config.validate()?;

    let scenario = match &args.scenario {
        Some(path) => Scenario::load(path)?,
        None => {
            tracing::info!("No scenario given, using the starter bunker");
            Scenario::starter_bunker()
        }
    };
    let mut world = scenario.build(config);

    let mut built = 0usize;
    let mut starved_ticks = 0u64;
    for _ in 0..args.ticks {
        for event in run_simulation_tick(&mut world) {
            match event {
                SimulationEvent::ConstructionComplete { dwarf, cell, kind } => {
                    built += 1;
                    tracing::info!(
                        tick = world.current_tick,
                        dwarf = dwarf.0,
                        cell = %cell,
                        ?kind,
                        "Structure finished"
                    );
                }
                SimulationEvent::SearchBudgetExhausted { .. } => starved_ticks += 1,
                SimulationEvent::JobClaimed { .. } | SimulationEvent::ItemPickedUp { .. } => {}
            }
        }
    }

    if starved_ticks > 0 {
        tracing::warn!(
            starved_ticks,
            "Search budget ran out on some ticks; consider raising search_budget"
        );
    }
    report(&world, built);

    if args.json {
        println!("{}", serde_json::to_string_pretty(&world.snapshot())?);
    }
    Ok(())
}

fn report(world: &World, built: usize) {
    tracing::info!(
        ticks = world.current_tick,
        built,
        pending_plans = world.structures.plan_count(),
        "Run complete"
    );
    for dwarf in world.dwarf_views() {
        let cell = bunker_builder::spatial::grid::Cell::from(dwarf.position);
        let carrying = dwarf
            .held_item
            .and_then(|id| world.items.get(id))
            .map(|item| format!("{:?}", item.item_type))
            .unwrap_or_else(|| "nothing".to_string());
        tracing::info!("{} is at {} carrying {}", dwarf.name, cell, carrying);
    }
}
