use std::fs::File;
use std::io::BufWriter;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use log::info;
use orienteering::io::{load_course, load_elevation, load_terrain, render_route, save_png};
use orienteering::{
    directions, plan_route, write_directions, AstarSolver, GoalTest, Grid, PlannerConfig,
    Season, TerrainMap, TerrainPalette,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[derive(Parser, Debug)]
#[command(
    name = "orienteering",
    version,
    about = "Plan the quickest route through an orienteering course"
)]
struct Args {
    /// Terrain map, one pixel per acre coloured by the map legend
    terrain: PathBuf,

    /// Elevation file, one line of values per row of the map
    elevation: PathBuf,

    /// Course file with the controls as `x y` pairs in visiting order
    course: PathBuf,

    /// spring, summer, fall or winter
    season: Season,

    /// Where to write the map with the route drawn on it
    #[arg(long, default_value = "path.png")]
    output: PathBuf,

    /// Where to write the turn-by-turn directions
    #[arg(long, default_value = "directions.txt")]
    directions: PathBuf,

    /// TOML file overriding the planner defaults
    #[arg(long)]
    config: Option<PathBuf>,

    /// Give up on a leg after this many expansions
    #[arg(long)]
    max_expansions: Option<usize>,

    /// Give up on a leg after this many milliseconds
    #[arg(long)]
    time_limit_ms: Option<u64>,

    /// finalized or first-generated
    #[arg(long)]
    goal_test: Option<GoalTest>,

    /// Search the legs in parallel
    #[arg(long)]
    parallel: bool,
}

impl Args {
    fn planner_config(&self) -> Result<PlannerConfig> {
        let mut config = match &self.config {
            Some(path) => PlannerConfig::from_toml_file(path)
                .with_context(|| format!("Cannot load config {}", path.display()))?,
            None => PlannerConfig::default(),
        };
        if self.max_expansions.is_some() {
            config.max_expansions = self.max_expansions;
        }
        if self.time_limit_ms.is_some() {
            config.time_limit_ms = self.time_limit_ms;
        }
        if let Some(goal_test) = self.goal_test {
            config.goal_test = goal_test;
        }
        config.parallel_legs |= self.parallel;
        Ok(config)
    }
}

fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let args = Args::parse();
    let config = args.planner_config()?;

    let palette = TerrainPalette::new();
    let (image, mut terrain) = load_terrain(&args.terrain, &palette)
        .with_context(|| format!("Cannot read terrain {}", args.terrain.display()))?;
    args.season.apply(&mut terrain, config.freeze_radius);

    let elevation = load_elevation(&args.elevation, terrain.width(), terrain.height())
        .with_context(|| format!("Cannot read elevation {}", args.elevation.display()))?;
    let course = load_course(&args.course)
        .with_context(|| format!("Cannot read course {}", args.course.display()))?;

    let map = TerrainMap::new(terrain, elevation).context("Terrain and elevation disagree")?;
    let solver = AstarSolver::from_config(&config);
    let route = plan_route(&solver, &map, &course, config.parallel_legs)
        .context("Failed to plan the course")?;
    for (leg, summary) in route.legs().iter().enumerate() {
        info!(
            "Leg {}: {:?} -> {:?}, {} acres, {:.1} s, {} expansions",
            leg, summary.from, summary.to, summary.cells, summary.cost, summary.expansions
        );
    }

    let rendered = render_route(&image, map.terrain(), &palette, route.cells());
    save_png(&rendered, &args.output)
        .with_context(|| format!("Cannot write {}", args.output.display()))?;

    let file = File::create(&args.directions)
        .with_context(|| format!("Cannot create {}", args.directions.display()))?;
    write_directions(BufWriter::new(file), &directions(route.cells()))
        .with_context(|| format!("Cannot write {}", args.directions.display()))?;

    info!(
        "Route of {} acres takes {:.1} s, written to {} and {}",
        route.len(),
        route.total_cost(),
        args.output.display(),
        args.directions.display()
    );
    Ok(())
}
