use ppsim::{LogRenderer, NoInput, Scenario, ScenarioConfig, Simulation};
use ppsim::{bench_forces, bench_tick};

use anyhow::{Context, Result};
use clap::Parser;

use std::fs::File;
use std::io::BufReader;
use std::path::PathBuf;

#[derive(Parser, Debug)]
struct Args {
    /// Scenario file under `scenarios/`
    #[arg(short, default_value = "default.yaml")]
    file_name: String,

    /// Headless run length in frames, runs until killed when omitted
    #[arg(short, long)]
    ticks: Option<u64>,

    /// Time serial vs. parallel stages instead of simulating
    #[arg(long)]
    bench: bool,

    /// Open the bevy window (requires the `viewer` feature)
    #[arg(long)]
    viewer: bool,
}

// load here to keep main clean
fn load_scenario_from_yaml(file_name: &str) -> Result<ScenarioConfig> {
    let config_path = PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("scenarios").join(file_name);
    let file = File::open(&config_path).with_context(|| format!("opening {}", config_path.display()))?;
    let reader = BufReader::new(file);
    let scenario_cfg: ScenarioConfig = serde_yaml::from_reader(reader)?;

    log::debug!("{:?}", scenario_cfg);

    Ok(scenario_cfg)
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let args = Args::parse();

    if args.bench {
        bench_forces();
        bench_tick();
        return Ok(());
    }

    let scenario_cfg = load_scenario_from_yaml(&args.file_name)?;
    let scenario = Scenario::build_scenario(scenario_cfg)?;
    let mut sim = Simulation::new(scenario)?;

    if args.viewer {
        #[cfg(feature = "viewer")]
        {
            ppsim::run_2d(sim);
            return Ok(());
        }
        #[cfg(not(feature = "viewer"))]
        anyhow::bail!("built without the `viewer` feature");
    }

    let mut renderer = LogRenderer::default();
    sim.run(&mut renderer, &mut NoInput, args.ticks);

    for (handle, particle) in sim.system().iter() {
        log::info!("{:?}: {}", handle, particle);
    }

    Ok(())
}
