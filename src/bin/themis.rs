use std::env;
use std::io;
use std::path::Path;

use anyhow::{bail, Result};
use log::info;

use themis::runner::WalkForward;
use themis::source::file;
use themis::strategy::momentum::{MomentumConfig, MomentumNeutral};
use themis::strategy::WeightStrategy;

fn main() -> Result<()> {
    env_logger::init();
    let args: Vec<String> = env::args().collect();

    if args.len() < 2 {
        bail!("Usage: themis <input.csv> [output.json|output.csv] [config.json]");
    }

    let panel = file::from_path(Path::new(&args[1]))?;

    let config = match args.get(3) {
        Some(config_path) => MomentumConfig::from_path(Path::new(config_path))?,
        None => MomentumConfig::default(),
    };
    info!("Running with {:?}", config);

    let strategy = MomentumNeutral::new(config);
    let warmup = strategy.warmup();
    let series = WalkForward::new(strategy).run(&panel).without_warmup(warmup);

    match args.get(2) {
        Some(output) => series.write_path(Path::new(output))?,
        None => series.write_json(io::stdout().lock())?,
    }
    Ok(())
}
