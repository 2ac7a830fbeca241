use std::{env, process};

use anyhow::Context;
use log::info;
use predictor::configs::{PredictorConfig, load_config};

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let args: Vec<String> = env::args().collect();
    if args.len() > 2 {
        eprintln!("Usage: {} [config.json]", args[0]);
        process::exit(1);
    }

    let config = match args.get(1) {
        Some(path) => {
            load_config(path).with_context(|| format!("loading config from {path}"))?
        }
        None => PredictorConfig::default(),
    }
    .with_env_overrides();

    info!("inputs: {:?}", config.inputs());
    let estimate = predictor::estimate(&config)?;
    println!("{estimate}");

    Ok(())
}
