mod replay;

use anyhow::{Context, Result};
use markdown_elevate_config::Config;
use replay::Replay;
use std::io::Read;
use std::{env, fs, io, process};

fn main() -> Result<()> {
    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Info)
        .init();

    // Read the markdown to replay from a file argument or stdin
    let args: Vec<String> = env::args().collect();
    let input = match args.len() {
        1 => {
            let mut input = String::new();
            io::stdin()
                .read_to_string(&mut input)
                .context("Failed to read stdin")?;
            input
        }
        2 => fs::read_to_string(&args[1])
            .with_context(|| format!("Failed to read input file '{}'", args[1]))?,
        _ => {
            eprintln!("Usage: {} [markdown-file]", args[0]);
            process::exit(1);
        }
    };

    let config_path = Config::config_path();
    let config = match Config::load()? {
        Some(config) => {
            log::info!("Loaded config from {}", config_path.display());
            config
        }
        None => {
            log::info!(
                "No config file at {}, using defaults",
                config_path.display()
            );
            Config::default()
        }
    };

    let mut replay = Replay::from_config(&config)?;
    replay.type_text(&input);
    println!("{}", replay.render());
    Ok(())
}
