use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;

/// Prints the JSON schema of the lazymask config file.
#[derive(Parser, Debug)]
#[command(name = "dump_config_schema")]
struct Args {
    /// Write the schema here instead of stdout
    #[arg(long, short = 'o', value_name = "FILE")]
    output: Option<PathBuf>,
}

fn main() -> Result<()> {
    let args = Args::parse();
    let schema = serde_json::to_string_pretty(&lazymask::Config::json_schema())?;

    match args.output {
        Some(path) => fs::write(&path, schema)
            .with_context(|| format!("Failed to write schema to {}", path.display()))?,
        None => println!("{schema}"),
    }
    Ok(())
}
