//! Drop menu replay harness.
//!
//! Reads a JSON script of UI interactions, feeds them through an aggregation
//! menu and a data-source menu, resolves source fetches against the script's
//! in-memory provider, and prints the resulting queries as JSON.

mod script;

use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use tracing::{info, warn};

use crate::script::Script;

/// Replay command line arguments.
#[derive(Parser, Debug)]
#[command(name = "dropmenu-replay")]
#[command(about = "Replay drop menu interactions and print the resulting queries")]
struct Args {
	/// Script file (JSON)
	#[arg(value_name = "SCRIPT")]
	script: PathBuf,

	/// Directory holding dropmenu.toml
	#[arg(short, long, value_name = "DIR")]
	config: Option<PathBuf>,

	/// Verbose logging
	#[arg(short, long)]
	verbose: bool,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
	let args = Args::parse();

	let subscriber = tracing_subscriber::fmt()
		.with_max_level(if args.verbose {
			tracing::Level::DEBUG
		} else {
			tracing::Level::INFO
		})
		.with_writer(std::io::stderr)
		.finish();
	tracing::subscriber::set_global_default(subscriber)?;

	let config = match args.config.clone().or_else(dropmenu_config::default_config_dir) {
		Some(dir) => {
			let report = dropmenu_config::load_config_from_dir(&dir);
			for (path, error) in &report.errors {
				warn!(path = %path.display(), error = %error, "config ignored");
			}
			report.config_or_default()
		}
		None => dropmenu_config::MenuConfig::default(),
	};

	let content = std::fs::read_to_string(&args.script)
		.with_context(|| format!("reading script {}", args.script.display()))?;
	let script: Script = serde_json::from_str(&content)
		.with_context(|| format!("parsing script {}", args.script.display()))?;
	info!(steps = script.steps.len(), "replaying script");

	let report = script::run(script, config).await?;
	println!("{}", serde_json::to_string_pretty(&report)?);
	Ok(())
}
