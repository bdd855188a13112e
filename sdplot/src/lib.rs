#![doc = include_str!("../README.md")]

use clap::Parser;
use std::{io::Write as _, path::PathBuf};

mod io;
pub use io::*;

mod commands;
pub use commands::*;

mod config;
pub use config::AppConfig;

mod scenario;
pub use scenario::*;

// The top-level arguments: shared settings and which subcommand to execute
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
pub struct BaseArgs {
    /// Path to a configuration file
    #[arg(short, long, global = true, env = "APP_CONFIG")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

impl BaseArgs {
    pub fn evaluate(self) -> anyhow::Result<()> {
        let config = AppConfig::load(self.config.as_deref())?;

        match self.command {
            Commands::Plot {
                io,
                mode,
                total,
                no_legend,
            } => {
                let svg = plot(io.scenario()?, &config, mode, total, !no_legend)?;
                let mut output = io.write()?;
                output.write_all(svg.as_bytes())?;
                output.flush()?;
            }
            Commands::Equilibrium { io } => {
                let report = equilibrium(io.scenario()?, &config)?;
                let mut output = io.write()?;
                serde_json::to_writer_pretty(&mut output, &report)?;
                writeln!(output)?;
                output.flush()?;
            }
        }

        Ok(())
    }
}
