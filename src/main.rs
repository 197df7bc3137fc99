//! Ogcard - Open Graph preview card generator for static sites.

#![allow(dead_code)]

mod card;
mod cli;
mod config;
mod embed;
mod logger;
mod manifest;
mod utils;

use anyhow::Result;
use clap::{ColorChoice, Parser};
use cli::{Cli, Commands};
use config::OgConfig;

fn main() -> Result<()> {
    let cli: &'static Cli = Box::leak(Box::new(Cli::parse()));

    // Set global color override based on CLI option
    match cli.color {
        ColorChoice::Always => owo_colors::set_override(true),
        ColorChoice::Never => owo_colors::set_override(false),
        ColorChoice::Auto => {} // owo-colors auto-detects TTY
    }

    let config = OgConfig::load(cli)?;

    match &cli.command {
        Commands::Init { dry, .. } => cli::init::new_project(&config, *dry),
        Commands::Build { .. } => cli::build::build_cards(&config),
        Commands::Validate => cli::validate::validate_project(&config),
    }
}
