use std::path::Path;

use anyhow::Result;
use monthcal_core::config::AppConfig;
use owo_colors::OwoColorize;

pub fn run(config: &AppConfig, config_override: Option<&Path>) -> Result<()> {
    let config_path = match config_override {
        Some(path) => path.to_path_buf(),
        None => AppConfig::config_path()?,
    };

    println!("{}", "Paths".bold());
    println!("  Config:   {}", config_path.display());
    println!("  Events:   {}", config.slot().path().display());
    println!("  Exports:  {}", config.export_path().display());

    Ok(())
}
