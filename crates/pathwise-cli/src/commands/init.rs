//! Initialize a Pathwise deployment directory.

use anyhow::{Context, Result};
use colored::Colorize;
use pathwise::{Config, CONFIG_FILE};
use std::path::PathBuf;

pub fn run(path: Option<PathBuf>, force: bool) -> Result<()> {
    let base_path = match path {
        Some(p) => p,
        None => std::env::current_dir().context("Failed to read current directory")?,
    };

    println!("{} Initializing Pathwise in {}...", "→".blue(), base_path.display());

    std::fs::create_dir_all(&base_path)
        .with_context(|| format!("Failed to create {}", base_path.display()))?;

    let config_path = base_path.join(CONFIG_FILE);
    if config_path.exists() && !force {
        println!("  {} {} already exists", "•".yellow(), config_path.display());
    } else {
        Config::default().save(&config_path)?;
        println!("  {} Created {}", "✓".green(), config_path.display());
    }

    let defaults = Config::default();
    println!();
    println!("{} Pathwise configured!", "✓".green().bold());
    println!();
    println!("Next steps:");
    println!(
        "  {} Put the resource dataset at {}",
        "1.".blue(),
        defaults.data.catalog_path.cyan()
    );
    println!(
        "  {} Put the query embeddings at {}",
        "2.".blue(),
        defaults.embedder.path.cyan()
    );
    println!(
        "  {} pathwise path \"Introduction to Python\" \"Decision Trees\"",
        "3.".blue()
    );

    Ok(())
}
