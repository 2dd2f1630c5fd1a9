//! Semantic search over the catalog.

use anyhow::Result;
use colored::Colorize;
use pathwise::build_engine;
use std::path::Path;

use super::load_config;

pub fn run(config: Option<&Path>, query: &str, top_k: usize, json: bool) -> Result<()> {
    let config = load_config(config)?;
    let engine = build_engine(&config)?;

    let results = engine.search(query, top_k)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&results)?);
        return Ok(());
    }

    if results.is_empty() {
        println!("{} No results found for: {}", "•".yellow(), query.cyan());
        return Ok(());
    }

    println!("{} Results for {}:", "→".blue(), query.cyan().bold());
    println!();

    for (i, r) in results.iter().enumerate() {
        let rank = format!("{}.", i + 1);
        let score = format!("{:.3}", r.semantic_score);

        println!(
            "  {} {} {}",
            rank.blue(),
            r.title.white().bold(),
            format!("({})", score).dimmed()
        );
        println!("      {}", r.url.dimmed());
    }

    println!();
    println!("{} {} results", "✓".green(), results.len().to_string().cyan());

    Ok(())
}
