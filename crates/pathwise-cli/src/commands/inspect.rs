//! Summarize the catalog and scoring setup.

use anyhow::Result;
use colored::Colorize;
use pathwise::prelude::*;
use std::collections::BTreeMap;
use std::path::Path;

use super::load_config;

pub fn run(config: Option<&Path>) -> Result<()> {
    let config = load_config(config)?;
    let engine = build_engine(&config)?;

    let catalog = engine.catalog();
    let report = catalog.report();

    let mut by_type: BTreeMap<&str, usize> = BTreeMap::new();
    let mut by_difficulty: BTreeMap<&str, usize> = BTreeMap::new();
    for r in catalog.resources() {
        *by_type
            .entry(r.content_type.map_or("unmapped", |t| t.as_str()))
            .or_default() += 1;
        *by_difficulty
            .entry(r.difficulty.map_or("unmapped", |d| d.as_str()))
            .or_default() += 1;
    }

    println!("{}", "Pathwise Catalog".white().bold());
    println!("{}", "═".repeat(40).dimmed());
    println!();

    println!("{}", "Load".blue().bold());
    println!("  Loaded:              {}", report.loaded.to_string().cyan());
    println!("  Unknown topic:       {}", report.skipped_unknown_topic);
    println!("  Invalid rows:        {}", report.skipped_invalid);
    println!("  Unmapped type/level: {}", report.unmapped_categorical);
    println!(
        "  Embedding dimension: {}",
        catalog
            .dimension()
            .map_or_else(|| "-".to_string(), |d| d.to_string())
    );
    println!();

    println!("{}", "Resources per Topic".blue().bold());
    let counts = catalog.topic_counts();
    for topic in engine.graph().topics() {
        let n = counts.get(topic.id.as_str()).copied().unwrap_or(0);
        let count = if n == 0 {
            n.to_string().yellow()
        } else {
            n.to_string().cyan()
        };
        println!("  {:<24} {}", topic.label, count);
    }
    println!();

    println!("{}", "Types".blue().bold());
    for (kind, n) in &by_type {
        println!("  {:<24} {}", kind, n);
    }
    println!();

    println!("{}", "Difficulty".blue().bold());
    for (level, n) in &by_difficulty {
        println!("  {:<24} {}", level, n);
    }
    println!();

    let blend = engine.blend_config();
    println!("{}", "Scoring".blue().bold());
    println!("  Mode:                {}", engine.scoring_mode().to_string().cyan());
    println!("  Query encoder:       {}", engine.embedder_name());
    println!("  Alpha:               {}", blend.alpha());
    println!("  Top K:               {}", blend.top_k());

    Ok(())
}
