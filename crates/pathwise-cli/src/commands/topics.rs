//! List curated topics.

use anyhow::Result;
use colored::Colorize;
use pathwise::context::load_graph;
use std::path::Path;

use super::load_config;

pub fn run(config: Option<&Path>, known: Option<&str>) -> Result<()> {
    let config = load_config(config)?;
    let graph = load_graph(&config)?;

    let topics: Vec<String> = match known {
        Some(known) => {
            let reachable = graph.reachable_from(known)?;
            println!(
                "{} Goals reachable from {}:",
                "→".blue(),
                known.trim().cyan().bold()
            );
            reachable.into_iter().map(|t| t.label.clone()).collect()
        }
        None => {
            println!("{} Topics:", "→".blue());
            graph.topics().map(|t| t.label.clone()).collect()
        }
    };

    for topic in &topics {
        let prerequisites: Vec<&str> = graph
            .prerequisites()
            .into_iter()
            .filter(|(_, after)| &after.label == topic)
            .map(|(before, _)| before.label.as_str())
            .collect();
        if prerequisites.is_empty() {
            println!("  {}", topic.white().bold());
        } else {
            println!(
                "  {} {}",
                topic.white().bold(),
                format!("(after {})", prerequisites.join(", ")).dimmed()
            );
        }
    }

    println!();
    println!("{} {} topics", "✓".green(), topics.len().to_string().cyan());
    Ok(())
}
