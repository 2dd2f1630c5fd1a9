//! Build a learning path.

use anyhow::Result;
use colored::Colorize;
use pathwise::prelude::*;
use std::path::Path;

use super::load_config;

pub fn preferences(preferred_type: &str, difficulty: &str, max_length: Option<i64>) -> Preferences {
    Preferences::default()
        .with_type(Choice::parse(preferred_type))
        .with_difficulty(Choice::parse(difficulty))
        .with_max_length(max_length)
}

pub fn run(
    config: Option<&Path>,
    known: &str,
    goal: &str,
    prefs: &Preferences,
    top_k: Option<usize>,
    json: bool,
) -> Result<()> {
    let mut config = load_config(config)?;
    if let Some(top_k) = top_k {
        config.ranking.top_k = top_k;
    }
    let engine = build_engine(&config)?;

    let path = engine.recommend(known, goal, prefs)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&path)?);
        return Ok(());
    }

    println!(
        "{} Learning path from {} to {} ({} steps):",
        "→".blue(),
        known.cyan().bold(),
        goal.cyan().bold(),
        path.steps.len()
    );
    println!();

    for (i, step) in path.steps.iter().enumerate() {
        println!("{} {}", format!("{}.", i + 1).blue(), step.topic.white().bold());

        if step.recommended_resources.is_empty() {
            println!("    {} No resources match your preferences", "•".yellow());
            continue;
        }

        for r in &step.recommended_resources {
            let kind = r.content_type.map_or("?", |t| t.as_str());
            let level = r.difficulty.map_or("?", |d| d.as_str());
            println!(
                "    {} {}",
                r.title,
                format!("({:.3})", r.final_score).dimmed()
            );
            println!(
                "      {} · {} · {} min  {}",
                kind,
                level,
                r.length,
                r.url.dimmed()
            );
        }
    }

    println!();
    println!("{} Scoring: {}", "✓".green(), engine.scoring_mode().to_string().cyan());

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flags_become_preferences() {
        let prefs = preferences("Video", "any", Some(10));
        assert_eq!(prefs.preferred_type, Choice::Only(ContentType::Video));
        assert_eq!(prefs.difficulty, Choice::Any);
        assert_eq!(prefs.max_length, Some(10));

        let unknown = preferences("podcast", "expert", None);
        assert!(matches!(unknown.preferred_type, Choice::Unrecognized(_)));
        assert!(matches!(unknown.difficulty, Choice::Unrecognized(_)));
    }
}
