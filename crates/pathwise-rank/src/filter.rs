//! Preference filtering.
//!
//! Predicates are independent and conjunctive. An unrecognized preference
//! value is an impossible filter, and an empty result is a normal outcome.

use pathwise_core::types::{Preferences, Resource};

/// Whether a single resource satisfies every preference.
pub fn matches(resource: &Resource, prefs: &Preferences) -> bool {
    prefs.preferred_type.matches(resource.content_type)
        && prefs.difficulty.matches(resource.difficulty)
        && prefs
            .max_length
            .map_or(true, |max| i64::from(resource.length) <= max)
}

/// Narrow a topic's resources to those matching `prefs`, preserving order.
pub fn filter<'a>(resources: &[&'a Resource], prefs: &Preferences) -> Vec<&'a Resource> {
    resources
        .iter()
        .copied()
        .filter(|r| matches(r, prefs))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pathwise_core::types::{Choice, ContentType, Difficulty, TopicId};

    fn resource(
        title: &str,
        content_type: Option<ContentType>,
        difficulty: Option<Difficulty>,
        length: u32,
    ) -> Resource {
        Resource {
            title: title.to_string(),
            url: format!("https://example.com/{}", title),
            topic: TopicId::new("Data Structures"),
            content_type,
            difficulty,
            length,
            popularity: 0.0,
            rating: 0.0,
            title_embedding: vec![1.0, 0.0],
            description_embedding: vec![1.0, 0.0],
        }
    }

    fn pool() -> Vec<Resource> {
        vec![
            resource("a", Some(ContentType::Video), Some(Difficulty::Easy), 8),
            resource("b", Some(ContentType::Article), Some(Difficulty::Medium), 60),
            resource("c", Some(ContentType::Video), Some(Difficulty::Hard), 45),
            resource("d", None, Some(Difficulty::Easy), 5),
            resource("e", Some(ContentType::Video), None, 30),
        ]
    }

    fn titles(rs: &[&Resource]) -> Vec<String> {
        rs.iter().map(|r| r.title.clone()).collect()
    }

    #[test]
    fn any_preferences_keep_everything() {
        let pool = pool();
        let refs: Vec<&Resource> = pool.iter().collect();
        assert_eq!(filter(&refs, &Preferences::default()).len(), 5);
    }

    #[test]
    fn predicates_are_conjunctive() {
        let pool = pool();
        let refs: Vec<&Resource> = pool.iter().collect();
        let prefs = Preferences::default()
            .with_type(Choice::Only(ContentType::Video))
            .with_max_length(Some(30));
        assert_eq!(titles(&filter(&refs, &prefs)), vec!["a", "e"]);
    }

    #[test]
    fn length_bound_is_inclusive() {
        let pool = pool();
        let refs: Vec<&Resource> = pool.iter().collect();
        let prefs = Preferences::default().with_max_length(Some(45));
        assert_eq!(titles(&filter(&refs, &prefs)), vec!["a", "c", "d", "e"]);
    }

    #[test]
    fn unrecognized_values_match_nothing() {
        let pool = pool();
        let refs: Vec<&Resource> = pool.iter().collect();
        let prefs = Preferences::default().with_type(Choice::parse("podcast"));
        assert!(filter(&refs, &prefs).is_empty());

        let prefs = Preferences::default().with_difficulty(Choice::parse("expert"));
        assert!(filter(&refs, &prefs).is_empty());
    }

    #[test]
    fn non_positive_max_length_matches_nothing() {
        let pool = pool();
        let refs: Vec<&Resource> = pool.iter().collect();
        assert!(filter(&refs, &Preferences::default().with_max_length(Some(0))).is_empty());
        assert!(filter(&refs, &Preferences::default().with_max_length(Some(-5))).is_empty());
    }

    #[test]
    fn unmapped_fields_fail_specific_filters() {
        let pool = pool();
        let refs: Vec<&Resource> = pool.iter().collect();
        let easy = Preferences::default().with_difficulty(Choice::Only(Difficulty::Easy));
        assert_eq!(titles(&filter(&refs, &easy)), vec!["a", "d"]);

        let video = Preferences::default().with_type(Choice::Only(ContentType::Video));
        assert_eq!(titles(&filter(&refs, &video)), vec!["a", "c", "e"]);
    }

    #[test]
    fn tightening_never_grows_the_set() {
        let pool = pool();
        let refs: Vec<&Resource> = pool.iter().collect();

        let types = [
            Choice::Any,
            Choice::Only(ContentType::Video),
            Choice::Only(ContentType::Article),
        ];
        let difficulties = [
            Choice::Any,
            Choice::Only(Difficulty::Easy),
            Choice::Only(Difficulty::Medium),
            Choice::Only(Difficulty::Hard),
        ];
        let lengths = [None, Some(60), Some(45), Some(30), Some(10), Some(1)];

        for t in &types {
            for d in &difficulties {
                let mut previous = usize::MAX;
                for l in &lengths {
                    let prefs = Preferences::default()
                        .with_type(t.clone())
                        .with_difficulty(d.clone())
                        .with_max_length(*l);
                    let loose = Preferences::default().with_max_length(*l);
                    let n = filter(&refs, &prefs).len();
                    assert!(n <= previous, "lowering max_length grew the set");
                    assert!(n <= filter(&refs, &loose).len(), "fixing a field grew the set");
                    previous = n;
                }
            }
        }
    }
}
