//! End-to-end tests of the recommendation pipeline over a fixture catalog.

use pathwise_core::prelude::*;
use pathwise_embeddings::PrecomputedEmbedder;
use pathwise_rank::prelude::*;
use std::io::Write;

const DIM: usize = 3;

fn resource(
    title: &str,
    topic: &str,
    content_type: Option<ContentType>,
    difficulty: Option<Difficulty>,
    length: u32,
    rating: f64,
    embedding: [f32; DIM],
) -> Resource {
    Resource {
        title: title.to_string(),
        url: format!("https://example.com/{}", title),
        topic: TopicId::new(topic),
        content_type,
        difficulty,
        length,
        popularity: 500.0,
        rating,
        title_embedding: embedding.to_vec(),
        description_embedding: embedding.to_vec(),
    }
}

fn fixture_resources() -> Vec<Resource> {
    use ContentType::*;
    use Difficulty::*;
    vec![
        resource("py-video-short", "Introduction to Python", Some(Video), Some(Easy), 8, 3.0, [1.0, 0.0, 0.0]),
        resource("py-article", "Introduction to Python", Some(Article), Some(Medium), 60, 4.0, [0.6, 0.8, 0.0]),
        resource("py-video-long", "Introduction to Python", Some(Video), Some(Hard), 45, 5.0, [0.0, 1.0, 0.0]),
        resource("py-extra", "Introduction to Python", Some(Article), Some(Easy), 20, 4.5, [0.0, 0.0, 1.0]),
        resource("ds-article-1", "Data Structures", Some(Article), Some(Easy), 60, 4.0, [0.0, 1.0, 0.0]),
        resource("ds-article-2", "data structures ", Some(Article), Some(Medium), 60, 4.2, [0.0, 0.8, 0.6]),
        resource("oop-mystery", "OOP Concepts", None, None, 15, 3.5, [0.0, 0.0, 1.0]),
        resource("ml-intro", "Introduction to ML", Some(Video), Some(Easy), 9, 4.8, [1.0, 1.0, 0.0]),
        resource("dt-video", "Decision Trees", Some(Video), Some(Medium), 30, 4.1, [0.0, 1.0, 1.0]),
        resource("nn-video", "Neural Networks", Some(Video), Some(Hard), 55, 4.9, [1.0, 0.0, 1.0]),
    ]
}

fn query_embedder() -> PrecomputedEmbedder {
    let entries: [(&str, [f32; DIM]); 7] = [
        ("Introduction to Python tutorial", [1.0, 0.0, 0.0]),
        ("Data Structures tutorial", [0.0, 1.0, 0.0]),
        ("OOP Concepts tutorial", [0.0, 0.0, 1.0]),
        ("Introduction to ML tutorial", [1.0, 1.0, 0.0]),
        ("Linear Regression tutorial", [1.0, 0.0, 1.0]),
        ("Decision Trees tutorial", [0.0, 1.0, 1.0]),
        ("Neural Networks tutorial", [1.0, 1.0, 1.0]),
    ];
    PrecomputedEmbedder::from_entries(
        "fixture",
        entries.iter().map(|(k, v)| (k.to_string(), v.to_vec())),
    )
    .unwrap()
}

fn build_engine(ranker: Option<Box<dyn Ranker>>, top_k: usize) -> PathEngine {
    let graph = TopicGraph::default_curriculum();
    let catalog = ResourceCatalog::from_resources(fixture_resources(), &graph);
    PathEngine::new(
        graph,
        catalog,
        Box::new(query_embedder()),
        ranker,
        SemanticScorer::default(),
        BlendConfig::new(0.5, top_k).unwrap(),
    )
    .unwrap()
}

fn titles(step: &Step) -> Vec<&str> {
    step.recommended_resources
        .iter()
        .map(|r| r.title.as_str())
        .collect()
}

#[test]
fn python_to_decision_trees_path() {
    let engine = build_engine(None, 3);
    let path = engine
        .recommend("Introduction to Python", "Decision Trees", &Preferences::default())
        .unwrap();

    assert_eq!(
        path.topics(),
        vec![
            "Introduction to Python",
            "Data Structures",
            "OOP Concepts",
            "Introduction to ML",
            "Decision Trees",
        ]
    );
}

#[test]
fn backwards_request_has_no_path() {
    let engine = build_engine(None, 3);
    let err = engine
        .recommend("Neural Networks", "Introduction to Python", &Preferences::default())
        .unwrap_err();
    assert_eq!(
        err,
        PathwiseError::no_path("Neural Networks", "Introduction to Python")
    );
    assert!(err.is_not_found());
}

#[test]
fn unknown_goal_topic() {
    let engine = build_engine(None, 3);
    let err = engine
        .recommend("Introduction to Python", "Quantum Computing", &Preferences::default())
        .unwrap_err();
    assert_eq!(err, PathwiseError::unknown_topic("Quantum Computing"));
    assert_eq!(err.to_string(), "Topic not found: Quantum Computing");
}

#[test]
fn filtered_out_step_is_empty_not_an_error() {
    let engine = build_engine(None, 3);
    let prefs = Preferences::default()
        .with_type(Choice::parse("video"))
        .with_max_length(Some(10));

    let path = engine
        .recommend("Introduction to Python", "Data Structures", &prefs)
        .unwrap();

    assert_eq!(path.steps.len(), 2);
    assert_eq!(titles(&path.steps[0]), vec!["py-video-short"]);
    assert_eq!(path.steps[1].topic, "Data Structures");
    assert!(path.steps[1].recommended_resources.is_empty());
}

#[test]
fn ranks_by_similarity_and_truncates() {
    let engine = build_engine(None, 3);
    let path = engine
        .recommend("Introduction to Python", "Introduction to Python", &Preferences::default())
        .unwrap();

    assert_eq!(path.steps.len(), 1);
    // py-video-long and py-extra tie at 0.0; catalog order wins.
    assert_eq!(
        titles(&path.steps[0]),
        vec!["py-video-short", "py-article", "py-video-long"]
    );

    let scores: Vec<f64> = path.steps[0]
        .recommended_resources
        .iter()
        .map(|r| r.final_score)
        .collect();
    assert!((scores[0] - 1.0).abs() < 1e-6);
    assert!((scores[1] - 0.6).abs() < 1e-6);
    assert!(scores.windows(2).all(|w| w[0] >= w[1]));
}

#[test]
fn larger_top_k_policy() {
    let engine = build_engine(None, 20);
    let path = engine
        .recommend("introduction to python", "introduction to python", &Preferences::default())
        .unwrap();
    assert_eq!(path.steps[0].recommended_resources.len(), 4);
}

#[test]
fn topic_names_are_normalized() {
    let engine = build_engine(None, 3);
    let path = engine
        .recommend("  introduction TO python ", "data structures", &Preferences::default())
        .unwrap();
    assert_eq!(path.topics(), vec!["Introduction to Python", "Data Structures"]);
    // "data structures " in the fixture lands on the same topic.
    assert_eq!(path.steps[1].recommended_resources.len(), 2);
}

#[test]
fn identical_requests_give_identical_paths() {
    let engine = build_engine(None, 3);
    let prefs = Preferences::default().with_max_length(Some(50));
    let first = engine.recommend("Introduction to Python", "Neural Networks", &prefs).unwrap();
    let second = engine.recommend("Introduction to Python", "Neural Networks", &prefs).unwrap();
    assert_eq!(first, second);
}

#[test]
fn semantic_only_final_equals_semantic() {
    let engine = build_engine(None, 20);
    assert_eq!(engine.scoring_mode(), ScoringMode::SemanticOnly);

    let path = engine
        .recommend("Introduction to Python", "Decision Trees", &Preferences::default())
        .unwrap();
    for step in &path.steps {
        for r in &step.recommended_resources {
            assert_eq!(r.final_score, r.semantic_score);
            assert!(r.ml_score.is_none());
        }
    }
}

#[test]
fn learned_ranker_blends_scores() {
    // Relevance driven by rating alone.
    let model = RegressionModel::Linear {
        coefficients: vec![0.0, 0.0, 0.0, 0.0, 1.0],
        intercept: -4.0,
    };
    let engine = build_engine(Some(Box::new(model)), 4);
    assert_eq!(engine.scoring_mode(), ScoringMode::Blended);

    let path = engine
        .recommend("Introduction to Python", "Introduction to Python", &Preferences::default())
        .unwrap();
    let step = &path.steps[0];

    for r in &step.recommended_resources {
        let ml = r.ml_score.unwrap();
        assert!((r.final_score - (0.5 * ml + 0.5 * r.semantic_score)).abs() < 1e-12);
    }
    // py-video-long: 0.5 * 1.0 + 0.5 * 0.0 beats py-article: 0.5 * 0.0 + 0.5 * 0.6.
    assert_eq!(
        titles(step),
        vec!["py-video-long", "py-article", "py-extra", "py-video-short"]
    );
}

#[test]
fn ranker_loaded_from_disk() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    write!(
        file,
        r#"{{"kind": "tree_ensemble", "aggregation": "mean",
            "trees": [{{"nodes": [{{"feature": 0, "threshold": 10.0, "left": 1, "right": 2}},
                                 {{"value": 1.0}}, {{"value": 0.0}}]}}]}}"#
    )
    .unwrap();

    let model = RegressionModel::from_json_file(file.path()).unwrap();
    let engine = build_engine(Some(Box::new(model)), 1);
    let prefs = Preferences::default().with_difficulty(Choice::parse("easy"));

    let path = engine
        .recommend("Introduction to Python", "Introduction to Python", &prefs)
        .unwrap();
    let top = &path.steps[0].recommended_resources[0];
    assert_eq!(top.title, "py-video-short");
    assert_eq!(top.ml_score, Some(1.0));
}

#[test]
fn unmapped_categoricals_only_match_any() {
    let engine = build_engine(None, 3);

    let any = engine
        .recommend("OOP Concepts", "OOP Concepts", &Preferences::default())
        .unwrap();
    assert_eq!(titles(&any.steps[0]), vec!["oop-mystery"]);

    let specific = Preferences::default().with_difficulty(Choice::parse("easy"));
    let filtered = engine.recommend("OOP Concepts", "OOP Concepts", &specific).unwrap();
    assert!(filtered.steps[0].recommended_resources.is_empty());
}

#[test]
fn unrecognized_preference_is_an_empty_result() {
    let engine = build_engine(None, 3);
    let prefs = Preferences::default().with_type(Choice::parse("podcast"));
    let path = engine
        .recommend("Introduction to Python", "OOP Concepts", &prefs)
        .unwrap();
    assert_eq!(path.steps.len(), 3);
    assert!(path.steps.iter().all(|s| s.recommended_resources.is_empty()));
}

#[test]
fn learning_path_serializes_to_wire_shape() {
    let engine = build_engine(None, 1);
    let path = engine
        .recommend("Introduction to Python", "Introduction to Python", &Preferences::default())
        .unwrap();
    let json = serde_json::to_value(&path).unwrap();

    let step = &json["learning_path"][0];
    assert_eq!(step["topic"], "Introduction to Python");
    let r = &step["recommended_resources"][0];
    assert_eq!(r["title"], "py-video-short");
    assert_eq!(r["type"], "video");
    assert_eq!(r["difficulty"], "easy");
    assert_eq!(r["length"], 8);
    assert!(r.get("ml_score").is_none());
}

#[test]
fn catalog_search_uses_known_query_vectors() {
    let engine = build_engine(None, 3);
    let results = engine.search("Data Structures tutorial", 2).unwrap();
    assert_eq!(results.len(), 2);
    assert!(results[0].semantic_score >= results[1].semantic_score);
    assert!((results[0].semantic_score - 1.0).abs() < 1e-6);

    assert!(matches!(
        engine.search("something never embedded", 2),
        Err(PathwiseError::Embedding(_))
    ));
}
