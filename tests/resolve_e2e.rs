mod common;

use std::sync::Arc;

use common::{fixture_kb, write_fixture, DownOracle, EchoOracle, ScriptedOracle};
use knowlabel::{resolve, tokenize, Analyzer, Benefit, KnowledgeBase, KnowledgeBaseCache, OracleError};

#[test]
fn tokenizes_commas_and_newlines_in_order() {
    assert_eq!(
        tokenize("Water, Glycerin\nParabens"),
        vec!["Water", "Glycerin", "Parabens"]
    );
}

#[test]
fn known_ingredients_match_knowledge_base_exactly() {
    let kb = fixture_kb();
    let oracle = ScriptedOracle::default();

    let result = resolve("water,\n  GLYCERIN , Sodium Lauryl Sulfate\n", &kb, &oracle);

    assert_eq!(
        result.names().collect::<Vec<_>>(),
        vec!["water", "GLYCERIN", "Sodium Lauryl Sulfate"]
    );
    for (name, record) in result.iter() {
        assert_eq!(Some(record), kb.lookup(name));
        assert!(matches!(record.beneficial, Benefit::Beneficial | Benefit::Harmful));
    }
    assert_eq!(
        result.get("Sodium Lauryl Sulfate").unwrap().alternatives,
        vec!["Sodium Cocoyl Isethionate".to_string(), "Decyl Glucoside".to_string()]
    );
    assert!(oracle.prompts().is_empty());
}

#[test]
fn unknown_ingredients_get_model_records() {
    let kb = fixture_kb();
    let oracle = ScriptedOracle::new([Ok("Niacinamide is vitamin B3.".to_string())]);

    let result = resolve("Water, Niacinamide", &kb, &oracle);

    let record = result.get("Niacinamide").unwrap();
    assert_eq!(record.beneficial, Benefit::Unknown);
    assert!(record.alternatives.is_empty());
    assert_eq!(record.description, "Niacinamide is vitamin B3.");
    assert_eq!(
        oracle.prompts(),
        vec!["What can you tell me about the ingredient 'Niacinamide' in cosmetics or skincare?".to_string()]
    );
}

#[test]
fn duplicate_unknown_surface_form_keeps_second_answer() {
    let kb = KnowledgeBase::builder().build();
    let oracle = ScriptedOracle::new([Ok("first".to_string()), Ok("second".to_string())]);

    let result = resolve("Water, Water", &kb, &oracle);

    assert_eq!(result.len(), 1);
    assert_eq!(result.get("Water").unwrap().description, "second");
    assert_eq!(oracle.prompts().len(), 2);
}

#[test]
fn resolving_twice_is_idempotent_with_deterministic_oracle() {
    let kb = fixture_kb();
    let text = "Parabens, Retinol\nHyaluronic Acid, Squalane";
    assert_eq!(resolve(text, &kb, &EchoOracle), resolve(text, &kb, &EchoOracle));
}

#[test]
fn unreachable_model_degrades_to_error_text() {
    let kb = fixture_kb();

    let result = resolve("Glycerin, Bakuchiol, Retinol", &kb, &DownOracle);

    assert_eq!(result.len(), 3);
    assert_eq!(result.get("Glycerin").unwrap().beneficial, Benefit::Beneficial);
    for name in ["Bakuchiol", "Retinol"] {
        let record = result.get(name).unwrap();
        assert_eq!(record.beneficial, Benefit::Unknown);
        assert!(record.description.contains("ollama serve"), "{}", record.description);
    }
}

#[test]
fn each_miss_fails_independently() {
    let kb = fixture_kb();
    let oracle = ScriptedOracle::new([
        Err(OracleError::EmptyResponse),
        Ok("Squalane is an emollient.".to_string()),
        Err(OracleError::status(500, "out of memory")),
    ]);

    let result = resolve("Retinol, Squalane, Bakuchiol", &kb, &oracle);

    assert!(result.get("Retinol").unwrap().description.contains("No response from model"));
    assert_eq!(result.get("Squalane").unwrap().description, "Squalane is an emollient.");
    assert_eq!(
        result.get("Bakuchiol").unwrap().description,
        "API Error: 500 - out of memory"
    );
}

#[test]
fn analyzer_over_cached_knowledge_base() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_fixture(&dir);
    let cache = KnowledgeBaseCache::new(&path);

    let analyzer = Analyzer::new(cache.get().unwrap(), EchoOracle);
    let result = analyzer.analyze("Glycerin, Retinol");

    assert_eq!(result.curated_count(), 1);
    assert!(Arc::ptr_eq(analyzer.knowledge_base(), &cache.get().unwrap()));
    assert!(result
        .get("Retinol")
        .unwrap()
        .description
        .starts_with("about: What can you tell me"));
}

#[test]
fn missing_knowledge_base_is_fatal() {
    let dir = tempfile::tempdir().unwrap();
    let cache = KnowledgeBaseCache::new(dir.path().join("nope.csv"));
    let err = cache.get().unwrap_err();
    assert!(format!("{err}").contains("not found"));
}
