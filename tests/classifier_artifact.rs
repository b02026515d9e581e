use std::fs;
use std::path::{Path, PathBuf};

use serde_json::json;
use tempfile::TempDir;

use campus_faq::analysis::{FeatureEncoder, Vocabulary};
use campus_faq::config::{BackendKind, EngineConfig};
use campus_faq::engine::FaqEngine;
use campus_faq::error::Result;
use campus_faq::intent::{
    ClassifierParameters, ClassifierResolver, IntentResolver, ResolutionSource,
};

const PATTERNS: &[&str] = &[
    "When does the library open?",
    "Library opening hours",
    "Where can I park my car?",
    "Parking permit",
];

/// Writes a single-layer model: library words vote for library_opening,
/// parking words for parking_info.
fn write_model(dir: &Path) -> Result<PathBuf> {
    let vocabulary = Vocabulary::from_patterns(PATTERNS)?;
    let library = ["librari", "open"];
    let parking = ["park", "permit", "car"];

    let row = |words: &[&str]| -> Vec<f64> {
        vocabulary
            .words()
            .iter()
            .map(|w| if words.contains(&w.as_str()) { 1.0 } else { 0.0 })
            .collect()
    };

    let model = json!({
        "all_words": vocabulary.words(),
        "tags": ["library_opening", "parking_info"],
        "input_size": vocabulary.len(),
        "output_size": 2,
        "model_state": {
            "l1.weight": [row(&library), row(&parking)],
            "l1.bias": [0.0, 0.0]
        }
    });

    let path = dir.join("model.json");
    fs::write(&path, serde_json::to_string_pretty(&model)?)?;
    Ok(path)
}

fn classifier_config(dir: &Path, model: PathBuf, threshold: f64) -> EngineConfig {
    let mut config = EngineConfig::default();
    config.backend = BackendKind::Classifier;
    config.model_path = Some(model);
    config.confidence_threshold = threshold;
    config.documents_dir = dir.join("documents");
    config.images_dir = dir.join("images");
    config
}

#[test]
fn vocabulary_matches_training_transform() -> Result<()> {
    let vocabulary = Vocabulary::from_patterns(PATTERNS)?;
    for stem in ["librari", "open", "hour", "park", "permit", "car", "where", "can", "i"] {
        assert!(vocabulary.index_of(stem).is_some(), "missing {stem}");
    }
    assert!(vocabulary.index_of("?").is_none());

    let mut sorted = vocabulary.words().to_vec();
    sorted.sort();
    assert_eq!(sorted, vocabulary.words());
    Ok(())
}

#[test]
fn classifier_answers_confident_questions() -> Result<()> {
    let dir = TempDir::new()?;
    let model = write_model(dir.path())?;
    let engine = FaqEngine::from_config(&classifier_config(dir.path(), model, 0.75))?;

    let result = engine.resolve("Is the library opening soon?");
    assert_eq!(result.intent.as_deref(), Some("library_opening"));
    assert_eq!(result.source, ResolutionSource::Classifier);
    assert!(result.score > 0.75 && result.score < 1.0);

    let result = engine.resolve("Do I need a parking permit for my car?");
    assert_eq!(result.intent.as_deref(), Some("parking_info"));
    Ok(())
}

#[test]
fn low_confidence_goes_to_fallback_not_rules() -> Result<()> {
    let dir = TempDir::new()?;
    let model = write_model(dir.path())?;
    let engine = FaqEngine::from_config(&classifier_config(dir.path(), model, 0.75))?;

    // One library word gives 1/(1+e^-1) ≈ 0.731, under the gate. The rules
    // would match "library" but only stand in when the model is missing.
    let result = engine.resolve("library");
    assert_eq!(result.source, ResolutionSource::Fallback);
    assert!(result.intent.is_none());
    Ok(())
}

#[test]
fn threshold_is_exclusive_end_to_end() -> Result<()> {
    let dir = TempDir::new()?;
    let model = write_model(dir.path())?;
    let question = "library opening";

    let params = ClassifierParameters::from_file(&model)?;
    let features = FeatureEncoder::new()?.encode_text(question, params.vocabulary())?;
    let (_, probability) = params.predict_tag(&features).unwrap();

    let at = FaqEngine::from_config(&classifier_config(dir.path(), model.clone(), probability))?;
    assert_eq!(at.resolve(question).source, ResolutionSource::Fallback);

    let below = FaqEngine::from_config(&classifier_config(
        dir.path(),
        model,
        probability - 1e-7,
    ))?;
    assert_eq!(below.resolve(question).source, ResolutionSource::Classifier);
    Ok(())
}

#[test]
fn inconsistent_artifact_disables_classifier() -> Result<()> {
    let dir = TempDir::new()?;
    let path = dir.path().join("model.json");
    fs::write(
        &path,
        r#"{
            "all_words": ["librari", "open"],
            "tags": ["library_opening"],
            "input_size": 3,
            "output_size": 1,
            "model_state": {"l1.weight": [[1.0, 1.0, 1.0]], "l1.bias": [0.0]}
        }"#,
    )?;

    let resolver = ClassifierResolver::load(&path);
    assert!(!resolver.is_available());

    let engine = FaqEngine::from_config(&classifier_config(dir.path(), path, 0.75))?;
    let result = engine.resolve("What time does the library open?");
    assert_eq!(result.source, ResolutionSource::Rules);
    Ok(())
}
