// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! End-to-end integration tests
//!
//! These tests verify complete workflows from configuration loading through
//! capability resolution to a rendered analysis report.

use anyhow::Result;
use lifestyle_advisor::capabilities::Capabilities;
use lifestyle_advisor::config::{AppConfig, LifestyleConfig};
use lifestyle_advisor::intelligence::{
    LifestyleAnalyzer, PredictionOutcome, RecommendationEngine, SuggestionOutcome,
};
use lifestyle_advisor::models::{AiSuggestions, BodyInput, ExerciseType, InputError, MetricsInput};
use lifestyle_advisor::render;
use mockito::Server;
use serde_json::json;
use std::collections::HashMap;
use std::path::Path;
use tempfile::TempDir;

const ENDPOINT: &str = "/v1beta/models/gemini-2.5-flash:generateContent";

/// Helper to write a model artifact mirroring the heuristic formula
async fn create_model_file(dir: &Path) -> Result<String> {
    let path = dir.join("lifestyle_model.json");
    let artifact = json!({
        "model_type": "linear_regression",
        "feature_names": ["bmi", "water_liters", "workout_days_per_week", "exercise_code", "meals_per_day"],
        "coefficients": [0.1, 1.0, 0.5, 0.0, 0.8],
        "intercept": 0.0
    });
    tokio::fs::write(&path, artifact.to_string()).await?;
    Ok(path.to_string_lossy().to_string())
}

fn config_from(vars: &[(&str, String)]) -> Result<AppConfig> {
    let vars: HashMap<String, String> = vars
        .iter()
        .map(|(k, v)| (k.to_string(), v.clone()))
        .collect();
    AppConfig::from_lookup(|key| vars.get(key).cloned())
}

fn default_input() -> MetricsInput {
    MetricsInput {
        body: BodyInput::Measurements {
            weight_kg: 70.0,
            height_cm: 175.0,
        },
        water_liters: 1.0,
        workout_days_per_week: 1,
        exercise_type: ExerciseType::Cardio,
        meals_per_day: 2,
    }
}

#[tokio::test]
async fn test_complete_analysis_workflow() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let model_path = create_model_file(temp_dir.path()).await?;

    let mut server = Server::new_async().await;
    let mock = server
        .mock("POST", ENDPOINT)
        .match_header("x-goog-api-key", "test-key")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(
            json!({
                "candidates": [{
                    "content": { "parts": [{ "text": "- drink water\n- 10 min workout\n" }] },
                    "finishReason": "STOP"
                }]
            })
            .to_string(),
        )
        .create_async()
        .await;

    let config = config_from(&[
        ("LIFESTYLE_MODEL_PATH", model_path),
        ("GEMINI_API_KEY", "test-key".to_string()),
        ("GEMINI_API_BASE", server.url()),
    ])?;
    let capabilities = Capabilities::resolve(&config)?;
    assert!(capabilities.prediction.is_available());
    assert!(capabilities.suggestions.is_available());

    let analyzer = LifestyleAnalyzer::new(&capabilities, RecommendationEngine::new());
    let report = analyzer.analyze(&default_input()).await?;

    // 70 kg / 1.75 m² with the heuristic-shaped model
    let score = report.prediction.score().expect("prediction");
    assert!((score - 5.3857).abs() < 1e-3);
    assert_eq!(report.recommendations.heuristic_score, 5.39);
    assert_eq!(report.recommendations.recommendations.len(), 5);

    let Some(AiSuggestions::SearchQueries(items)) = report.suggestions.suggestions() else {
        panic!("expected search queries");
    };
    assert_eq!(items.len(), 2);

    let text = render::render_report(&report);
    assert!(text.contains("Predicted lifestyle score: 5.39"));
    assert!(text.contains("- [drink water](https://www.youtube.com/results?search_query=drink+water)"));
    assert!(render::render_warnings(&capabilities).is_empty());

    mock.assert_async().await;
    Ok(())
}

#[tokio::test]
async fn test_missing_model_and_key_degrade() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let mut server = Server::new_async().await;
    let mock = server.mock("POST", ENDPOINT).expect(0).create_async().await;

    let config = config_from(&[
        (
            "LIFESTYLE_MODEL_PATH",
            temp_dir.path().join("missing.json").to_string_lossy().to_string(),
        ),
        ("GEMINI_API_BASE", server.url()),
    ])?;
    let capabilities = Capabilities::resolve(&config)?;

    let analyzer = LifestyleAnalyzer::new(&capabilities, RecommendationEngine::new());
    let report = analyzer.analyze(&default_input()).await?;

    assert!(matches!(report.prediction, PredictionOutcome::Unavailable { .. }));
    assert!(matches!(report.suggestions, SuggestionOutcome::Unavailable { .. }));
    assert_eq!(report.recommendations.recommendations.len(), 5);

    let warnings = render::render_warnings(&capabilities);
    assert!(warnings.contains("not found"));
    assert!(warnings.contains("GEMINI_API_KEY not found"));

    // No request may reach the service without a key
    mock.assert_async().await;
    Ok(())
}

#[tokio::test]
async fn test_required_model_is_fatal() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let mut config = config_from(&[(
        "LIFESTYLE_MODEL_PATH",
        temp_dir.path().join("missing.json").to_string_lossy().to_string(),
    )])?;
    config.model.required = true;

    assert!(Capabilities::resolve(&config).is_err());
    Ok(())
}

#[tokio::test]
async fn test_corrupt_model_degrades() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let path = temp_dir.path().join("lifestyle_model.json");
    tokio::fs::write(&path, r#"{"model_type": "random_forest"}"#).await?;

    let mut config = config_from(&[("LIFESTYLE_MODEL_PATH", path.to_string_lossy().to_string())])?;
    config.ai.enabled = false;
    let capabilities = Capabilities::resolve(&config)?;

    assert!(!capabilities.prediction.is_available());
    assert!(!capabilities.suggestions.is_available());
    Ok(())
}

#[tokio::test]
async fn test_custom_thresholds_and_direct_bmi() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let config_path = temp_dir.path().join("lifestyle_config.toml");
    tokio::fs::write(
        &config_path,
        "[thresholds]\nmin_water_liters = 1.0\nmin_meals_per_day = 2\n",
    )
    .await?;

    let lifestyle = LifestyleConfig::load(Some(&config_path))?;
    let mut config = config_from(&[(
        "LIFESTYLE_MODEL_PATH",
        temp_dir.path().join("missing.json").to_string_lossy().to_string(),
    )])?;
    config.ai.enabled = false;
    let capabilities = Capabilities::resolve(&config)?;
    let analyzer = LifestyleAnalyzer::new(&capabilities, RecommendationEngine::with_config(lifestyle));

    let input = MetricsInput {
        body: BodyInput::DirectBmi(22.5),
        ..default_input()
    };
    let report = analyzer.analyze(&input).await?;

    let messages: Vec<&str> = report.recommendations.messages().collect();
    // Water and meals now meet the relaxed thresholds
    assert!(messages.iter().any(|m| m.contains("Good hydration")));
    assert!(!messages.iter().any(|m| m.contains("meals/day")));
    assert_eq!(report.recommendations.heuristic_score, 5.35);
    assert!(report.metrics.weight_kg.is_none());
    Ok(())
}

#[tokio::test]
async fn test_invalid_input_blocks_analysis() -> Result<()> {
    let capabilities = Capabilities::new(
        lifestyle_advisor::capabilities::Capability::unavailable("off"),
        lifestyle_advisor::capabilities::Capability::unavailable("off"),
    );
    let analyzer = LifestyleAnalyzer::new(&capabilities, RecommendationEngine::new());

    let zero_height = MetricsInput {
        body: BodyInput::Measurements {
            weight_kg: 70.0,
            height_cm: 0.0,
        },
        ..default_input()
    };
    let err = analyzer.analyze(&zero_height).await.unwrap_err();
    assert_eq!(err, InputError::BmiNotComputable);

    let too_many_meals = MetricsInput {
        meals_per_day: 9,
        ..default_input()
    };
    let err = analyzer.analyze(&too_many_meals).await.unwrap_err();
    assert!(matches!(err, InputError::OutOfRange { field: "meals_per_day", .. }));
    Ok(())
}
