//! Integration tests for ConditionEngine
//!
//! Exercises the engine the way campaign upload and response submission
//! use it: validating sentences and surveys, then deciding which items are
//! displayed for a set of responses.

use ohmage_sdk::*;
use std::collections::HashSet;
use std::io::Write;
use std::sync::Arc;
use std::thread;

fn bindings(pairs: &[(&str, Literal)]) -> Bindings {
    pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.clone()))
        .collect()
}

fn prompts(ids: &[&str]) -> HashSet<String> {
    ids.iter().map(|id| id.to_string()).collect()
}

const SURVEY_YAML: &str = r#"
survey:
  id: daily
  title: Daily check-in
  items:
    - id: mood
      text: How is your mood (1-5)?
    - id: slept_well
      text: Did you sleep well?
    - id: mood_reason
      text: What is bringing your mood down?
      condition: "[mood] <= 2"
    - id: sleep_hours
      text: How many hours did you sleep?
      condition: "[slept_well] == \"no\" or [mood] < 3"
"#;

// =============================================================================
// Sentence Validation
// =============================================================================

#[test]
fn test_validate_returns_grouping_map() {
    let engine = ConditionEngineBuilder::new().build().unwrap();
    let map = engine.validate("[q1] >= 1 and [q1] <= 5").unwrap();

    assert_eq!(
        map["q1"],
        vec![
            ConditionValuePair::new(ohmage_core::OperatorKind::Ge, 1_i64),
            ConditionValuePair::new(ohmage_core::OperatorKind::Le, 5_i64),
        ]
    );
}

#[test]
fn test_validate_reports_position() {
    let engine = ConditionEngineBuilder::new().build().unwrap();
    let err = engine.validate("[q1] >= ").unwrap_err();

    assert!(matches!(err, SdkError::InvalidCondition { .. }));
    assert_eq!(err.position(), Some(8));
    assert!(err.to_string().contains("[q1] >= "));
}

#[test]
fn test_validate_against_prompt_universe() {
    let engine = ConditionEngineBuilder::new().build().unwrap();
    let declared = prompts(&["q1", "q2"]);

    assert!(engine
        .validate_against("[q1] == 1 or [q2] == \"yes\"", &declared)
        .is_ok());

    let err = engine
        .validate_against("[q1] == 1 and [q7] == 2", &declared)
        .unwrap_err();
    assert!(matches!(err, SdkError::UnknownPrompt { ref identifier, .. } if identifier == "q7"));
}

// =============================================================================
// Evaluation
// =============================================================================

#[test]
fn test_evaluate_and_trace() {
    let engine = ConditionEngineBuilder::new().build().unwrap();
    let b = bindings(&[("q2", Literal::text("yes"))]);

    assert!(engine.evaluate("[q2] == \"yes\"", &b).unwrap());

    let (result, trace) = engine.evaluate_with_trace("[q2] != \"yes\"", &b).unwrap();
    assert!(!result);
    assert_eq!(trace.actual, Some(Literal::text("yes")));
}

#[test]
fn test_evaluate_missing_binding_is_error() {
    let engine = ConditionEngineBuilder::new().build().unwrap();
    let err = engine.evaluate("[q3] == 1", &Bindings::new()).unwrap_err();
    assert!(err.to_string().contains("q3"));
}

#[test]
fn test_depth_limit_from_config() {
    let engine = ConditionEngineBuilder::new().with_max_depth(2).build().unwrap();
    assert!(engine.validate("([a] == 1)").is_ok());

    let err = engine.validate("((([a] == 1)))").unwrap_err();
    assert!(err.to_string().contains("Nesting depth exceeds maximum of 2"));
}

// =============================================================================
// Surveys
// =============================================================================

#[test]
fn test_load_and_validate_survey_file() -> anyhow::Result<()> {
    let mut file = tempfile::NamedTempFile::new()?;
    file.write_all(SURVEY_YAML.as_bytes())?;

    let engine = ConditionEngineBuilder::new().build()?;
    let survey = engine.load_survey(file.path())?;
    assert_eq!(survey.items.len(), 4);

    let validation = engine.validate_survey(&survey)?;
    assert_eq!(validation.survey_id, "daily");
    assert_eq!(
        validation.conditioned_items().collect::<Vec<_>>(),
        vec!["mood_reason", "sleep_hours"]
    );
    assert_eq!(validation.conditions["sleep_hours"].len(), 2);
    Ok(())
}

#[test]
fn test_load_survey_missing_file() {
    let engine = ConditionEngineBuilder::new().build().unwrap();
    let err = engine.load_survey("/nonexistent/survey.yaml").unwrap_err();
    assert!(matches!(err, SdkError::IoError(_)));
}

#[test]
fn test_displayed_items() -> anyhow::Result<()> {
    let engine = ConditionEngineBuilder::new().build()?;
    let survey = ohmage_parser::SurveyParser::parse(SURVEY_YAML)?;

    let good_day = bindings(&[
        ("mood", Literal::numeric(4.0)),
        ("slept_well", Literal::text("yes")),
    ]);
    assert_eq!(
        engine.displayed_items(&survey, &good_day)?,
        vec!["mood", "slept_well"]
    );

    let bad_day = bindings(&[
        ("mood", Literal::numeric(1.0)),
        ("slept_well", Literal::text("no")),
    ]);
    assert_eq!(
        engine.displayed_items(&survey, &bad_day)?,
        vec!["mood", "slept_well", "mood_reason", "sleep_hours"]
    );
    Ok(())
}

#[test]
fn test_displayed_items_with_hide_policy() -> anyhow::Result<()> {
    let engine = ConditionEngineBuilder::new()
        .missing_binding_policy(MissingBindingPolicy::Hide)
        .build()?;
    let survey = ohmage_parser::SurveyParser::parse(SURVEY_YAML)?;

    // slept_well was skipped, so sleep_hours cannot be decided and stays hidden
    let partial = bindings(&[("mood", Literal::numeric(3.0))]);
    assert_eq!(engine.displayed_items(&survey, &partial)?, vec!["mood", "slept_well"]);
    Ok(())
}

// =============================================================================
// Concurrency
// =============================================================================

#[test]
fn test_shared_engine_matches_sequential() {
    let engine = Arc::new(ConditionEngineBuilder::new().build().unwrap());

    let cases: Vec<(String, Bindings)> = (0..1_000)
        .map(|i| {
            let sentence = format!("[a] >= {} and [b] != \"{}\" or [a] == {}", i % 50, i % 4, i);
            let b = bindings(&[
                ("a", Literal::numeric((i % 60) as f64)),
                ("b", Literal::text((i % 3).to_string())),
            ]);
            (sentence, b)
        })
        .collect();

    let sequential: Vec<bool> = cases
        .iter()
        .map(|(s, b)| engine.evaluate(s, b).unwrap())
        .collect();

    engine.clear_cache();

    let concurrent: Vec<bool> = thread::scope(|scope| {
        let handles: Vec<_> = cases
            .chunks(40)
            .map(|chunk| {
                let engine = Arc::clone(&engine);
                scope.spawn(move || {
                    chunk
                        .iter()
                        .map(|(s, b)| engine.evaluate(s, b).unwrap())
                        .collect::<Vec<_>>()
                })
            })
            .collect();

        handles
            .into_iter()
            .flat_map(|h| h.join().expect("engine thread panicked"))
            .collect()
    });

    assert_eq!(sequential, concurrent);
    assert_eq!(engine.cached_len(), 1_000);
}
