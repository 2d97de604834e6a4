//! Command-line commands

use anyhow::{anyhow, bail, Context, Result};
use ohmage_sdk::{Bindings, ConditionEngine};
use serde_json::json;
use std::collections::HashSet;
use std::path::PathBuf;

pub const USAGE: &str = "\
Usage:
  ohmage-condition validate <sentence> [--prompts id1,id2,...]
  ohmage-condition evaluate <sentence> <bindings-json> [--trace]
  ohmage-condition survey <survey.yaml> [<bindings-json>]

Examples:
  ohmage-condition validate '[q1] >= 1 and [q1] <= 5'
  ohmage-condition evaluate '[q2] == \"yes\"' '{\"q2\": \"yes\"}'";

/// A parsed command line
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    /// Parse a sentence and print its grouping map
    Validate {
        sentence: String,
        prompts: Option<Vec<String>>,
    },
    /// Evaluate a sentence against JSON bindings
    Evaluate {
        sentence: String,
        bindings: String,
        trace: bool,
    },
    /// Validate a survey file, optionally listing displayed items
    Survey {
        path: PathBuf,
        bindings: Option<String>,
    },
    Help,
}

impl Command {
    /// Parse arguments (without the program name)
    pub fn parse_args<I>(args: I) -> Result<Self>
    where
        I: IntoIterator<Item = String>,
    {
        let mut args = args.into_iter();
        let Some(name) = args.next() else {
            return Ok(Command::Help);
        };
        let rest: Vec<String> = args.collect();

        match name.as_str() {
            "validate" => {
                let (positional, flags) = split_flags(&rest)?;
                let [sentence] = positional.as_slice() else {
                    bail!("validate expects exactly one sentence\n\n{}", USAGE);
                };
                let prompts = match flags.iter().find(|(flag, _)| flag == "--prompts") {
                    Some((_, Some(list))) => Some(
                        list.split(',')
                            .map(|id| id.trim().to_string())
                            .filter(|id| !id.is_empty())
                            .collect(),
                    ),
                    Some((_, None)) => bail!("--prompts needs a comma-separated list"),
                    None => None,
                };
                Ok(Command::Validate {
                    sentence: sentence.clone(),
                    prompts,
                })
            }
            "evaluate" => {
                let (positional, flags) = split_flags(&rest)?;
                let [sentence, bindings] = positional.as_slice() else {
                    bail!("evaluate expects a sentence and a bindings object\n\n{}", USAGE);
                };
                Ok(Command::Evaluate {
                    sentence: sentence.clone(),
                    bindings: bindings.clone(),
                    trace: flags.iter().any(|(flag, _)| flag == "--trace"),
                })
            }
            "survey" => match rest.as_slice() {
                [path] => Ok(Command::Survey {
                    path: PathBuf::from(path),
                    bindings: None,
                }),
                [path, bindings] => Ok(Command::Survey {
                    path: PathBuf::from(path),
                    bindings: Some(bindings.clone()),
                }),
                _ => bail!("survey expects a file and optional bindings\n\n{}", USAGE),
            },
            "help" | "--help" | "-h" => Ok(Command::Help),
            other => Err(anyhow!("Unknown command '{}'\n\n{}", other, USAGE)),
        }
    }

    /// Run the command and return its output
    pub fn run(&self, engine: &ConditionEngine) -> Result<String> {
        let output = match self {
            Command::Validate { sentence, prompts } => {
                let map = match prompts {
                    Some(ids) => {
                        let declared: HashSet<String> = ids.iter().cloned().collect();
                        engine.validate_against(sentence, &declared)?
                    }
                    None => engine.validate(sentence)?,
                };
                tracing::info!("Condition is well formed: {}", sentence);
                serde_json::to_string_pretty(&map)?
            }
            Command::Evaluate {
                sentence,
                bindings,
                trace,
            } => {
                let bindings = parse_bindings(bindings)?;
                if *trace {
                    let (result, trace) = engine.evaluate_with_trace(sentence, &bindings)?;
                    serde_json::to_string_pretty(&json!({ "result": result, "trace": trace }))?
                } else {
                    let result = engine.evaluate(sentence, &bindings)?;
                    serde_json::to_string_pretty(&json!({ "result": result }))?
                }
            }
            Command::Survey { path, bindings } => {
                let survey = engine.load_survey(path)?;
                let validation = engine.validate_survey(&survey)?;
                match bindings {
                    Some(bindings) => {
                        let bindings = parse_bindings(bindings)?;
                        let displayed = engine.displayed_items(&survey, &bindings)?;
                        serde_json::to_string_pretty(&json!({
                            "survey": validation.survey_id,
                            "displayed": displayed,
                        }))?
                    }
                    None => serde_json::to_string_pretty(&validation)?,
                }
            }
            Command::Help => USAGE.to_string(),
        };
        Ok(output)
    }
}

/// Split `--flag` / `--flag value` options from positional arguments
fn split_flags(args: &[String]) -> Result<(Vec<String>, Vec<(String, Option<String>)>)> {
    let mut positional = Vec::new();
    let mut flags = Vec::new();
    let mut iter = args.iter();

    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "--prompts" => flags.push((arg.clone(), iter.next().cloned())),
            "--trace" => flags.push((arg.clone(), None)),
            flag if flag.starts_with("--") => bail!("Unknown option '{}'", flag),
            _ => positional.push(arg.clone()),
        }
    }

    Ok((positional, flags))
}

fn parse_bindings(json: &str) -> Result<Bindings> {
    serde_json::from_str(json).with_context(|| {
        format!(
            "Bindings must be a JSON object of numbers and strings, got: {}",
            json
        )
    })
}
