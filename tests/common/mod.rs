#![allow(dead_code)]

use std::collections::VecDeque;
use std::io::Write;
use std::path::PathBuf;
use std::sync::Mutex;

use knowlabel::{KnowledgeBase, ModelOracle, OracleError};

pub const FIXTURE_CSV: &str = "\
ingredient,beneficial,description,alternatives
Water,true,The universal solvent.,
Glycerin,TRUE,A humectant that draws moisture into the skin.,
Parabens,false,\"Preservatives, debated as endocrine disruptors.\",Phenoxyethanol;Sodium Benzoate
Sodium Lauryl Sulfate,false,A harsh surfactant.,Sodium Cocoyl Isethionate; ;Decyl Glucoside
Hyaluronic Acid,true,Holds up to 1000x its weight in water.,
";

pub fn fixture_kb() -> KnowledgeBase {
    KnowledgeBase::from_csv_reader(FIXTURE_CSV.as_bytes()).unwrap()
}

pub fn write_fixture(dir: &tempfile::TempDir) -> PathBuf {
    let path = dir.path().join("combined_ingredient_dataset_appended.csv");
    let mut file = std::fs::File::create(&path).unwrap();
    file.write_all(FIXTURE_CSV.as_bytes()).unwrap();
    path
}

/// Oracle replaying queued outcomes and recording every prompt.
///
/// Once the queue is drained it answers with a fixed fallback text.
#[derive(Default)]
pub struct ScriptedOracle {
    replies: Mutex<VecDeque<Result<String, OracleError>>>,
    prompts: Mutex<Vec<String>>,
}

impl ScriptedOracle {
    pub fn new<I>(replies: I) -> Self
    where
        I: IntoIterator<Item = Result<String, OracleError>>,
    {
        Self {
            replies: Mutex::new(replies.into_iter().collect()),
            prompts: Mutex::new(Vec::new()),
        }
    }

    pub fn prompts(&self) -> Vec<String> {
        self.prompts.lock().unwrap().clone()
    }
}

impl ModelOracle for ScriptedOracle {
    fn query(&self, prompt: &str) -> Result<String, OracleError> {
        self.prompts.lock().unwrap().push(prompt.to_string());
        self.replies
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Ok("scripted fallback".to_string()))
    }
}

/// Oracle whose service is never reachable.
pub struct DownOracle;

impl ModelOracle for DownOracle {
    fn query(&self, _prompt: &str) -> Result<String, OracleError> {
        Err(OracleError::unavailable(
            "http://127.0.0.1:11434/api/generate",
            "connection failed",
        ))
    }
}

/// Deterministic oracle echoing the prompt.
pub struct EchoOracle;

impl ModelOracle for EchoOracle {
    fn query(&self, prompt: &str) -> Result<String, OracleError> {
        Ok(format!("about: {prompt}"))
    }
}
