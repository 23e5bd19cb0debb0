use std::fmt;

use serde::Serialize;

const CONCEPTS_MAX_NEW_TOKENS: usize = 512;
const SOLUTIONS_MAX_NEW_TOKENS: usize = 1024;
const PITFALLS_MAX_NEW_TOKENS: usize = 1024;

const STAGE_RETRIES: u32 = 1;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum PipelineStage {
    Concepts,
    Solutions,
    Pitfalls,
}

impl PipelineStage {
    pub fn name(&self) -> &'static str {
        match self {
            PipelineStage::Concepts => "concepts",
            PipelineStage::Solutions => "solutions",
            PipelineStage::Pitfalls => "pitfalls",
        }
    }

    pub fn step(&self) -> StageStep {
        match self {
            PipelineStage::Concepts => concepts_step(),
            PipelineStage::Solutions => solutions_step(),
            PipelineStage::Pitfalls => pitfalls_step(),
        }
    }
}

impl fmt::Display for PipelineStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Execution settings for one generation stage.
#[derive(Debug, Clone)]
pub struct StageStep {
    pub stage: PipelineStage,
    pub description: Option<String>,
    pub max_new_tokens: usize,
    pub max_retries: u32,
}

impl StageStep {
    pub fn new(stage: PipelineStage) -> Self {
        Self {
            stage,
            description: None,
            max_new_tokens: 1024,
            max_retries: 0,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_max_new_tokens(mut self, max_new_tokens: usize) -> Self {
        self.max_new_tokens = max_new_tokens;
        self
    }

    pub fn with_max_retries(mut self, max_retries: u32) -> Self {
        self.max_retries = max_retries;
        self
    }
}

pub fn explanation_stages() -> Vec<StageStep> {
    vec![concepts_step(), solutions_step(), pitfalls_step()]
}

fn concepts_step() -> StageStep {
    StageStep::new(PipelineStage::Concepts)
        .with_description("Identify key concepts, prerequisites, difficulty and an analogy")
        .with_max_new_tokens(CONCEPTS_MAX_NEW_TOKENS)
        .with_max_retries(STAGE_RETRIES)
}

fn solutions_step() -> StageStep {
    StageStep::new(PipelineStage::Solutions)
        .with_description("Describe the naive and optimal approaches with a worked example")
        .with_max_new_tokens(SOLUTIONS_MAX_NEW_TOKENS)
        .with_max_retries(STAGE_RETRIES)
}

fn pitfalls_step() -> StageStep {
    StageStep::new(PipelineStage::Pitfalls)
        .with_description("List common pitfalls, edge cases and related problems")
        .with_max_new_tokens(PITFALLS_MAX_NEW_TOKENS)
        .with_max_retries(STAGE_RETRIES)
}
