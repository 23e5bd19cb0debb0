use serde::{de::DeserializeOwned, Deserialize, Serialize};

use crate::services::orchestrator_steps::stage_steps::PipelineStage;

/// Expected JSON shape of a required field.
#[derive(Debug, Clone, Copy)]
pub enum Shape {
    Text,
    TextList,
    Object(&'static [FieldSpec]),
    ObjectList(&'static [FieldSpec]),
}

#[derive(Debug, Clone, Copy)]
pub struct FieldSpec {
    pub key: &'static str,
    pub shape: Shape,
}

const fn field(key: &'static str, shape: Shape) -> FieldSpec {
    FieldSpec { key, shape }
}

/// A structured stage output with the keys a parsed object must carry.
pub trait StageOutput: DeserializeOwned + Serialize {
    const STAGE: PipelineStage;
    const SCHEMA: &'static [FieldSpec];
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConceptsResult {
    pub concepts: Vec<String>,
    pub prerequisites: Vec<String>,
    pub difficulty: String,
    pub difficulty_reason: String,
    pub analogy: String,
}

impl StageOutput for ConceptsResult {
    const STAGE: PipelineStage = PipelineStage::Concepts;
    const SCHEMA: &'static [FieldSpec] = &[
        field("concepts", Shape::TextList),
        field("prerequisites", Shape::TextList),
        field("difficulty", Shape::Text),
        field("difficulty_reason", Shape::Text),
        field("analogy", Shape::Text),
    ];
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NaiveApproach {
    pub name: String,
    pub intuition: String,
    pub pseudocode: String,
    pub time_complexity: String,
    pub space_complexity: String,
    pub limitation: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OptimalApproach {
    pub name: String,
    pub key_insight: String,
    pub pseudocode: String,
    pub time_complexity: String,
    pub space_complexity: String,
    pub why_optimal: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkedExample {
    pub input: String,
    pub steps: Vec<String>,
    pub output: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SolutionsResult {
    pub naive_approach: NaiveApproach,
    pub optimal_approach: OptimalApproach,
    pub worked_example: WorkedExample,
}

const NAIVE_APPROACH_SCHEMA: &[FieldSpec] = &[
    field("name", Shape::Text),
    field("intuition", Shape::Text),
    field("pseudocode", Shape::Text),
    field("time_complexity", Shape::Text),
    field("space_complexity", Shape::Text),
    field("limitation", Shape::Text),
];

const OPTIMAL_APPROACH_SCHEMA: &[FieldSpec] = &[
    field("name", Shape::Text),
    field("key_insight", Shape::Text),
    field("pseudocode", Shape::Text),
    field("time_complexity", Shape::Text),
    field("space_complexity", Shape::Text),
    field("why_optimal", Shape::Text),
];

const WORKED_EXAMPLE_SCHEMA: &[FieldSpec] = &[
    field("input", Shape::Text),
    field("steps", Shape::TextList),
    field("output", Shape::Text),
];

impl StageOutput for SolutionsResult {
    const STAGE: PipelineStage = PipelineStage::Solutions;
    const SCHEMA: &'static [FieldSpec] = &[
        field("naive_approach", Shape::Object(NAIVE_APPROACH_SCHEMA)),
        field("optimal_approach", Shape::Object(OPTIMAL_APPROACH_SCHEMA)),
        field("worked_example", Shape::Object(WORKED_EXAMPLE_SCHEMA)),
    ];
}

impl SolutionsResult {
    /// Compact digest of the approaches, threaded into the pitfalls prompt.
    pub fn summary(&self) -> String {
        format!(
            "Naive approach: {} ({} time, {} space). Limitation: {}\n\
             Optimal approach: {} ({} time, {} space). Key insight: {}",
            self.naive_approach.name,
            self.naive_approach.time_complexity,
            self.naive_approach.space_complexity,
            self.naive_approach.limitation,
            self.optimal_approach.name,
            self.optimal_approach.time_complexity,
            self.optimal_approach.space_complexity,
            self.optimal_approach.key_insight,
        )
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pitfall {
    pub mistake: String,
    pub why_fails: String,
    pub fix: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RelatedProblem {
    pub name: String,
    pub platform: String,
    pub difficulty: String,
    pub similarity: String,
    pub difference: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PitfallsResult {
    pub pitfalls: Vec<Pitfall>,
    pub edge_cases: Vec<String>,
    pub related_problems: Vec<RelatedProblem>,
}

const PITFALL_SCHEMA: &[FieldSpec] = &[
    field("mistake", Shape::Text),
    field("why_fails", Shape::Text),
    field("fix", Shape::Text),
];

const RELATED_PROBLEM_SCHEMA: &[FieldSpec] = &[
    field("name", Shape::Text),
    field("platform", Shape::Text),
    field("difficulty", Shape::Text),
    field("similarity", Shape::Text),
    field("difference", Shape::Text),
];

impl StageOutput for PitfallsResult {
    const STAGE: PipelineStage = PipelineStage::Pitfalls;
    const SCHEMA: &'static [FieldSpec] = &[
        field("pitfalls", Shape::ObjectList(PITFALL_SCHEMA)),
        field("edge_cases", Shape::TextList),
        field("related_problems", Shape::ObjectList(RELATED_PROBLEM_SCHEMA)),
    ];
}
