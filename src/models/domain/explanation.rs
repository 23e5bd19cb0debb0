use serde::Serialize;

use super::problem::ProblemText;
use super::stage_result::{
    ConceptsResult, NaiveApproach, OptimalApproach, Pitfall, PitfallsResult, RelatedProblem,
    SolutionsResult, WorkedExample,
};

/// Characters of the problem statement echoed as the overview.
pub const OVERVIEW_CHARS: usize = 300;

/// Final multi-part explanation, only built once every stage succeeded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExplanationDocument {
    pub overview: String,
    pub concepts: ConceptsResult,
    pub naive_approach: NaiveApproach,
    pub optimal_approach: OptimalApproach,
    pub worked_example: WorkedExample,
    pub pitfalls: Vec<Pitfall>,
    pub edge_cases: Vec<String>,
    pub related_problems: Vec<RelatedProblem>,
}

impl ExplanationDocument {
    pub fn assemble(
        problem: &ProblemText,
        concepts: ConceptsResult,
        solutions: SolutionsResult,
        pitfalls: PitfallsResult,
    ) -> Self {
        Self {
            overview: problem.excerpt(OVERVIEW_CHARS),
            concepts,
            naive_approach: solutions.naive_approach,
            optimal_approach: solutions.optimal_approach,
            worked_example: solutions.worked_example,
            pitfalls: pitfalls.pitfalls,
            edge_cases: pitfalls.edge_cases,
            related_problems: pitfalls.related_problems,
        }
    }
}

/// Single-call free-form explanation produced in fast mode.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct QuickExplanation {
    pub overview: String,
    pub explanation: String,
}
