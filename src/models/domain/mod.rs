pub mod explanation;
pub mod problem;
pub mod stage_result;
pub use explanation::{ExplanationDocument, QuickExplanation};
pub use problem::{Platform, ProblemSource, ProblemText};
pub use stage_result::{ConceptsResult, PitfallsResult, SolutionsResult, StageOutput};
