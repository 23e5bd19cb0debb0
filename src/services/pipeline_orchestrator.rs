use std::fmt;
use std::sync::Arc;

use tokio_util::sync::CancellationToken;

use crate::{
    errors::{AppError, AppResult},
    models::{
        domain::{
            explanation::OVERVIEW_CHARS, ConceptsResult, ExplanationDocument, PitfallsResult,
            ProblemText, QuickExplanation, SolutionsResult, StageOutput,
        },
        dto::request::InputType,
    },
    services::{
        generation_client::Generator,
        orchestrator_steps::stage_steps::{PipelineStage, StageStep},
        problem_ingestor::ProblemIngestor,
        response_parser::parse_stage,
        stage_prompt_builder::{
            concepts_prompt, pitfalls_prompt, quick_explanation_prompt, retry_prompt,
            solutions_prompt,
        },
    },
};

const QUICK_MAX_NEW_TOKENS: usize = 512;

/// Where a single explanation request currently is.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PipelineState {
    Ingesting,
    Running(PipelineStage),
    Assembled,
    Failed { stage: PipelineStage, reason: String },
}

impl fmt::Display for PipelineState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PipelineState::Ingesting => f.write_str("ingesting"),
            PipelineState::Running(stage) => write!(f, "stage {} ({})", stage.name(), stage_number(*stage)),
            PipelineState::Assembled => f.write_str("assembled"),
            PipelineState::Failed { stage, reason } => write!(f, "failed at {}: {}", stage, reason),
        }
    }
}

fn stage_number(stage: PipelineStage) -> u8 {
    match stage {
        PipelineStage::Concepts => 1,
        PipelineStage::Solutions => 2,
        PipelineStage::Pitfalls => 3,
    }
}

/// Runs the ingest, concepts, solutions, pitfalls sequence for one request.
pub struct PipelineOrchestrator {
    ingestor: Arc<ProblemIngestor>,
    generator: Arc<dyn Generator>,
}

impl PipelineOrchestrator {
    pub fn new(ingestor: Arc<ProblemIngestor>, generator: Arc<dyn Generator>) -> Self {
        Self {
            ingestor,
            generator,
        }
    }

    pub async fn run(
        &self,
        input_type: InputType,
        content: &str,
        cancel: &CancellationToken,
    ) -> AppResult<ExplanationDocument> {
        let mut state = PipelineState::Ingesting;
        log::info!("Pipeline {}", state);
        let problem = self.ingestor.ingest(input_type, content).await?;

        match self.run_stages(&problem, &mut state, cancel).await {
            Ok(document) => {
                advance(&mut state, PipelineState::Assembled);
                Ok(document)
            }
            Err(err) => {
                if let PipelineState::Running(stage) = state {
                    advance(
                        &mut state,
                        PipelineState::Failed {
                            stage,
                            reason: err.to_string(),
                        },
                    );
                }
                Err(err)
            }
        }
    }

    async fn run_stages(
        &self,
        problem: &ProblemText,
        state: &mut PipelineState,
        cancel: &CancellationToken,
    ) -> AppResult<ExplanationDocument> {
        advance(state, PipelineState::Running(PipelineStage::Concepts));
        self.ensure_ready(PipelineStage::Concepts).await?;

        let concepts: ConceptsResult = self
            .run_stage(&PipelineStage::Concepts.step(), concepts_prompt(problem), cancel)
            .await?;
        log::info!("Identified {} concepts", concepts.concepts.len());

        advance(state, PipelineState::Running(PipelineStage::Solutions));
        let solutions: SolutionsResult = self
            .run_stage(
                &PipelineStage::Solutions.step(),
                solutions_prompt(problem, &concepts),
                cancel,
            )
            .await?;

        advance(state, PipelineState::Running(PipelineStage::Pitfalls));
        let pitfalls: PitfallsResult = self
            .run_stage(
                &PipelineStage::Pitfalls.step(),
                pitfalls_prompt(problem, &solutions),
                cancel,
            )
            .await?;

        Ok(ExplanationDocument::assemble(
            problem, concepts, solutions, pitfalls,
        ))
    }

    /// Single free-form generation without structured stages.
    pub async fn quick(
        &self,
        input_type: InputType,
        content: &str,
        cancel: &CancellationToken,
    ) -> AppResult<QuickExplanation> {
        let problem = self.ingestor.ingest(input_type, content).await?;
        if cancel.is_cancelled() {
            return Err(AppError::Cancelled);
        }

        let explanation = self
            .generator
            .generate(&quick_explanation_prompt(&problem), QUICK_MAX_NEW_TOKENS)
            .await?;
        if explanation.trim().is_empty() {
            return Err(AppError::Generation("model returned an empty explanation".to_string()));
        }

        Ok(QuickExplanation {
            overview: problem.excerpt(OVERVIEW_CHARS),
            explanation,
        })
    }

    async fn ensure_ready(&self, stage: PipelineStage) -> AppResult<()> {
        self.generator
            .warmup()
            .await
            .map_err(|e| AppError::StageFailed {
                stage,
                source: Box::new(e),
            })
    }

    /// Generates and parses one stage, retrying once with an amended prompt.
    async fn run_stage<T: StageOutput>(
        &self,
        step: &StageStep,
        prompt: String,
        cancel: &CancellationToken,
    ) -> AppResult<T> {
        let mut attempt_prompt = prompt.clone();
        let mut retries = 0;

        if let Some(description) = &step.description {
            log::info!("Stage {}: {}", step.stage, description);
        }

        loop {
            if cancel.is_cancelled() {
                log::info!("Cancelled before {} attempt {}", step.stage, retries + 1);
                return Err(AppError::Cancelled);
            }

            let outcome = match self
                .generator
                .generate(&attempt_prompt, step.max_new_tokens)
                .await
            {
                Ok(text) => parse_stage::<T>(&text).map_err(|e| (e, Some(text))),
                Err(e) => Err((e, None)),
            };

            let (err, raw_output) = match outcome {
                Ok(result) => {
                    log::info!("Stage {} succeeded", step.stage);
                    return Ok(result);
                }
                Err(failure) => failure,
            };

            if !err.is_retryable() || retries >= step.max_retries {
                log::error!("Stage {} failed: {}", step.stage, err);
                return Err(AppError::StageFailed {
                    stage: step.stage,
                    source: Box::new(err),
                });
            }

            retries += 1;
            log::warn!(
                "Stage {} attempt failed ({}), retrying with strict JSON prompt",
                step.stage,
                err
            );
            attempt_prompt = retry_prompt(&prompt, raw_output.as_deref(), &failure_reason(&err));
        }
    }
}

fn advance(state: &mut PipelineState, next: PipelineState) {
    log::info!("Pipeline {} -> {}", state, next);
    *state = next;
}

fn failure_reason(err: &AppError) -> String {
    match err {
        AppError::Parse { reason, .. } => reason.clone(),
        other => other.to_string(),
    }
}
