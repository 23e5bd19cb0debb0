pub mod extraction_strategies;
pub mod generation_backend;
pub mod generation_client;
pub mod orchestrator_steps;
pub mod pipeline_orchestrator;
pub mod problem_ingestor;
pub mod prompt_formatter;
pub mod response_parser;
pub mod stage_prompt_builder;
pub mod text_normalizer;
