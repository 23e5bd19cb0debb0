pub mod stage_steps;
