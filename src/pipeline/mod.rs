//! Scoring pipeline module
//!
//! Wires the stages together in a fixed order: load, drop incomplete rows,
//! label-encode, normalize headers, select the target, scale, split, fit
//! the forest, predict, evaluate, and report.

mod config;
mod scoring;

pub use config::PipelineConfig;
pub use scoring::{
    predict, select_target, PipelineOutcome, Predictions, ScoringPipeline, TargetSelection,
    POSITIVE_CLASS,
};
