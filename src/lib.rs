//! # leveling-engine
//!
//! Peer cohort comparison and growth simulation for life-leveling skill
//! tracking. Two pure engines over caller-supplied records:
//!
//! - [`services::cohort`] - ranks a user's skill level inside an anonymous
//!   cohort sharing category, commitment level, and age-range bucket, and
//!   attaches encouraging feedback per percentile band.
//! - [`services::simulation`] - forecasts future skill levels for a
//!   hypothetical effort allocation, with synergy between related categories,
//!   commitment multipliers, and diminishing returns.
//!
//! [`LevelingEngine`] wraps both behind an optional, fail-open Redis cache;
//! persistence and HTTP routing stay with the host application.

pub mod cache;
pub mod config;
pub mod engine;
pub mod logging;
pub mod services;
pub mod types;

pub use config::EngineConfig;
pub use engine::LevelingEngine;
pub use types::{
    AgeRange, Category, CohortComparison, IntentLevel, Interest, SimulationResult,
    SimulationScenario, SkillLevel, UserInterests,
};
