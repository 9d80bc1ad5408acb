pub mod cohort;
pub mod simulation;
