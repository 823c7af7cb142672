//! BDD step definitions for review bot

pub mod startup_steps;
pub mod validation_steps;
