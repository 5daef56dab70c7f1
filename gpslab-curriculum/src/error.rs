//! Curriculum error types

use crate::mission::MissionStatus;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CurriculumError {
    #[error("Cannot move a mission from {from} to {to}")]
    InvalidTransition {
        from: MissionStatus,
        to: MissionStatus,
    },

    #[error("Unknown stage: {0}")]
    UnknownStage(i32),

    #[error("Unknown mission status: {0}")]
    UnknownStatus(String),
}

/// Result type for curriculum operations.
pub type Result<T> = std::result::Result<T, CurriculumError>;
