//! Mission lifecycle
//!
//! ```text
//! Locked -> Available -> InProgress -> Submitted -> Completed
//!                ^            |             |
//!                +------------+             v
//!                             ^---------- Rejected
//! ```

use crate::stage::stage;
use crate::{CurriculumError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MissionStatus {
    #[default]
    Locked,
    Available,
    InProgress,
    Submitted,
    Completed,
    Rejected,
}

impl MissionStatus {
    pub const ALL: [MissionStatus; 6] = [
        Self::Locked,
        Self::Available,
        Self::InProgress,
        Self::Submitted,
        Self::Completed,
        Self::Rejected,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            MissionStatus::Locked => "locked",
            MissionStatus::Available => "available",
            MissionStatus::InProgress => "in_progress",
            MissionStatus::Submitted => "submitted",
            MissionStatus::Completed => "completed",
            MissionStatus::Rejected => "rejected",
        }
    }

    /// States reachable in one step.
    pub fn next_states(&self) -> &'static [MissionStatus] {
        use MissionStatus::*;
        match self {
            Locked => &[Available],
            Available => &[InProgress],
            InProgress => &[Submitted, Available],
            Submitted => &[Completed, Rejected],
            Rejected => &[InProgress],
            Completed => &[],
        }
    }

    pub fn can_transition_to(&self, next: MissionStatus) -> bool {
        self.next_states().contains(&next)
    }

    pub fn transition(self, next: MissionStatus) -> Result<MissionStatus> {
        if self.can_transition_to(next) {
            Ok(next)
        } else {
            Err(CurriculumError::InvalidTransition {
                from: self,
                to: next,
            })
        }
    }

    pub fn is_terminal(&self) -> bool {
        self.next_states().is_empty()
    }
}

impl fmt::Display for MissionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for MissionStatus {
    type Err = CurriculumError;

    fn from_str(s: &str) -> Result<Self> {
        let key = s.trim().to_ascii_lowercase().replace(['-', ' '], "_");
        Self::ALL
            .into_iter()
            .find(|status| status.as_str() == key)
            .ok_or_else(|| CurriculumError::UnknownStatus(s.to_string()))
    }
}

/// A learner's progress on one mission.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Mission {
    pub id: String,
    pub stage: i32,
    pub status: MissionStatus,
    /// Number of submissions so far
    pub attempts: u32,
}

impl Mission {
    /// New locked mission on an existing stage.
    pub fn new(id: impl Into<String>, stage_number: i32) -> Result<Self> {
        if stage(stage_number).is_none() {
            return Err(CurriculumError::UnknownStage(stage_number));
        }
        Ok(Self {
            id: id.into(),
            stage: stage_number,
            status: MissionStatus::Locked,
            attempts: 0,
        })
    }

    fn advance(&mut self, next: MissionStatus) -> Result<()> {
        self.status = self.status.transition(next)?;
        gpslab_log::debug!("mission {} is now {}", self.id, self.status);
        Ok(())
    }

    pub fn unlock(&mut self) -> Result<()> {
        self.advance(MissionStatus::Available)
    }

    /// Start, or restart after a rejection.
    pub fn start(&mut self) -> Result<()> {
        self.advance(MissionStatus::InProgress)
    }

    pub fn abandon(&mut self) -> Result<()> {
        self.advance(MissionStatus::Available)
    }

    pub fn submit(&mut self) -> Result<()> {
        self.advance(MissionStatus::Submitted)?;
        self.attempts += 1;
        Ok(())
    }

    pub fn review(&mut self, approved: bool) -> Result<()> {
        if approved {
            self.advance(MissionStatus::Completed)
        } else {
            self.advance(MissionStatus::Rejected)
        }
    }

    pub fn is_complete(&self) -> bool {
        self.status == MissionStatus::Completed
    }
}
