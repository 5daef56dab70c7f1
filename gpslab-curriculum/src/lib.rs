//! GPS Lab curriculum tables
//!
//! Read-only data shared by the formatters and the UI:
//!
//! - **Stages**: -4..=35, grouped into the GPO Call and five adventures
//! - **Badges**: achievement table with rarity and Baraka rewards
//! - **Missions**: the status machine a learner's mission moves through
//!
//! ```rust
//! use gpslab_curriculum::{stage, Mission, MissionStatus, Phase};
//!
//! let info = stage(22).unwrap();
//! assert_eq!(info.phase, Phase::Adventure(4));
//!
//! let mut mission = Mission::new("map-your-community", 22).unwrap();
//! mission.unlock().unwrap();
//! assert_eq!(mission.status, MissionStatus::Available);
//! ```

mod badge;
mod error;
mod mission;
mod stage;

pub use badge::{
    BADGES, Badge, BadgeCategory, BadgeRarity, badge, badges_by_rarity, badges_for_category,
};
pub use error::{CurriculumError, Result};
pub use mission::{Mission, MissionStatus};
pub use stage::{
    ADVENTURE_COUNT, FIRST_STAGE, LAST_STAGE, Phase, STAGES_PER_ADVENTURE, StageInfo,
    curriculum_progress, next_stage, previous_stage, stage, stages, stages_in_phase,
};
