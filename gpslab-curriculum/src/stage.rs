//! Stages and Adventures
//!
//! The curriculum runs from stage -4 to 35. Stages -4..=0 form the
//! pre-curriculum "GPO Call"; the rest are five adventures of seven
//! stages each.

use serde::Serialize;
use std::fmt;

pub const FIRST_STAGE: i32 = -4;
pub const LAST_STAGE: i32 = 35;
pub const STAGES_PER_ADVENTURE: i32 = 7;
pub const ADVENTURE_COUNT: u8 = 5;

/// Curriculum phase a stage belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    GpoCall,
    /// Adventures are numbered 1..=5
    Adventure(u8),
}

impl Phase {
    pub const ALL: [Phase; 6] = [
        Phase::GpoCall,
        Phase::Adventure(1),
        Phase::Adventure(2),
        Phase::Adventure(3),
        Phase::Adventure(4),
        Phase::Adventure(5),
    ];

    /// Phase containing `stage`, if the stage exists.
    pub const fn for_stage(stage: i32) -> Option<Phase> {
        if stage < FIRST_STAGE || stage > LAST_STAGE {
            return None;
        }
        if stage <= 0 {
            return Some(Phase::GpoCall);
        }
        Some(Phase::Adventure(((stage - 1) / STAGES_PER_ADVENTURE + 1) as u8))
    }

    pub const fn name(&self) -> &'static str {
        match self {
            Phase::GpoCall => "GPO Call",
            Phase::Adventure(1) => "Discover",
            Phase::Adventure(2) => "Design",
            Phase::Adventure(3) => "Build",
            Phase::Adventure(4) => "Impact",
            Phase::Adventure(_) => "Lead",
        }
    }

    /// Display color as a hex string.
    pub const fn color(&self) -> &'static str {
        match self {
            Phase::GpoCall => "#6B7280",
            Phase::Adventure(1) => "#3B82F6",
            Phase::Adventure(2) => "#10B981",
            Phase::Adventure(3) => "#F59E0B",
            Phase::Adventure(4) => "#EF4444",
            Phase::Adventure(_) => "#8B5CF6",
        }
    }

    /// Inclusive stage range covered by the phase.
    pub const fn stage_range(&self) -> (i32, i32) {
        match self {
            Phase::GpoCall => (FIRST_STAGE, 0),
            Phase::Adventure(n) => {
                let first = (*n as i32 - 1) * STAGES_PER_ADVENTURE + 1;
                (first, first + STAGES_PER_ADVENTURE - 1)
            }
        }
    }

    /// Most PSB a learner can earn inside the phase.
    pub const fn psb_cap(&self) -> u64 {
        match self {
            Phase::GpoCall => 0,
            Phase::Adventure(1) => 500,
            Phase::Adventure(2) => 1_000,
            Phase::Adventure(3) => 1_500,
            Phase::Adventure(4) => 2_000,
            Phase::Adventure(_) => 3_000,
        }
    }
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Phase::GpoCall => f.write_str(self.name()),
            Phase::Adventure(n) => write!(f, "Adventure {}: {}", n, self.name()),
        }
    }
}

/// One curriculum stage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct StageInfo {
    pub number: i32,
    pub name: &'static str,
    pub phase: Phase,
    pub color: &'static str,
    pub description: &'static str,
}

impl StageInfo {
    const fn new(number: i32, name: &'static str, description: &'static str) -> Self {
        let phase = match Phase::for_stage(number) {
            Some(phase) => phase,
            None => Phase::GpoCall,
        };
        Self {
            number,
            name,
            phase,
            color: phase.color(),
            description,
        }
    }

    pub fn is_pre_curriculum(&self) -> bool {
        self.phase == Phase::GpoCall
    }

    /// 1-based position inside the phase.
    pub fn position_in_phase(&self) -> i32 {
        self.number - self.phase.stage_range().0 + 1
    }
}

static STAGES: [StageInfo; 40] = [
    StageInfo::new(-4, "The Call", "Hear the invitation and meet the GPS Lab."),
    StageInfo::new(-3, "Orientation", "Learn how missions, bites and rewards work."),
    StageInfo::new(-2, "Gear Check", "Set up your profile and learning tools."),
    StageInfo::new(-1, "Team Up", "Find a party to travel with."),
    StageInfo::new(0, "Launch Pad", "Commit to the journey and choose a first goal."),
    StageInfo::new(1, "Curiosity", "Notice what puzzles you in everyday life."),
    StageInfo::new(2, "Observation", "Watch closely and record what you see."),
    StageInfo::new(3, "Questions", "Turn observations into questions worth asking."),
    StageInfo::new(4, "Research", "Gather what others already know."),
    StageInfo::new(5, "Insight", "Connect the pieces into a new understanding."),
    StageInfo::new(6, "Sharing", "Explain your discovery to your party."),
    StageInfo::new(7, "Reflection", "Look back on how you learned."),
    StageInfo::new(8, "Problem Framing", "Define the problem you want to solve."),
    StageInfo::new(9, "Empathy", "Understand the people the problem affects."),
    StageInfo::new(10, "Ideation", "Generate as many ideas as you can."),
    StageInfo::new(11, "Selection", "Choose the idea with the most promise."),
    StageInfo::new(12, "Sketching", "Draw the idea so others can see it."),
    StageInfo::new(13, "Feedback", "Invite honest reactions to your sketch."),
    StageInfo::new(14, "Refinement", "Improve the design with what you heard."),
    StageInfo::new(15, "Planning", "Break the build into achievable steps."),
    StageInfo::new(16, "Prototyping", "Make a first working version."),
    StageInfo::new(17, "Testing", "Try the prototype with real users."),
    StageInfo::new(18, "Iteration", "Fix what broke and try again."),
    StageInfo::new(19, "Collaboration", "Divide the work across your party."),
    StageInfo::new(20, "Documentation", "Write down how it works."),
    StageInfo::new(21, "Demo", "Show the finished build."),
    StageInfo::new(22, "Community", "Find who your work can serve."),
    StageInfo::new(23, "Partnerships", "Team up with people who can help."),
    StageInfo::new(24, "Outreach", "Bring the project to its audience."),
    StageInfo::new(25, "Pilot", "Run the project for a small group."),
    StageInfo::new(26, "Measurement", "Measure what changed."),
    StageInfo::new(27, "Storytelling", "Tell the story of your impact."),
    StageInfo::new(28, "Scaling", "Plan how to reach more people."),
    StageInfo::new(29, "Mentorship", "Guide a newer explorer."),
    StageInfo::new(30, "Vision", "Describe the future you want to build."),
    StageInfo::new(31, "Strategy", "Map the path to that future."),
    StageInfo::new(32, "Venture", "Shape the project into a lasting venture."),
    StageInfo::new(33, "Pitch", "Present the venture to supporters."),
    StageInfo::new(34, "Legacy", "Leave tools for those who follow."),
    StageInfo::new(35, "Graduation", "Celebrate the journey and set the next course."),
];

/// Look up a stage by number.
///
/// ```
/// use gpslab_curriculum::{stage, Phase};
///
/// assert_eq!(stage(-4).map(|s| s.phase), Some(Phase::GpoCall));
/// assert_eq!(stage(8).map(|s| s.phase), Some(Phase::Adventure(2)));
/// assert!(stage(36).is_none());
/// ```
pub fn stage(number: i32) -> Option<&'static StageInfo> {
    if !(FIRST_STAGE..=LAST_STAGE).contains(&number) {
        gpslab_log::debug!("unknown stage {}", number);
        return None;
    }
    STAGES.get((number - FIRST_STAGE) as usize)
}

pub fn stages() -> &'static [StageInfo] {
    &STAGES
}

pub fn stages_in_phase(phase: Phase) -> impl Iterator<Item = &'static StageInfo> {
    STAGES.iter().filter(move |s| s.phase == phase)
}

pub fn next_stage(number: i32) -> Option<&'static StageInfo> {
    number.checked_add(1).and_then(stage)
}

pub fn previous_stage(number: i32) -> Option<&'static StageInfo> {
    number.checked_sub(1).and_then(stage)
}

/// Percent of adventure stages finished once `completed` is done.
///
/// GPO Call stages count as zero progress.
pub fn curriculum_progress(completed: i32) -> f64 {
    let done = completed.clamp(0, LAST_STAGE);
    (done as f64 / LAST_STAGE as f64 * 1000.0).round() / 10.0
}
