//! Badges

use once_cell::sync::Lazy;
use serde::Serialize;
use std::collections::HashMap;

/// Badge rarity, lowest first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum BadgeRarity {
    Common,
    Rare,
    Epic,
    Legendary,
}

impl BadgeRarity {
    pub const ALL: [BadgeRarity; 4] = [Self::Common, Self::Rare, Self::Epic, Self::Legendary];

    pub fn as_str(&self) -> &'static str {
        match self {
            BadgeRarity::Common => "common",
            BadgeRarity::Rare => "rare",
            BadgeRarity::Epic => "epic",
            BadgeRarity::Legendary => "legendary",
        }
    }

    pub fn color(&self) -> &'static str {
        match self {
            BadgeRarity::Common => "#9CA3AF",
            BadgeRarity::Rare => "#3B82F6",
            BadgeRarity::Epic => "#A855F7",
            BadgeRarity::Legendary => "#F59E0B",
        }
    }

    /// Baraka awarded when a badge of this rarity is earned.
    pub fn baraka_reward(&self) -> u64 {
        match self {
            BadgeRarity::Common => 10,
            BadgeRarity::Rare => 50,
            BadgeRarity::Epic => 200,
            BadgeRarity::Legendary => 1_000,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum BadgeCategory {
    Learning,
    Streak,
    Community,
    Creation,
    Milestone,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Badge {
    pub id: &'static str,
    pub name: &'static str,
    pub description: &'static str,
    pub category: BadgeCategory,
    pub rarity: BadgeRarity,
    pub icon: &'static str,
}

const fn b(
    id: &'static str,
    name: &'static str,
    description: &'static str,
    category: BadgeCategory,
    rarity: BadgeRarity,
    icon: &'static str,
) -> Badge {
    Badge {
        id,
        name,
        description,
        category,
        rarity,
        icon,
    }
}

use BadgeCategory::*;
use BadgeRarity::*;

pub static BADGES: &[Badge] = &[
    b("first_steps", "First Steps", "Complete your first mission", Learning, Common, "👣"),
    b("quick_learner", "Quick Learner", "Finish five bites in one day", Learning, Rare, "⚡"),
    b("deep_diver", "Deep Diver", "Complete every mission in a stage", Learning, Epic, "🤿"),
    b("scholar", "Scholar", "Complete every mission in an adventure", Learning, Legendary, "🎓"),
    b("streak_3", "On a Roll", "Learn three days in a row", Streak, Common, "🔥"),
    b("streak_7", "Week Warrior", "Learn seven days in a row", Streak, Rare, "📅"),
    b("streak_30", "Unstoppable", "Learn thirty days in a row", Streak, Epic, "🚀"),
    b("party_starter", "Party Starter", "Create or join a party", Community, Common, "🎉"),
    b("helper", "Helper", "Give feedback on ten submissions", Community, Rare, "🤝"),
    b("mentor", "Mentor", "Guide a newer explorer through a stage", Community, Epic, "🧭"),
    b("maker", "Maker", "Submit your first project", Creation, Common, "🛠"),
    b("innovator", "Innovator", "Have a project featured", Creation, Epic, "💡"),
    b("gpo_graduate", "Called", "Finish the GPO Call", Milestone, Common, "📡"),
    b("adventurer", "Adventurer", "Finish your first adventure", Milestone, Rare, "🗺"),
    b("trailblazer", "Trailblazer", "Reach stage 35", Milestone, Legendary, "🏔"),
];

static BY_ID: Lazy<HashMap<&'static str, &'static Badge>> =
    Lazy::new(|| BADGES.iter().map(|badge| (badge.id, badge)).collect());

/// Look up a badge by id.
pub fn badge(id: &str) -> Option<&'static Badge> {
    BY_ID.get(id).copied()
}

pub fn badges_for_category(category: BadgeCategory) -> impl Iterator<Item = &'static Badge> {
    BADGES.iter().filter(move |b| b.category == category)
}

pub fn badges_by_rarity(rarity: BadgeRarity) -> impl Iterator<Item = &'static Badge> {
    BADGES.iter().filter(move |b| b.rarity == rarity)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_ids_are_unique() {
        let ids: HashSet<&str> = BADGES.iter().map(|b| b.id).collect();
        assert_eq!(ids.len(), BADGES.len());
    }

    #[test]
    fn test_lookup() {
        assert_eq!(badge("streak_7").map(|b| b.rarity), Some(BadgeRarity::Rare));
        assert!(badge("nope").is_none());
    }

    #[test]
    fn test_filters() {
        let streaks: Vec<&str> = badges_for_category(BadgeCategory::Streak).map(|b| b.id).collect();
        assert_eq!(streaks, vec!["streak_3", "streak_7", "streak_30"]);
        assert_eq!(badges_by_rarity(BadgeRarity::Legendary).count(), 2);
    }

    #[test]
    fn test_rarity_order() {
        assert!(BadgeRarity::Common < BadgeRarity::Legendary);
        let rewards: Vec<u64> = BadgeRarity::ALL.iter().map(BadgeRarity::baraka_reward).collect();
        assert!(rewards.windows(2).all(|w| w[0] < w[1]));
        assert_eq!(serde_json::to_value(BadgeRarity::Epic).unwrap(), "epic");
    }
}
