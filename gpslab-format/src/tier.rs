//! Tier Tables
//!
//! Ordered threshold tables mapping a balance (or price, or sales volume)
//! to a tier. Lookups are inclusive: a balance equal to a threshold lands
//! in that tier.

use serde::Serialize;

use crate::input::NumberInput;
use crate::number::round_half_up;

/// One tier of a table.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Tier {
    pub id: &'static str,
    pub name: &'static str,
    /// Lowest balance in this tier
    pub threshold: f64,
    /// Reward multiplier
    pub multiplier: f64,
    pub benefits: &'static [&'static str],
}

impl Tier {
    /// `×1.5`
    pub fn multiplier_label(&self) -> String {
        let text = format!("{:.2}", self.multiplier);
        let text = text.trim_end_matches('0').trim_end_matches('.');
        format!("×{}", text)
    }
}

/// Where a balance sits within a table.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TierProgress {
    pub current: &'static Tier,
    pub next: Option<&'static Tier>,
    /// Amount still needed for the next tier; zero at the top
    pub remaining: f64,
    /// Progress through the current tier, `0.0..=100.0`
    pub percent: f64,
}

/// An ascending table of tiers.
#[derive(Debug)]
pub struct TierTable {
    name: &'static str,
    tiers: &'static [Tier],
}

impl TierTable {
    /// `tiers` must be non-empty and sorted by ascending threshold.
    /// Panics if `tiers` is empty; in a `const` or `static` that is a
    /// compile error.
    pub const fn new(name: &'static str, tiers: &'static [Tier]) -> Self {
        assert!(!tiers.is_empty(), "a tier table needs at least one tier");
        Self { name, tiers }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn tiers(&self) -> &'static [Tier] {
        self.tiers
    }

    pub fn get(&self, id: &str) -> Option<&'static Tier> {
        self.tiers.iter().find(|t| t.id.eq_ignore_ascii_case(id))
    }

    fn index_for(&self, balance: f64) -> usize {
        self.tiers
            .iter()
            .rposition(|t| balance >= t.threshold)
            .unwrap_or(0)
    }

    /// Highest tier whose threshold is at or below `balance`; the lowest
    /// tier for balances below every threshold.
    pub fn tier_for(&self, balance: impl Into<NumberInput>) -> &'static Tier {
        &self.tiers[self.index_for(balance.into().or_zero())]
    }

    pub fn next_tier(&self, balance: impl Into<NumberInput>) -> Option<&'static Tier> {
        self.tiers.get(self.index_for(balance.into().or_zero()) + 1)
    }

    pub fn progress(&self, balance: impl Into<NumberInput>) -> TierProgress {
        let balance = balance.into().or_zero();
        let index = self.index_for(balance);
        let current = &self.tiers[index];
        let next = self.tiers.get(index + 1);

        let (remaining, percent) = match next {
            Some(next) => {
                let span = next.threshold - current.threshold;
                let into = (balance - current.threshold).max(0.0);
                let percent = if span > 0.0 {
                    (into / span * 100.0).clamp(0.0, 100.0)
                } else {
                    100.0
                };
                ((next.threshold - balance).max(0.0), round_half_up(percent, 1))
            }
            None => (0.0, 100.0),
        };

        TierProgress {
            current,
            next,
            remaining,
            percent,
        }
    }
}

// ============================================================================
// Tables
// ============================================================================

/// Tiers by Baraka balance.
pub static BARAKA_TIERS: TierTable = TierTable::new(
    "baraka",
    &[
        Tier {
            id: "starter",
            name: "Starter",
            threshold: 0.0,
            multiplier: 1.0,
            benefits: &["Daily missions"],
        },
        Tier {
            id: "beginner",
            name: "Beginner",
            threshold: 1_000.0,
            multiplier: 1.1,
            benefits: &["Daily missions", "Weekly challenges"],
        },
        Tier {
            id: "intermediate",
            name: "Intermediate",
            threshold: 5_000.0,
            multiplier: 1.2,
            benefits: &["Weekly challenges", "Mentor sessions"],
        },
        Tier {
            id: "advanced",
            name: "Advanced",
            threshold: 10_000.0,
            multiplier: 1.3,
            benefits: &["Mentor sessions", "Marketplace discounts"],
        },
        Tier {
            id: "expert",
            name: "Expert",
            threshold: 50_000.0,
            multiplier: 1.5,
            benefits: &["Marketplace discounts", "Early access"],
        },
        Tier {
            id: "master",
            name: "Master",
            threshold: 100_000.0,
            multiplier: 2.0,
            benefits: &["Early access", "Community council"],
        },
    ],
);

/// Tiers by monthly subscription price in USD.
pub static SUBSCRIPTION_TIERS: TierTable = TierTable::new(
    "subscription",
    &[
        Tier {
            id: "free",
            name: "Free",
            threshold: 0.0,
            multiplier: 1.0,
            benefits: &["GPO Call stages"],
        },
        Tier {
            id: "basic",
            name: "Basic",
            threshold: 9.99,
            multiplier: 1.2,
            benefits: &["All adventures"],
        },
        Tier {
            id: "pro",
            name: "Pro",
            threshold: 19.99,
            multiplier: 1.5,
            benefits: &["All adventures", "AI coach"],
        },
        Tier {
            id: "premium",
            name: "Premium",
            threshold: 49.99,
            multiplier: 2.0,
            benefits: &["All adventures", "AI coach", "1:1 mentoring"],
        },
    ],
);

/// Tiers by completed marketplace sales.
pub static SELLER_TIERS: TierTable = TierTable::new(
    "seller",
    &[
        Tier {
            id: "new",
            name: "New Seller",
            threshold: 0.0,
            multiplier: 1.0,
            benefits: &["Basic listing"],
        },
        Tier {
            id: "bronze",
            name: "Bronze",
            threshold: 10.0,
            multiplier: 1.05,
            benefits: &["Featured slot"],
        },
        Tier {
            id: "silver",
            name: "Silver",
            threshold: 50.0,
            multiplier: 1.1,
            benefits: &["Featured slot", "Lower fees"],
        },
        Tier {
            id: "gold",
            name: "Gold",
            threshold: 200.0,
            multiplier: 1.2,
            benefits: &["Lower fees", "Storefront"],
        },
        Tier {
            id: "platinum",
            name: "Platinum",
            threshold: 1_000.0,
            multiplier: 1.3,
            benefits: &["Storefront", "Priority support"],
        },
    ],
);

/// Baraka tier for a balance.
///
/// ```
/// use gpslab_format::get_baraka_tier;
///
/// assert_eq!(get_baraka_tier(999).id, "starter");
/// assert_eq!(get_baraka_tier(1000).id, "beginner");
/// ```
pub fn get_baraka_tier(balance: impl Into<NumberInput>) -> &'static Tier {
    BARAKA_TIERS.tier_for(balance)
}

/// Scale a reward by a tier multiplier, rounded to whole points.
pub fn apply_multiplier(amount: impl Into<NumberInput>, tier: &Tier) -> f64 {
    round_half_up(amount.into().or_zero() * tier.multiplier, 0)
}
