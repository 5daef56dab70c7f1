//! Covenant Returns
//!
//! A share of every payment is returned to the community fund and split
//! across fixed purposes. Each amount is rounded to cents on its own, so
//! the allocations may differ from the return by a cent.

use serde::Serialize;

use crate::currency::{CurrencyOptions, format_currency};
use crate::input::NumberInput;
use crate::number::round_half_up;

pub const DEFAULT_COVENANT_RATE: f64 = 0.5;

/// Where returned funds go.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum CovenantPurpose {
    Community,
    Education,
    Reserve,
    Rewards,
}

impl CovenantPurpose {
    pub const ALL: [CovenantPurpose; 4] = [
        Self::Community,
        Self::Education,
        Self::Reserve,
        Self::Rewards,
    ];

    /// Fraction of the return allocated to this purpose.
    pub fn share(&self) -> f64 {
        match self {
            Self::Community => 0.30,
            Self::Education => 0.20,
            Self::Reserve => 0.20,
            Self::Rewards => 0.30,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Community => "community",
            Self::Education => "education",
            Self::Reserve => "reserve",
            Self::Rewards => "rewards",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CovenantAllocation {
    pub purpose: CovenantPurpose,
    pub share: f64,
    pub amount: f64,
}

/// A payment split into its returned and net parts.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CovenantReturn {
    pub total: f64,
    pub rate: f64,
    pub return_amount: f64,
    pub net_payment: f64,
    pub breakdown: Vec<CovenantAllocation>,
}

/// Formatted amounts of a [`CovenantReturn`].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CovenantDisplay {
    pub total: String,
    pub return_amount: String,
    pub net_payment: String,
    pub breakdown: Vec<(CovenantPurpose, String)>,
}

impl CovenantReturn {
    /// Sum of the rounded allocations.
    pub fn allocated_total(&self) -> f64 {
        self.breakdown.iter().map(|a| a.amount).sum()
    }

    pub fn allocation(&self, purpose: CovenantPurpose) -> Option<&CovenantAllocation> {
        self.breakdown.iter().find(|a| a.purpose == purpose)
    }

    /// Render every amount in `currency`.
    pub fn display(&self, currency: &str, options: &CurrencyOptions) -> CovenantDisplay {
        CovenantDisplay {
            total: format_currency(self.total, currency, options),
            return_amount: format_currency(self.return_amount, currency, options),
            net_payment: format_currency(self.net_payment, currency, options),
            breakdown: self
                .breakdown
                .iter()
                .map(|a| (a.purpose, format_currency(a.amount, currency, options)))
                .collect(),
        }
    }
}

/// Split `total` by the covenant `rate` (default 0.5, clamped to `[0, 1]`).
///
/// ```
/// use gpslab_format::format_covenant_return;
///
/// let split = format_covenant_return(100, None);
/// assert_eq!(split.return_amount, 50.0);
/// assert_eq!(split.net_payment, 50.0);
/// assert_eq!(split.breakdown.len(), 4);
/// ```
pub fn format_covenant_return(total: impl Into<NumberInput>, rate: Option<f64>) -> CovenantReturn {
    let total = total.into().or_zero();
    let rate = rate
        .filter(|r| r.is_finite())
        .unwrap_or(DEFAULT_COVENANT_RATE)
        .clamp(0.0, 1.0);

    let return_amount = round_half_up(total * rate, 2);
    let net_payment = round_half_up(total - return_amount, 2);

    let breakdown = CovenantPurpose::ALL
        .iter()
        .map(|purpose| CovenantAllocation {
            purpose: *purpose,
            share: purpose.share(),
            amount: round_half_up(return_amount * purpose.share(), 2),
        })
        .collect();

    CovenantReturn {
        total,
        rate,
        return_amount,
        net_payment,
        breakdown,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_shares_sum_to_one() {
        let sum: f64 = CovenantPurpose::ALL.iter().map(|p| p.share()).sum();
        assert!((sum - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_even_split() {
        let split = format_covenant_return(100, Some(0.5));
        assert_eq!(split.return_amount, 50.0);
        assert_eq!(split.net_payment, 50.0);
        assert_eq!(split.allocation(CovenantPurpose::Community).unwrap().amount, 15.0);
        assert_eq!(split.allocation(CovenantPurpose::Education).unwrap().amount, 10.0);
        assert_eq!(split.allocation(CovenantPurpose::Reserve).unwrap().amount, 10.0);
        assert_eq!(split.allocation(CovenantPurpose::Rewards).unwrap().amount, 15.0);
        assert!((split.allocated_total() - 50.0).abs() < 0.01);
    }

    #[test]
    fn test_rate_handling() {
        assert_eq!(format_covenant_return(100, None).rate, 0.5);
        assert_eq!(format_covenant_return(100, Some(f64::NAN)).rate, 0.5);
        assert_eq!(format_covenant_return(100, Some(1.7)).rate, 1.0);
        assert_eq!(format_covenant_return(100, Some(-0.2)).return_amount, 0.0);

        let quarter = format_covenant_return(80, Some(0.25));
        assert_eq!(quarter.return_amount, 20.0);
        assert_eq!(quarter.net_payment, 60.0);
    }

    #[test]
    fn test_independent_rounding() {
        // 0.05 returned: 0.015 and 0.01 per purpose, rounded separately.
        let split = format_covenant_return(0.1, Some(0.5));
        assert_eq!(split.return_amount, 0.05);
        let amounts: Vec<f64> = split.breakdown.iter().map(|a| a.amount).collect();
        assert_eq!(amounts, vec![0.02, 0.01, 0.01, 0.02]);
        assert!((split.allocated_total() - 0.06).abs() < 1e-9);
    }

    #[test]
    fn test_invalid_total() {
        let split = format_covenant_return("abc", None);
        assert_eq!(split.total, 0.0);
        assert_eq!(split.return_amount, 0.0);
        assert_eq!(split.allocated_total(), 0.0);
    }

    #[test]
    fn test_display() {
        let split = format_covenant_return(1000, Some(0.4));
        let shown = split.display("USD", &CurrencyOptions::default());
        assert_eq!(shown.total, "$1,000.00");
        assert_eq!(shown.return_amount, "$400.00");
        assert_eq!(shown.net_payment, "$600.00");
        assert_eq!(shown.breakdown[0], (CovenantPurpose::Community, "$120.00".to_string()));

        let won = split.display("KRW", &CurrencyOptions::default());
        assert_eq!(won.net_payment, "₩600");
    }
}
