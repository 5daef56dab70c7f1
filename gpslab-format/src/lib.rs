//! Locale-aware formatting for GPS Lab
//!
//! Every formatter takes an explicit options struct and never fails:
//! invalid numbers format as zero, invalid dates as an empty string, and
//! unsupported locales as `en-US`.
//!
//! - **Numbers**: grouping, percentages, compact notation, ordinals, ranges
//! - **Dates**: calendar dates, clock times, relative time, deadlines
//! - **Durations**: `2 hours 30 minutes` / `2h 30m`
//! - **Currency**: fiat, Baraka and PSB balances, tier tables, covenant splits
//! - **Text**: case conversion, truncation, slugs, encouragement messages
//!
//! # Quick Start
//!
//! ```rust
//! use gpslab_format::prelude::*;
//! use gpslab_i18n::Locale;
//!
//! let ko = Locale::ko_kr();
//! assert_eq!(format_compact(15000, &CompactOptions::new().locale(ko.clone())), "1.5만");
//! assert_eq!(format_ordinal(3, &ko), "3번째");
//! assert_eq!(format_currency(1234.56, "KRW", &CurrencyOptions::default()), "₩1,235");
//! assert_eq!(format_baraka(1234, &PointOptions::default()), "1,234 β");
//! ```

mod covenant;
mod currency;
mod date;
mod duration;
mod input;
mod message;
mod number;
mod relative;
mod text;
mod tier;

pub use covenant::{
    CovenantAllocation, CovenantDisplay, CovenantPurpose, CovenantReturn, DEFAULT_COVENANT_RATE,
    format_covenant_return,
};
pub use currency::{
    ChangeDisplay, ChangeTone, Currency, CurrencyOptions, PointOptions, format_baraka,
    format_baraka_change, format_currency, format_points_change, format_psb,
    parse_currency_string,
};
pub use date::{
    DateOptions, DateStyle, TimeStyle, format_date, format_date_time, format_time, month_name,
    weekday_name,
};
pub use duration::{DurationOptions, DurationParts, DurationStyle, format_duration};
pub use input::{DateInput, NumberInput};
pub use message::{
    MessageOptions, MessageStyle, generate_message, generate_message_with, message_templates,
};
pub use number::{
    CompactOptions, NumberOptions, PercentOptions, format_clamped, format_compact, format_decimal,
    format_number, format_ordinal, format_percentage, format_progress, format_progress_ratio,
    format_range, format_signed, round_half_up,
};
pub use relative::{
    DeadlineInfo, ExpirationInfo, RelativeOptions, Urgency, format_deadline, format_expiration,
    format_relative_day, format_relative_time, format_relative_time_at,
};
pub use text::{
    ACRONYMS, SlugOptions, TruncateOptions, capitalize, slugify, to_camel_case, to_constant_case,
    to_kebab_case, to_pascal_case, to_sentence_case, to_snake_case, to_title_case, truncate,
    truncate_words,
};
pub use tier::{
    BARAKA_TIERS, SELLER_TIERS, SUBSCRIPTION_TIERS, Tier, TierProgress, TierTable,
    apply_multiplier, get_baraka_tier,
};

/// Prelude for common imports
pub mod prelude {
    pub use crate::{
        CompactOptions, CurrencyOptions, DateOptions, DateStyle, DurationOptions, MessageOptions,
        NumberOptions, PercentOptions, PointOptions, RelativeOptions, SlugOptions,
        TruncateOptions, format_baraka, format_compact, format_currency, format_date,
        format_duration, format_number, format_ordinal, format_percentage,
        format_relative_time, generate_message, slugify, truncate,
    };
}
