use serde::{Deserialize, Serialize};

/// Three-state absence/adjustment flag on a shift row.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum FlagState {
    #[default]
    None,
    Full,
    Part,
}

impl FlagState {
    pub fn as_str(&self) -> &'static str {
        match self {
            FlagState::None => "none",
            FlagState::Full => "full",
            FlagState::Part => "part",
        }
    }

    /// Lenient parse for values coming out of the database; anything
    /// unrecognised reads as `None`.
    pub fn parse(s: &str) -> FlagState {
        match s {
            "full" => FlagState::Full,
            "part" => FlagState::Part,
            _ => FlagState::None,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct ShiftRow {
    /// "YYYY-MM-DD", one row per day.
    pub date: String,
    pub scheduled_hours: f64,
    /// "HH:MM" wall clock; empty or malformed means no clock time recorded.
    pub start_time: String,
    /// "HH:MM"; end <= start means the shift runs past midnight.
    pub end_time: String,
    #[serde(default)]
    pub holiday: FlagState,
    #[serde(default)]
    pub unpaid: FlagState,
    #[serde(default)]
    pub lieu: FlagState,
    #[serde(default)]
    pub bank_holiday: FlagState,
    #[serde(default)]
    pub double: FlagState,
    #[serde(default)]
    pub sick_hours: f64,
}

/// Hourly rates and the monthly overtime threshold. Edited on the settings
/// screen, stored as a JSON blob in the settings table.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct RateSettings {
    pub base_rate: f64,
    /// Qualifying hours in a month before overtime starts accruing.
    pub ot_threshold: f64,
    /// Added on top of base_rate for overtime hours.
    pub ot_premium: f64,
    pub late_premium: f64,
    pub night_premium: f64,
    /// Multiplier on base_rate for double-time hours (not a replacement rate).
    pub double_rate: f64,
    /// Flat hourly rate for holiday hours; set per month, not derived from base.
    pub holiday_rate: f64,
}

impl Default for RateSettings {
    fn default() -> Self {
        RateSettings {
            base_rate: 12.50,
            ot_threshold: 160.0,
            ot_premium: 3.00,
            late_premium: 0.35,
            night_premium: 0.75,
            double_rate: 2.0,
            holiday_rate: 12.50,
        }
    }
}

impl RateSettings {
    /// Takes each field from `self` when it is a usable rate (finite and
    /// non-negative), otherwise keeps the value from `fallback`. Used when
    /// saving edits so a bad field never clobbers a good stored value.
    pub fn merge_valid(&self, fallback: &RateSettings) -> RateSettings {
        fn pick(new: f64, old: f64) -> f64 {
            if new.is_finite() && new >= 0.0 {
                new
            } else {
                old
            }
        }

        RateSettings {
            base_rate: pick(self.base_rate, fallback.base_rate),
            ot_threshold: pick(self.ot_threshold, fallback.ot_threshold),
            ot_premium: pick(self.ot_premium, fallback.ot_premium),
            late_premium: pick(self.late_premium, fallback.late_premium),
            night_premium: pick(self.night_premium, fallback.night_premium),
            double_rate: pick(self.double_rate, fallback.double_rate),
            holiday_rate: pick(self.holiday_rate, fallback.holiday_rate),
        }
    }
}

/// Hour buckets for a single day, all >= 0, rounded to 2 decimal places.
#[derive(Debug, Serialize, Deserialize, Clone, Default, PartialEq)]
pub struct RowBreakdown {
    /// Physically worked hours (zero on a full-absence day).
    pub worked: f64,
    /// Hours counting toward the monthly overtime threshold.
    pub qualifying: f64,
    /// Worked hours overlapping 14:00-22:00.
    pub late: f64,
    /// Worked hours overlapping 22:00-06:00.
    pub night: f64,
    pub holiday: f64,
    pub lieu: f64,
    pub bank_holiday: f64,
    /// Double-time hours; a subset of worked, never added to qualifying again.
    pub double: f64,
    pub unpaid_full: f64,
    pub unpaid_part: f64,
    pub sick: f64,
}

/// A saved row together with its computed breakdown, for the audit/export view.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct ShiftWithBreakdown {
    pub row: ShiftRow,
    pub breakdown: RowBreakdown,
}

/// Derived month projection: summed hour buckets, the standard/overtime
/// split, and pay per paid bucket. Never persisted, always recomputed.
#[derive(Debug, Serialize, Deserialize, Clone, Default, PartialEq)]
pub struct MonthTotals {
    pub worked: f64,
    pub qualifying: f64,
    pub standard: f64,
    pub overtime: f64,
    pub late: f64,
    pub night: f64,
    pub holiday: f64,
    pub lieu: f64,
    pub bank_holiday: f64,
    pub double: f64,
    pub unpaid_full: f64,
    pub unpaid_part: f64,
    pub sick: f64,

    pub standard_pay: f64,
    pub overtime_pay: f64,
    pub sick_pay: f64,
    pub late_pay: f64,
    pub night_pay: f64,
    pub lieu_pay: f64,
    pub bank_holiday_pay: f64,
    pub double_pay: f64,
    pub holiday_pay: f64,
    pub total_pay: f64,
}
