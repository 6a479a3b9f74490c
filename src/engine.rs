//! Pure shift-breakdown and pay-aggregation core.
//!
//! Everything here is side-effect free: rows and rates come in, hour
//! buckets and pay come out. Persistence and formatting live in the
//! command layer.

use crate::models::{FlagState, MonthTotals, RateSettings, RowBreakdown, ShiftRow};
use chrono::{NaiveTime, Timelike};

const MINUTES_PER_DAY: i64 = 24 * 60;

/// Late premium window, 14:00-22:00, in minutes from midnight.
const LATE_WINDOW: (i64, i64) = (14 * 60, 22 * 60);
/// Night premium window, 22:00-06:00 the next day.
const NIGHT_WINDOW: (i64, i64) = (22 * 60, 30 * 60);

/// Absence categories that can claim a day (or its unworked remainder).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AbsenceKind {
    Unpaid,
    Holiday,
    Lieu,
    BankHoliday,
}

/// Precedence when conflicting flags are set on one row: the first kind in
/// this list with a matching flag wins, the rest get nothing.
pub const ABSENCE_PRECEDENCE: [AbsenceKind; 4] = [
    AbsenceKind::Unpaid,
    AbsenceKind::Holiday,
    AbsenceKind::Lieu,
    AbsenceKind::BankHoliday,
];

fn absence_flag(row: &ShiftRow, kind: AbsenceKind) -> FlagState {
    match kind {
        AbsenceKind::Unpaid => row.unpaid,
        AbsenceKind::Holiday => row.holiday,
        AbsenceKind::Lieu => row.lieu,
        AbsenceKind::BankHoliday => row.bank_holiday,
    }
}

/// First absence kind, in precedence order, whose flag matches `state`.
pub fn winning_absence(row: &ShiftRow, state: FlagState) -> Option<AbsenceKind> {
    ABSENCE_PRECEDENCE
        .iter()
        .copied()
        .find(|kind| absence_flag(row, *kind) == state)
}

/// Parses an "HH:MM" wall-clock string into minutes from midnight.
/// Anything malformed or out of range reads as no time recorded.
pub fn parse_time(s: &str) -> Option<i64> {
    let t = NaiveTime::parse_from_str(s.trim(), "%H:%M").ok()?;
    Some(i64::from(t.hour()) * 60 + i64::from(t.minute()))
}

/// Minutes between clock-in and clock-out; end at or before start means the
/// shift runs past midnight, so a day is added.
fn shift_minutes(start: i64, end: i64) -> i64 {
    if end <= start {
        end + MINUTES_PER_DAY - start
    } else {
        end - start
    }
}

fn overlap(a0: i64, a1: i64, b0: i64, b1: i64) -> i64 {
    (a1.min(b1) - a0.max(b0)).max(0)
}

/// Late/night minutes of a span starting at `start` minutes from midnight
/// and running for `dur` minutes. Windows are checked one day either side
/// so overnight spans land in the right buckets whichever side of midnight
/// they fall on.
fn premium_minutes(start: i64, dur: i64) -> (i64, i64) {
    let end = start + dur;
    let mut late = 0;
    let mut night = 0;
    for day in -1..=2 {
        let off = day * MINUTES_PER_DAY;
        late += overlap(start, end, LATE_WINDOW.0 + off, LATE_WINDOW.1 + off);
        night += overlap(start, end, NIGHT_WINDOW.0 + off, NIGHT_WINDOW.1 + off);
    }
    (late, night)
}

/// Negative or non-finite hour/rate inputs are treated as zero.
fn clamp(x: f64) -> f64 {
    if x.is_finite() && x > 0.0 {
        x
    } else {
        0.0
    }
}

fn round2(x: f64) -> f64 {
    (x * 100.0).round() / 100.0
}

/// Full-precision breakdown; `breakdown` rounds on top of this and the
/// aggregator sums these directly so rounding never compounds per row.
fn breakdown_raw(row: &ShiftRow) -> RowBreakdown {
    let scheduled = clamp(row.scheduled_hours);

    let start = parse_time(&row.start_time);
    let end = parse_time(&row.end_time);
    let clocked_min = match (start, end) {
        (Some(s), Some(e)) => shift_minutes(s, e),
        _ => 0,
    };
    let clocked = clocked_min as f64 / 60.0;

    // Basis for absence and protected-premium accounting.
    let base = if scheduled > 0.0 { scheduled } else { clocked };

    let full = winning_absence(row, FlagState::Full);
    let worked = if full.is_some() { 0.0 } else { clocked };

    let mut b = RowBreakdown {
        worked,
        sick: clamp(row.sick_hours),
        ..RowBreakdown::default()
    };

    match full {
        Some(AbsenceKind::Unpaid) => b.unpaid_full = base,
        Some(AbsenceKind::Holiday) => b.holiday = base,
        Some(AbsenceKind::Lieu) => b.lieu = base,
        Some(AbsenceKind::BankHoliday) => b.bank_holiday = base,
        None => {
            if let Some(kind) = winning_absence(row, FlagState::Part) {
                let remainder = (base - worked).max(0.0);
                match kind {
                    AbsenceKind::Unpaid => b.unpaid_part = remainder,
                    AbsenceKind::Holiday => b.holiday = remainder,
                    AbsenceKind::Lieu => b.lieu = remainder,
                    AbsenceKind::BankHoliday => b.bank_holiday = remainder,
                }
            }
        }
    }

    // Double time is a pay multiplier on worked time, not an absence: a full
    // flag books the whole base length, a part flag at most half of it, and
    // neither touches the worked figure. A day claimed by a full absence has
    // no worked time to double.
    b.double = if full.is_some() {
        0.0
    } else {
        match row.double {
            FlagState::Full => base,
            FlagState::Part => worked.min(base / 2.0),
            FlagState::None => 0.0,
        }
    };

    // Premiums: a fully unpaid or fully on-holiday day earns none. Lieu,
    // bank-holiday and double days keep the credit they would have earned
    // over the scheduled window even when not clocked to the end.
    let blocked = row.unpaid == FlagState::Full || row.holiday == FlagState::Full;
    let protected = !blocked
        && (row.lieu != FlagState::None
            || row.bank_holiday != FlagState::None
            || row.double != FlagState::None);

    if !blocked {
        if let Some(s) = start {
            let window_min = if protected {
                (base * 60.0).round() as i64
            } else {
                clocked_min
            };
            if window_min > 0 && (protected || worked > 0.0) {
                let (late, night) = premium_minutes(s, window_min);
                b.late = late as f64 / 60.0;
                b.night = night as f64 / 60.0;
            }
        }
    }

    // Unpaid hours never qualify; double is already inside worked.
    b.qualifying = b.worked + b.holiday + b.lieu + b.bank_holiday;

    b
}

/// Computes the hour buckets for a single day. Pure and total: malformed
/// times or bad numbers degrade to zero instead of failing.
pub fn breakdown(row: &ShiftRow) -> RowBreakdown {
    let b = breakdown_raw(row);
    RowBreakdown {
        worked: round2(b.worked),
        qualifying: round2(b.qualifying),
        late: round2(b.late),
        night: round2(b.night),
        holiday: round2(b.holiday),
        lieu: round2(b.lieu),
        bank_holiday: round2(b.bank_holiday),
        double: round2(b.double),
        unpaid_full: round2(b.unpaid_full),
        unpaid_part: round2(b.unpaid_part),
        sick: round2(b.sick),
    }
}

/// Reduces a month of rows into summed hour buckets, the standard/overtime
/// split against the qualifying threshold, and pay per bucket. Totals are
/// order-independent; rows are re-derived at full precision and rounded
/// once on the way out.
pub fn aggregate(rows: &[ShiftRow], rates: &RateSettings) -> MonthTotals {
    let base_rate = clamp(rates.base_rate);
    let ot_threshold = clamp(rates.ot_threshold);
    let ot_premium = clamp(rates.ot_premium);
    let late_premium = clamp(rates.late_premium);
    let night_premium = clamp(rates.night_premium);
    let double_rate = clamp(rates.double_rate);
    let holiday_rate = clamp(rates.holiday_rate);

    let mut t = MonthTotals::default();
    for row in rows {
        let b = breakdown_raw(row);
        t.worked += b.worked;
        t.qualifying += b.qualifying;
        t.late += b.late;
        t.night += b.night;
        t.holiday += b.holiday;
        t.lieu += b.lieu;
        t.bank_holiday += b.bank_holiday;
        t.double += b.double;
        t.unpaid_full += b.unpaid_full;
        t.unpaid_part += b.unpaid_part;
        t.sick += b.sick;
    }

    // Overtime is only paid on hours physically worked and not already paid
    // at double rate.
    let raw_overtime = (t.qualifying - ot_threshold).max(0.0);
    let worked_eligible = (t.worked - t.double).max(0.0);
    t.overtime = worked_eligible.min(raw_overtime);
    t.standard = (worked_eligible - t.overtime).max(0.0);

    t.worked = round2(t.worked);
    t.qualifying = round2(t.qualifying);
    t.standard = round2(t.standard);
    t.overtime = round2(t.overtime);
    t.late = round2(t.late);
    t.night = round2(t.night);
    t.holiday = round2(t.holiday);
    t.lieu = round2(t.lieu);
    t.bank_holiday = round2(t.bank_holiday);
    t.double = round2(t.double);
    t.unpaid_full = round2(t.unpaid_full);
    t.unpaid_part = round2(t.unpaid_part);
    t.sick = round2(t.sick);

    t.standard_pay = round2(t.standard * base_rate);
    t.overtime_pay = round2(t.overtime * (base_rate + ot_premium));
    t.sick_pay = round2(t.sick * base_rate);
    t.late_pay = round2(t.late * late_premium);
    t.night_pay = round2(t.night * night_premium);
    t.lieu_pay = round2(t.lieu * base_rate);
    t.bank_holiday_pay = round2(t.bank_holiday * base_rate);
    t.double_pay = round2(t.double * base_rate * double_rate);
    t.holiday_pay = round2(t.holiday * holiday_rate);

    t.total_pay = round2(
        t.standard_pay
            + t.overtime_pay
            + t.sick_pay
            + t.late_pay
            + t.night_pay
            + t.lieu_pay
            + t.bank_holiday_pay
            + t.double_pay
            + t.holiday_pay,
    );

    t
}
