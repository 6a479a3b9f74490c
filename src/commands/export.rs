use crate::db::DatabaseExt;
use crate::engine;
use crate::models::{RateSettings, ShiftRow};
use tauri::AppHandle;

use super::settings::load_settings;
use super::shifts::{current_month, load_month};

/// Display formatting only; the engine's numeric contract stays unformatted.
pub fn format_currency(value: f64) -> String {
    format!("£{:.2}", value)
}

/// Builds the export: one audit line per saved day, then a blank line and a
/// bucket/hours/pay summary with a grand total.
pub fn month_csv(rows: &[ShiftRow], rates: &RateSettings) -> String {
    let mut out = String::new();

    out.push_str("date,start,end,scheduled,worked,late,night,holiday,lieu,bank_holiday,double,unpaid,sick\n");
    for row in rows {
        let b = engine::breakdown(row);
        out.push_str(&format!(
            "{},{},{},{:.2},{:.2},{:.2},{:.2},{:.2},{:.2},{:.2},{:.2},{:.2},{:.2}\n",
            row.date,
            row.start_time,
            row.end_time,
            row.scheduled_hours.max(0.0),
            b.worked,
            b.late,
            b.night,
            b.holiday,
            b.lieu,
            b.bank_holiday,
            b.double,
            b.unpaid_full + b.unpaid_part,
            b.sick,
        ));
    }

    let t = engine::aggregate(rows, rates);
    out.push('\n');
    out.push_str("bucket,hours,pay\n");
    out.push_str(&format!(
        "standard,{:.2},{}\n",
        t.standard,
        format_currency(t.standard_pay)
    ));
    out.push_str(&format!(
        "overtime,{:.2},{}\n",
        t.overtime,
        format_currency(t.overtime_pay)
    ));
    out.push_str(&format!(
        "late,{:.2},{}\n",
        t.late,
        format_currency(t.late_pay)
    ));
    out.push_str(&format!(
        "night,{:.2},{}\n",
        t.night,
        format_currency(t.night_pay)
    ));
    out.push_str(&format!(
        "holiday,{:.2},{}\n",
        t.holiday,
        format_currency(t.holiday_pay)
    ));
    out.push_str(&format!(
        "lieu,{:.2},{}\n",
        t.lieu,
        format_currency(t.lieu_pay)
    ));
    out.push_str(&format!(
        "bank_holiday,{:.2},{}\n",
        t.bank_holiday,
        format_currency(t.bank_holiday_pay)
    ));
    out.push_str(&format!(
        "double,{:.2},{}\n",
        t.double,
        format_currency(t.double_pay)
    ));
    out.push_str(&format!(
        "sick,{:.2},{}\n",
        t.sick,
        format_currency(t.sick_pay)
    ));
    out.push_str(&format!("total,,{}\n", format_currency(t.total_pay)));

    out
}

#[tauri::command]
pub fn export_month_csv(
    app: AppHandle,
    month: Option<String>,
    path: String,
) -> Result<(), String> {
    let db = app.db();
    let conn = db.conn.lock().map_err(|e| e.to_string())?;

    let month = month.unwrap_or_else(current_month);
    let rows = load_month(&conn, &month)?;
    let rates = load_settings(&conn);

    std::fs::write(&path, month_csv(&rows, &rates)).map_err(|e| e.to_string())?;
    log::info!("Exported {} shift rows for {} to {}", rows.len(), month, path);

    Ok(())
}
