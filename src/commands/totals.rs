use crate::db::DatabaseExt;
use crate::engine;
use crate::models::{MonthTotals, ShiftWithBreakdown};
use tauri::AppHandle;

use super::settings::load_settings;
use super::shifts::{current_month, load_month};

#[tauri::command]
pub fn get_month_totals(app: AppHandle, month: Option<String>) -> Result<MonthTotals, String> {
    let db = app.db();
    let conn = db.conn.lock().map_err(|e| e.to_string())?;

    let month = month.unwrap_or_else(current_month);
    let rows = load_month(&conn, &month)?;
    let rates = load_settings(&conn);

    Ok(engine::aggregate(&rows, &rates))
}

/// Per-day audit lines: each saved row with its computed hour buckets.
#[tauri::command]
pub fn get_row_breakdowns(
    app: AppHandle,
    month: Option<String>,
) -> Result<Vec<ShiftWithBreakdown>, String> {
    let db = app.db();
    let conn = db.conn.lock().map_err(|e| e.to_string())?;

    let month = month.unwrap_or_else(current_month);
    let rows = load_month(&conn, &month)?;

    Ok(rows
        .into_iter()
        .map(|row| {
            let breakdown = engine::breakdown(&row);
            ShiftWithBreakdown { row, breakdown }
        })
        .collect())
}
