use crate::db::DatabaseExt;
use crate::models::{FlagState, ShiftRow};
use rusqlite::{Connection, OptionalExtension};
use tauri::AppHandle;

pub fn current_month() -> String {
    chrono::Local::now().format("%Y-%m").to_string()
}

pub(crate) fn map_shift(row: &rusqlite::Row) -> rusqlite::Result<ShiftRow> {
    Ok(ShiftRow {
        date: row.get(0)?,
        scheduled_hours: row.get(1)?,
        start_time: row.get(2)?,
        end_time: row.get(3)?,
        holiday: FlagState::parse(&row.get::<_, String>(4)?),
        unpaid: FlagState::parse(&row.get::<_, String>(5)?),
        lieu: FlagState::parse(&row.get::<_, String>(6)?),
        bank_holiday: FlagState::parse(&row.get::<_, String>(7)?),
        double: FlagState::parse(&row.get::<_, String>(8)?),
        sick_hours: row.get(9)?,
    })
}

/// Loads every saved row for a "YYYY-MM" month, ordered by date.
pub fn load_month(conn: &Connection, month: &str) -> Result<Vec<ShiftRow>, String> {
    let mut stmt = conn
        .prepare(
            "SELECT date, scheduled_hours, start_time, end_time, holiday, unpaid, lieu, bank_holiday, double_time, sick_hours
             FROM shifts
             WHERE date LIKE ?1
             ORDER BY date",
        )
        .map_err(|e| e.to_string())?;

    let rows = stmt
        .query_map([format!("{}-%", month)], map_shift)
        .map_err(|e| e.to_string())?
        .collect::<Result<Vec<_>, _>>()
        .map_err(|e| e.to_string())?;

    Ok(rows)
}

#[tauri::command]
pub fn get_shifts(app: AppHandle, month: Option<String>) -> Result<Vec<ShiftRow>, String> {
    let db = app.db();
    let conn = db.conn.lock().map_err(|e| e.to_string())?;

    let month = month.unwrap_or_else(current_month);
    load_month(&conn, &month)
}

#[tauri::command]
pub fn get_shift(app: AppHandle, date: String) -> Result<Option<ShiftRow>, String> {
    let db = app.db();
    let conn = db.conn.lock().map_err(|e| e.to_string())?;

    conn.query_row(
        "SELECT date, scheduled_hours, start_time, end_time, holiday, unpaid, lieu, bank_holiday, double_time, sick_hours
         FROM shifts
         WHERE date = ?1",
        [&date],
        map_shift,
    )
    .optional()
    .map_err(|e| e.to_string())
}

#[tauri::command]
pub fn save_shift(app: AppHandle, shift: ShiftRow) -> Result<ShiftRow, String> {
    let db = app.db();
    let conn = db.conn.lock().map_err(|e| e.to_string())?;

    if shift.date.trim().is_empty() {
        return Err("A date is required to save a shift".to_string());
    }

    // Negative or non-finite hours are stored as zero
    let scheduled = if shift.scheduled_hours.is_finite() && shift.scheduled_hours > 0.0 {
        shift.scheduled_hours
    } else {
        0.0
    };
    let sick = if shift.sick_hours.is_finite() && shift.sick_hours > 0.0 {
        shift.sick_hours
    } else {
        0.0
    };

    conn.execute(
        "INSERT INTO shifts (date, scheduled_hours, start_time, end_time, holiday, unpaid, lieu, bank_holiday, double_time, sick_hours)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10)
         ON CONFLICT(date) DO UPDATE SET
             scheduled_hours = excluded.scheduled_hours,
             start_time = excluded.start_time,
             end_time = excluded.end_time,
             holiday = excluded.holiday,
             unpaid = excluded.unpaid,
             lieu = excluded.lieu,
             bank_holiday = excluded.bank_holiday,
             double_time = excluded.double_time,
             sick_hours = excluded.sick_hours,
             updated_at = CURRENT_TIMESTAMP",
        rusqlite::params![
            shift.date.trim(),
            scheduled,
            shift.start_time,
            shift.end_time,
            shift.holiday.as_str(),
            shift.unpaid.as_str(),
            shift.lieu.as_str(),
            shift.bank_holiday.as_str(),
            shift.double.as_str(),
            sick,
        ],
    )
    .map_err(|e| e.to_string())?;

    conn.query_row(
        "SELECT date, scheduled_hours, start_time, end_time, holiday, unpaid, lieu, bank_holiday, double_time, sick_hours
         FROM shifts
         WHERE date = ?1",
        [shift.date.trim()],
        map_shift,
    )
    .map_err(|e| e.to_string())
}

#[tauri::command]
pub fn delete_shift(app: AppHandle, date: String) -> Result<(), String> {
    let db = app.db();
    let conn = db.conn.lock().map_err(|e| e.to_string())?;

    conn.execute("DELETE FROM shifts WHERE date = ?1", [&date])
        .map_err(|e| e.to_string())?;

    Ok(())
}
