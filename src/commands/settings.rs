use crate::db::DatabaseExt;
use crate::models::RateSettings;
use rusqlite::Connection;
use tauri::AppHandle;

/// Reads the stored rate configuration. A missing or unreadable row falls
/// back to the defaults rather than erroring.
pub fn load_settings(conn: &Connection) -> RateSettings {
    let stored: Option<String> = conn
        .query_row("SELECT data FROM settings WHERE id = 1", [], |row| {
            row.get(0)
        })
        .ok();

    match stored {
        Some(json) => serde_json::from_str(&json).unwrap_or_else(|e| {
            log::warn!("Stored settings unreadable, using defaults: {}", e);
            RateSettings::default()
        }),
        None => RateSettings::default(),
    }
}

pub fn store_settings(conn: &Connection, settings: &RateSettings) -> Result<(), String> {
    let json = serde_json::to_string(settings).map_err(|e| e.to_string())?;

    conn.execute(
        "INSERT INTO settings (id, data) VALUES (1, ?1)
         ON CONFLICT(id) DO UPDATE SET data = excluded.data",
        [&json],
    )
    .map_err(|e| e.to_string())?;

    Ok(())
}

#[tauri::command]
pub fn get_settings(app: AppHandle) -> Result<RateSettings, String> {
    let db = app.db();
    let conn = db.conn.lock().map_err(|e| e.to_string())?;

    Ok(load_settings(&conn))
}

#[tauri::command]
pub fn update_settings(app: AppHandle, settings: RateSettings) -> Result<RateSettings, String> {
    let db = app.db();
    let conn = db.conn.lock().map_err(|e| e.to_string())?;

    // A negative or otherwise unusable field keeps the stored value
    let merged = settings.merge_valid(&load_settings(&conn));
    store_settings(&conn, &merged)?;

    Ok(merged)
}

#[tauri::command]
pub fn reset_settings(app: AppHandle) -> Result<RateSettings, String> {
    let db = app.db();
    let conn = db.conn.lock().map_err(|e| e.to_string())?;

    let defaults = RateSettings::default();
    store_settings(&conn, &defaults)?;

    Ok(defaults)
}
