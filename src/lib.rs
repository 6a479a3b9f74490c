mod commands;
mod db;
mod engine;
mod models;


use commands::{export, settings, shifts, totals};
use db::Database;
use tauri::Manager;

#[cfg_attr(mobile, tauri::mobile_entry_point)]
pub fn run() {
    let _ = env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or("info"),
    )
    .try_init();

    tauri::Builder::default()
        .plugin(tauri_plugin_opener::init())
        .plugin(tauri_plugin_dialog::init())
        .plugin(tauri_plugin_fs::init())
        .setup(|app| {
            // Initialize database
            let db = Database::new(&app.handle()).expect("Failed to create database");
            db.initialize().expect("Failed to initialize database");
            app.manage(db);

            Ok(())
        })
        .invoke_handler(tauri::generate_handler![
            // Settings
            settings::get_settings,
            settings::update_settings,
            settings::reset_settings,
            // Shifts
            shifts::get_shifts,
            shifts::get_shift,
            shifts::save_shift,
            shifts::delete_shift,
            // Totals
            totals::get_month_totals,
            totals::get_row_breakdowns,
            // Export
            export::export_month_csv,
        ])
        .run(tauri::generate_context!())
        .expect("error while running tauri application");
}
