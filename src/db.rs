use rusqlite::{Connection, Result};
use std::path::PathBuf;
use std::sync::Mutex;
use tauri::AppHandle;

pub struct Database {
    pub conn: Mutex<Connection>,
}

impl Database {
    pub fn new(app_handle: &AppHandle) -> Result<Self> {
        let app_dir = app_handle
            .path()
            .app_data_dir()
            .expect("Failed to get app data dir");

        std::fs::create_dir_all(&app_dir).expect("Failed to create app data directory");

        let db_path: PathBuf = app_dir.join("wagebook.db");
        log::info!("Opening database at {}", db_path.display());
        let conn = Connection::open(db_path)?;

        Ok(Database {
            conn: Mutex::new(conn),
        })
    }

    pub fn initialize(&self) -> Result<()> {
        let conn = self.conn.lock().unwrap();

        conn.execute_batch(
            "
            -- Rate configuration, one JSON blob row
            CREATE TABLE IF NOT EXISTS settings (
                id INTEGER PRIMARY KEY CHECK (id = 1),
                data TEXT NOT NULL
            );

            -- One saved shift per calendar day
            CREATE TABLE IF NOT EXISTS shifts (
                date TEXT PRIMARY KEY,
                scheduled_hours REAL NOT NULL DEFAULT 0,
                start_time TEXT NOT NULL DEFAULT '',
                end_time TEXT NOT NULL DEFAULT '',
                holiday TEXT NOT NULL DEFAULT 'none',
                unpaid TEXT NOT NULL DEFAULT 'none',
                lieu TEXT NOT NULL DEFAULT 'none',
                bank_holiday TEXT NOT NULL DEFAULT 'none',
                double_time TEXT NOT NULL DEFAULT 'none',
                sick_hours REAL NOT NULL DEFAULT 0,
                updated_at DATETIME DEFAULT CURRENT_TIMESTAMP
            );
            ",
        )?;

        // Run migrations for existing databases (pass connection to avoid deadlock)
        Self::migrate_conn(&conn)?;

        Ok(())
    }

    pub(crate) fn migrate_conn(conn: &Connection) -> Result<()> {
        // sick_hours arrived after the first release; add it if missing
        let columns: Vec<String> = conn
            .prepare("PRAGMA table_info(shifts)")?
            .query_map([], |row| row.get::<_, String>(1))?
            .filter_map(|r| r.ok())
            .collect();

        if !columns.contains(&"sick_hours".to_string()) {
            log::info!("Migrating shifts table: adding sick_hours");
            conn.execute(
                "ALTER TABLE shifts ADD COLUMN sick_hours REAL NOT NULL DEFAULT 0",
                [],
            )?;
        }

        Ok(())
    }
}

use tauri::Manager;

pub trait DatabaseExt {
    fn db(&self) -> &Database;
}

impl DatabaseExt for AppHandle {
    fn db(&self) -> &Database {
        self.state::<Database>().inner()
    }
}
