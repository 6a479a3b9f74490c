pub mod export;
pub mod settings;
pub mod shifts;
pub mod totals;
