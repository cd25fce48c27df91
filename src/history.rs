pub mod cursor;
pub mod manager;


pub use cursor::HistoryCursor;
pub use manager::{HistoryEntry, HistoryManager};
