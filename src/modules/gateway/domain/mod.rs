pub mod entities;

pub use entities::{MediaRecord, ReviewRecord, UserProfile, WatchlistEntry};
