//! Activity log records and an in-memory journal.

pub mod journal;
pub mod record;

pub use journal::Journal;
pub use record::ActivityRecord;
