//! Persistence layer — append-only SQLite storage for lead records.

pub mod db;

pub use db::{LeadStats, LeadStore, NewLead, RecentLead};
