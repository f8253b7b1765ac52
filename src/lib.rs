//! Lead Respond — instant rule-based lead response service.

pub mod config;
pub mod delivery;
pub mod error;
pub mod pipeline;
pub mod store;
pub mod web;
