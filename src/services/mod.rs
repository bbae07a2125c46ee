// src/services/mod.rs

pub mod loader;
pub mod outcome_log;
pub mod scoring;
pub mod session_store;
