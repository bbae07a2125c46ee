// src/handlers/mod.rs

pub mod health;
pub mod quiz;
