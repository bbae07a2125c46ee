// src/utils/mod.rs

pub mod cookie;
pub mod html;
