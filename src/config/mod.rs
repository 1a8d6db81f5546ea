// src/config/mod.rs

pub mod options;
pub mod state;
