// src/lib.rs

#[macro_use]
pub mod macros;
#[macro_use]
pub mod log;

pub mod cli;
pub mod config;
pub mod core;
pub mod data;

pub mod csv;
pub mod file;
pub mod gui;
pub mod params;
pub mod scrape;
pub mod store;
