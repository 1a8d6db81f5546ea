// src/scrape/mod.rs
pub mod seasons;

pub use seasons::{crawl_doc, fetch_and_extract};
