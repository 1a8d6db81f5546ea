// src/store.rs
//
// Local season cache under .store/seasons/, one CSV per season.
// Loaded at GUI startup, rewritten after every successful scrape.

use std::{fs, io, path::PathBuf};

use crate::csv::{parse_rows, write_row, Delim};
use crate::data::{self, AnimeRecord};
use crate::params;

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct DataSet {
    pub headers: Option<Vec<String>>,
    pub rows: Vec<Vec<String>>,
}

impl DataSet {
    pub fn row_count(&self) -> usize { self.rows.len() }
    pub fn header_count(&self) -> usize {
        self.headers.as_ref().map(|h| h.len()).unwrap_or(0)
    }

    pub fn from_records(records: &[AnimeRecord]) -> Self {
        Self {
            headers: Some(data::headers()),
            rows: records.iter().map(|r| r.to_row()).collect(),
        }
    }

    /// Rows that don't decode (stale cache shape) are dropped.
    pub fn to_records(&self) -> Vec<AnimeRecord> {
        self.rows
            .iter()
            .filter_map(|row| AnimeRecord::from_row(row))
            .collect()
    }
}

pub fn season_path(year: u32, season: u32) -> Option<PathBuf> {
    let stem = params::season_stem(year, season)?;
    Some(params::store_dir().join(join!(stem.as_str(), ".csv")))
}

pub fn save_season(year: u32, season: u32, ds: &DataSet) -> io::Result<PathBuf> {
    let path = season_path(year, season)
        .ok_or_else(|| io::Error::new(io::ErrorKind::InvalidInput, "invalid season"))?;

    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }

    let file = fs::File::create(&path)?;
    let mut writer = io::BufWriter::new(file);
    if let Some(h) = &ds.headers {
        write_row(&mut writer, h, Delim::Csv.sep())?;
    }
    for row in &ds.rows {
        write_row(&mut writer, row, Delim::Csv.sep())?;
    }

    Ok(path)
}

pub fn load_season(year: u32, season: u32) -> Result<DataSet, Box<dyn std::error::Error>> {
    let path = season_path(year, season).ok_or("invalid season")?;
    let text = fs::read_to_string(&path)?;
    let parsed = parse_rows(&text, Delim::Csv.sep());
    Ok(detect_headers(parsed))
}

/// First row starting with "Id" is the header line.
fn detect_headers(mut rows: Vec<Vec<String>>) -> DataSet {
    let has_headers = rows
        .first()
        .and_then(|r| r.first())
        .is_some_and(|c| c.eq_ignore_ascii_case("id"));
    let headers = if has_headers { Some(rows.remove(0)) } else { None };
    DataSet { headers, rows }
}
