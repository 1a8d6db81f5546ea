// src/config/options.rs
use std::ffi::OsString;
use std::path::{Path, PathBuf};

use crate::csv::Delim;
use crate::params::{DEFAULT_FILE_STEM, DEFAULT_OUT_DIR, DEFAULT_SEASON, DEFAULT_YEAR};

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct AppOptions {
    pub scrape: ScrapeOptions,
    pub export: ExportOptions,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ScrapeOptions {
    pub year: u32,
    /// Season starting month: 1, 4, 7 or 10.
    pub season: u32,
}

impl Default for ScrapeOptions {
    fn default() -> Self {
        Self { year: DEFAULT_YEAR, season: DEFAULT_SEASON }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ExportOptions {
    pub format: Delim,
    pub(crate) out_path: OutputPath,
    pub include_headers: bool,
}

impl Default for ExportOptions {
    fn default() -> Self {
        Self {
            format: Delim::Csv,
            out_path: OutputPath::default(),
            include_headers: false,
        }
    }
}

impl ExportOptions {
    pub fn out_path(&self) -> PathBuf {
        let mut path = self.out_path.dir.clone();
        let stem = self.out_path.file_stem.to_string_lossy();
        path.push(join!(stem, ".", self.format.ext()));
        path
    }

    /// Parse GUI text into dir + stem. Ignores a pasted extension; the
    /// format setting controls it.
    pub fn set_path(&mut self, text: &str) {
        let s = text.trim();
        let p = Path::new(s);
        if let Some(parent) = p.parent() {
            self.out_path.dir = parent.to_path_buf();
        }
        if let Some(stem) = p.file_stem() {
            self.out_path.file_stem = stem.to_os_string();
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct OutputPath {
    dir: PathBuf,
    file_stem: OsString, // without extension
}

impl Default for OutputPath {
    fn default() -> Self {
        Self {
            dir: PathBuf::from(DEFAULT_OUT_DIR),
            file_stem: OsString::from(DEFAULT_FILE_STEM),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn out_path_follows_format() {
        let mut export = ExportOptions::default();
        assert!(export.out_path().to_string_lossy().ends_with("schedule.csv"));
        export.format = Delim::Tsv;
        assert!(export.out_path().to_string_lossy().ends_with("schedule.tsv"));
    }

    #[test]
    fn set_path_ignores_pasted_extension() {
        let mut export = ExportOptions::default();
        export.set_path("some/dir/my_list.txt");
        let out = export.out_path();
        assert!(out.starts_with("some/dir"));
        assert!(out.to_string_lossy().ends_with("my_list.csv"));
    }
}
