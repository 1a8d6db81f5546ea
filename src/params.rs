// src/params.rs
use std::path::PathBuf;

pub const BASE_URL: &str = "https://acgsecrets.hk/bangumi/";
pub const USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64)";

pub const DEFAULT_OUT_DIR: &str = "out";
pub const DEFAULT_FILE_STEM: &str = "schedule";
pub const STORE_DIR: &str = ".store";
pub const SEASONS_SUBDIR: &str = "seasons";

pub const DEFAULT_YEAR: u32 = 2026;
pub const DEFAULT_SEASON: u32 = 7;

/// Broadcast weekday labels as the schedule site prints them (Sun..Sat).
pub const WEEKDAY_NAMES: [&str; 7] = ["日", "一", "二", "三", "四", "五", "六"];

/// Cards carry this `datetoday` value for shows carrying over from the
/// previous season; those default to a two-cour episode count.
pub const CONTINUING_LABEL: &str = "跨季續播";

/// Seasons are keyed by their starting month: 1, 4, 7, 10.
pub fn season_code(season: u32) -> Option<&'static str> {
    match season {
        1 => Some("01"),  // Winter
        4 => Some("04"),  // Spring
        7 => Some("07"),  // Summer
        10 => Some("10"), // Fall
        _ => None,
    }
}

pub fn season_url(year: u32, season: u32) -> Option<String> {
    let code = season_code(season)?;
    Some(format!("{BASE_URL}{year}{code}"))
}

pub fn season_stem(year: u32, season: u32) -> Option<String> {
    let code = season_code(season)?;
    Some(format!("{year}{code}"))
}

pub fn store_dir() -> PathBuf {
    PathBuf::from(STORE_DIR).join(SEASONS_SUBDIR)
}
