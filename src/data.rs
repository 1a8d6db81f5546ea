// src/data.rs
//
// The record shape the crawler produces and the cache/export row
// mapping for it. One row per show; platforms are packed into a single
// cell as `name|href|region` entries joined by `;`.

use crate::params::WEEKDAY_NAMES;

pub const HEADERS: [&str; 10] = [
    "Id", "Title", "Description", "Weekday", "Start date",
    "Platforms", "Cover", "Year", "Season", "Episodes",
];

pub fn headers() -> Vec<String> {
    HEADERS.iter().map(|h| s!(*h)).collect()
}

/// Cache/export headers plus the live progress column the table shows.
pub fn display_headers() -> Vec<String> {
    let mut h = headers();
    h.push(s!("Aired"));
    h
}

/// One streaming platform link for a show.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Platform {
    pub name: String,
    pub href: String,
    pub region: String,
}

/// One broadcast slot scraped from the season page.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AnimeRecord {
    pub id: String,
    pub title: String,
    pub description: String,
    /// 0 = Sunday .. 6 = Saturday.
    pub weekday: usize,
    /// First-air time, unix milliseconds; 0 when the page had none.
    pub start_date: i64,
    pub platforms: Vec<Platform>,
    pub cover: String,
    pub year: u32,
    pub season: u32,
    pub episode: u32,
}

/// Index into WEEKDAY_NAMES for a site label; unknown labels map to 0.
pub fn weekday_index(label: &str) -> usize {
    WEEKDAY_NAMES.iter().position(|&w| w == label).unwrap_or(0)
}

pub fn weekday_label(day: usize) -> &'static str {
    WEEKDAY_NAMES.get(day).copied().unwrap_or(WEEKDAY_NAMES[0])
}

const MS_PER_WEEK: i64 = 604_800_000;

impl AnimeRecord {
    /// Episodes aired by `now_ms`, clamped to the announced count.
    pub fn episodes_aired(&self, now_ms: i64) -> u32 {
        if self.start_date <= 0 || now_ms < self.start_date {
            return 0;
        }
        let by_week = ((now_ms - self.start_date) / MS_PER_WEEK + 1) as u32;
        by_week.min(self.episode)
    }

    /// Table row: the cache row plus an `aired/total` progress cell.
    pub fn to_display_row(&self, now_ms: i64) -> Vec<String> {
        let mut row = self.to_row();
        row.push(format!("{}/{}", self.episodes_aired(now_ms), self.episode));
        row
    }

    pub fn to_row(&self) -> Vec<String> {
        vec![
            self.id.clone(),
            self.title.clone(),
            self.description.clone(),
            self.weekday.to_string(),
            self.start_date.to_string(),
            encode_platforms(&self.platforms),
            self.cover.clone(),
            self.year.to_string(),
            self.season.to_string(),
            self.episode.to_string(),
        ]
    }

    /// Rebuild a record from a cache row. None when the row is too
    /// short or a numeric cell does not parse (stale cache shape).
    pub fn from_row(row: &[String]) -> Option<Self> {
        if row.len() < HEADERS.len() {
            return None;
        }
        Some(Self {
            id: row[0].clone(),
            title: row[1].clone(),
            description: row[2].clone(),
            weekday: row[3].parse().ok()?,
            start_date: row[4].parse().ok()?,
            platforms: decode_platforms(&row[5]),
            cover: row[6].clone(),
            year: row[7].parse().ok()?,
            season: row[8].parse().ok()?,
            episode: row[9].parse().ok()?,
        })
    }
}

pub fn encode_platforms(platforms: &[Platform]) -> String {
    platforms
        .iter()
        .map(|p| format!("{}|{}|{}", p.name, p.href, p.region))
        .collect::<Vec<_>>()
        .join(";")
}

pub fn decode_platforms(cell: &str) -> Vec<Platform> {
    let mut out = Vec::new();
    for entry in cell.split(';') {
        if entry.is_empty() { continue; }
        let mut parts = entry.splitn(3, '|');
        let name = parts.next().unwrap_or("");
        if name.is_empty() { continue; }
        out.push(Platform {
            name: s!(name),
            href: s!(parts.next().unwrap_or("")),
            region: s!(parts.next().unwrap_or("")),
        });
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record() -> AnimeRecord {
        AnimeRecord {
            id: s!("42"),
            title: s!("Test Anime"),
            description: s!("A show."),
            weekday: 3,
            start_date: 1_700_000_000_000,
            platforms: vec![
                Platform { name: s!("Netflix"), href: s!("https://n/x"), region: s!("US") },
                Platform { name: s!("動畫瘋"), href: s!(), region: s!() },
            ],
            cover: s!("https://img/c.jpg"),
            year: 2026,
            season: 7,
            episode: 12,
        }
    }

    #[test]
    fn weekday_lookup_defaults_to_sunday() {
        assert_eq!(weekday_index("三"), 3);
        assert_eq!(weekday_index("??"), 0);
        assert_eq!(weekday_label(3), "三");
    }

    #[test]
    fn row_round_trip() {
        let r = record();
        assert_eq!(AnimeRecord::from_row(&r.to_row()), Some(r));
    }

    #[test]
    fn short_or_garbled_rows_are_rejected() {
        assert_eq!(AnimeRecord::from_row(&[s!("only"), s!("two")]), None);
        let mut row = record().to_row();
        row[3] = s!("not-a-number");
        assert_eq!(AnimeRecord::from_row(&row), None);
    }

    #[test]
    fn platform_codec_skips_empty_entries() {
        let cell = encode_platforms(&record().platforms);
        assert_eq!(cell, "Netflix|https://n/x|US;動畫瘋||");
        assert_eq!(decode_platforms(&cell), record().platforms);
        assert!(decode_platforms("").is_empty());
        assert!(decode_platforms(";;").is_empty());
    }

    #[test]
    fn episodes_aired_clamps_to_announced_count() {
        let r = record();
        assert_eq!(r.episodes_aired(r.start_date - 1), 0);
        assert_eq!(r.episodes_aired(r.start_date), 1);
        assert_eq!(r.episodes_aired(r.start_date + MS_PER_WEEK), 2);
        assert_eq!(r.episodes_aired(r.start_date + 100 * MS_PER_WEEK), 12);
    }

    #[test]
    fn display_row_appends_progress_cell() {
        let r = record();
        assert_eq!(display_headers().len(), HEADERS.len() + 1);
        assert_eq!(display_headers().last().map(String::as_str), Some("Aired"));

        let row = r.to_display_row(r.start_date + MS_PER_WEEK);
        assert_eq!(row.len(), HEADERS.len() + 1);
        assert_eq!(row.last().map(String::as_str), Some("2/12"));
        assert_eq!(row[..HEADERS.len()], r.to_row()[..]);
    }
}
