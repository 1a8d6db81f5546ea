// tests/store_roundtrip.rs
//
// Season cache round trip on disk, keyed far in the future so it never
// collides with real cached data.

use std::fs;

use ani_scrape::data::{AnimeRecord, Platform};
use ani_scrape::store::{self, DataSet};

fn sample_records() -> Vec<AnimeRecord> {
    vec![
        AnimeRecord {
            id: "1".into(),
            title: "Quoted, \"Title\"".into(),
            description: "Multi\nline".into(),
            weekday: 0,
            start_date: 1_700_000_000_000,
            platforms: vec![Platform {
                name: "Netflix".into(),
                href: "https://n/1".into(),
                region: "US".into(),
            }],
            cover: "https://img/1.jpg".into(),
            year: 2099,
            season: 1,
            episode: 12,
        },
        AnimeRecord {
            id: "2".into(),
            title: "無題".into(),
            description: String::new(),
            weekday: 6,
            start_date: 0,
            platforms: Vec::new(),
            cover: String::new(),
            year: 2099,
            season: 1,
            episode: 24,
        },
    ]
}

#[test]
fn save_then_load_season_cache() {
    let records = sample_records();
    let ds = DataSet::from_records(&records);

    let path = store::save_season(2099, 1, &ds).unwrap();
    let loaded = store::load_season(2099, 1).unwrap();
    fs::remove_file(&path).unwrap();

    assert_eq!(loaded.header_count(), ds.header_count());
    assert_eq!(loaded.row_count(), 2);
    assert_eq!(loaded.to_records(), records);
}

#[test]
fn loading_missing_season_fails() {
    assert!(store::load_season(2098, 10).is_err());
    assert!(store::load_season(2099, 3).is_err()); // bad season month
}
