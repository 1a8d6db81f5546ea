// src/cli.rs
use std::env;

use crate::config::options::ExportOptions;
use crate::csv::{to_export_string, Delim};
use crate::{file, scrape, store};

struct Params {
    year: Option<u32>,
    season: Option<u32>,
    out: Option<String>,
    format: Delim,
    include_headers: bool,
    cached: bool,
}

impl Params {
    fn new() -> Self {
        Self {
            year: None,
            season: None,
            out: None,
            format: Delim::Csv,
            include_headers: false,
            cached: false,
        }
    }
}

pub fn run() -> Result<(), Box<dyn std::error::Error>> {
    let params = parse_cli()?;

    let year = params.year.ok_or("Missing --year")?;
    let season = params.season.ok_or("Missing --season")?;

    let ds = if params.cached {
        store::load_season(year, season)?
    } else {
        let records = scrape::fetch_and_extract(year, season)?;
        let ds = store::DataSet::from_records(&records);
        match store::save_season(year, season, &ds) {
            Ok(p) => logf!("Cache: Saved {} → {}", year, p.display()),
            Err(e) => loge!("Cache: Save failed: {}", e),
        }
        ds
    };

    match params.out {
        Some(text) => {
            let mut export = ExportOptions {
                format: params.format,
                include_headers: params.include_headers,
                ..ExportOptions::default()
            };
            export.set_path(&text);
            let path = file::write_export_single(&export, &ds.headers, &ds.rows)?;
            eprintln!("Wrote {} row(s) to {}", ds.row_count(), path.display());
        }
        None => {
            print!(
                "{}",
                to_export_string(&ds.headers, &ds.rows, params.include_headers, params.format.sep())
            );
        }
    }

    Ok(())
}

fn parse_cli() -> Result<Params, Box<dyn std::error::Error>> {
    let mut params = Params::new();
    let mut args = env::args().skip(1);

    while let Some(a) = args.next() {
        match a.as_str() {
            "-y" | "--year" => {
                let v: u32 = args.next().ok_or("Missing value for --year")?.parse()?;
                params.year = Some(v);
            }
            "-s" | "--season" => {
                let v: u32 = args.next().ok_or("Missing value for --season")?.parse()?;
                if !matches!(v, 1 | 4 | 7 | 10) {
                    return Err("Season must be 1, 4, 7 or 10".into());
                }
                params.season = Some(v);
            }
            "-o" | "--out" => params.out = Some(args.next().ok_or("Missing output path")?),
            "--format" => {
                let v = args.next().ok_or("Missing value for --format")?;
                params.format = match v.to_ascii_lowercase().as_str() {
                    "csv" => Delim::Csv,
                    "tsv" => Delim::Tsv,
                    other => return Err(format!("Unknown format: {}", other).into()),
                };
            }
            "--include-headers" => params.include_headers = true,
            "--cached" => params.cached = true,
            "-h" | "--help" => {
                eprintln!("{}", include_str!("cli_help.txt"));
                std::process::exit(0);
            }
            _ => return Err(format!("Unknown arg: {}", a).into()),
        }
    }

    Ok(params)
}
