// src/gui/app.rs
use std::time::{SystemTime, UNIX_EPOCH};

use eframe::egui::{CentralPanel, Context, SidePanel, TopBottomPanel};
use eframe::{CreationContext, Frame};

use super::components::{action_bar, data_table, weekday_panel};
use crate::config::state::AppState;
use crate::csv::to_export_string;
use crate::data::{self, AnimeRecord};
use crate::{file, scrape, store};

pub struct App {
    pub state: AppState,
    records: Vec<AnimeRecord>,

    // Table view, rebuilt from `records` whenever the weekday filter
    // or the record set changes.
    pub headers: Option<Vec<String>>,
    pub rows: Vec<Vec<String>>,

    pub status: String,
    pub out_path_text: String,
}

impl App {
    pub fn new(_cc: &CreationContext<'_>) -> Self {
        let state = AppState::default();
        let out_path_text = state.options.export.out_path().display().to_string();

        let mut app = Self {
            state,
            records: Vec::new(),
            headers: None,
            rows: Vec::new(),
            status: s!("Ready."),
            out_path_text,
        };

        // Show last season's data right away if we have it cached.
        let (year, season) = (app.state.options.scrape.year, app.state.options.scrape.season);
        match store::load_season(year, season) {
            Ok(ds) => {
                app.records = ds.to_records();
                app.status = format!("Loaded {} cached title(s).", app.records.len());
                logf!("Cache: Loaded {} record(s) for {}-{:02}", app.records.len(), year, season);
            }
            Err(e) => logd!("Cache: No usable season file ({})", e),
        }
        app.rebuild_view();
        app
    }

    /// Re-derive the table rows from records + weekday filter. Each row
    /// gets an episode-progress cell computed against the wall clock.
    pub fn rebuild_view(&mut self) {
        let now_ms = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_millis() as i64)
            .unwrap_or(0);

        self.headers = Some(data::display_headers());
        self.rows = self
            .records
            .iter()
            .filter(|r| self.state.gui.selected_weekdays.contains(&r.weekday))
            .map(|r| r.to_display_row(now_ms))
            .collect();
    }

    pub fn scrape_now(&mut self) {
        let (year, season) = (self.state.options.scrape.year, self.state.options.scrape.season);
        logf!("Scrape: {}-{:02} starting", year, season);

        match scrape::fetch_and_extract(year, season) {
            Ok(records) => {
                let ds = store::DataSet::from_records(&records);
                match store::save_season(year, season, &ds) {
                    Ok(p) => logf!("Cache: Saved → {}", p.display()),
                    Err(e) => loge!("Cache: Save failed: {}", e),
                }
                self.status = format!("Scraped {} title(s).", records.len());
                self.records = records;
                self.rebuild_view();
            }
            Err(e) => {
                loge!("Scrape: Failed: {}", e);
                self.status = format!("Scrape failed: {}", e);
            }
        }
    }

    pub fn export_now(&mut self) {
        match file::write_export_single(&self.state.options.export, &self.headers, &self.rows) {
            Ok(p) => {
                self.status = format!("Exported {} row(s) to {}", self.rows.len(), p.display());
            }
            Err(e) => {
                loge!("Export: Failed: {}", e);
                self.status = format!("Export failed: {}", e);
            }
        }
    }

    pub fn export_text(&self) -> String {
        let export = &self.state.options.export;
        to_export_string(&self.headers, &self.rows, export.include_headers, export.format.sep())
    }
}

impl eframe::App for App {
    fn update(&mut self, ctx: &Context, _frame: &mut Frame) {
        SidePanel::left("weekday_panel")
            .default_width(110.0)
            .show(ctx, |ui| {
                ui.heading("Weekday");
                ui.separator();
                if weekday_panel::show(ui, &mut self.state.gui.selected_weekdays) {
                    self.rebuild_view();
                }
            });

        TopBottomPanel::bottom("status_bar").show(ctx, |ui| {
            ui.label(&self.status);
        });

        CentralPanel::default().show(ctx, |ui| {
            action_bar::show(ui, self);
            ui.separator();
            data_table::show(ui, &self.headers, &self.rows);
        });
    }
}
