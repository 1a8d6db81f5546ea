// src/gui/components/data_table.rs
use eframe::egui::Ui;
use egui_extras::{Column, TableBuilder};

pub fn show(ui: &mut Ui, headers: &Option<Vec<String>>, rows: &[Vec<String>]) {
    let ncols = headers
        .as_ref()
        .map(|h| h.len())
        .or_else(|| rows.first().map(|r| r.len()))
        .unwrap_or(0);

    if ncols == 0 {
        ui.label("No data yet. Pick a season and hit SCRAPE.");
        return;
    }

    let mut table = TableBuilder::new(ui).striped(true).resizable(true);
    for _ in 0..ncols {
        table = table.column(Column::auto().at_least(60.0));
    }

    table
        .header(20.0, |mut header| {
            if let Some(h) = headers {
                for cell in h {
                    header.col(|ui| {
                        ui.strong(cell);
                    });
                }
            }
        })
        .body(|body| {
            body.rows(18.0, rows.len(), |mut row| {
                let r = &rows[row.index()];
                for cell in r {
                    row.col(|ui| {
                        ui.label(cell);
                    });
                }
            });
        });
}
