// src/gui/components/action_bar.rs
use eframe::egui::{ComboBox, DragValue, TextEdit, Ui};

use crate::csv::Delim;
use crate::gui::app::App;

fn season_label(season: u32) -> &'static str {
    match season {
        1 => "1 月 (冬)",
        4 => "4 月 (春)",
        7 => "7 月 (夏)",
        _ => "10 月 (秋)",
    }
}

pub fn show(ui: &mut Ui, app: &mut App) {
    ui.horizontal(|ui| {
        ui.label("Year");
        ui.add(DragValue::new(&mut app.state.options.scrape.year).range(2000..=2100));

        ui.label("Season");
        ComboBox::from_id_salt("season_select")
            .selected_text(season_label(app.state.options.scrape.season))
            .show_ui(ui, |ui| {
                for s in [1u32, 4, 7, 10] {
                    ui.selectable_value(&mut app.state.options.scrape.season, s, season_label(s));
                }
            });

        if ui.button("SCRAPE").clicked() {
            app.status = s!("Scraping…");
            app.scrape_now();
        }
    });

    ui.horizontal(|ui| {
        for (delim, label) in [(Delim::Csv, "CSV"), (Delim::Tsv, "TSV")] {
            ui.selectable_value(&mut app.state.options.export.format, delim, label);
        }
        ui.checkbox(&mut app.state.options.export.include_headers, "Headers");

        let edit = ui.add(TextEdit::singleline(&mut app.out_path_text).desired_width(240.0));
        if edit.lost_focus() {
            app.state.options.export.set_path(&app.out_path_text);
            // Reflect the normalized path (format decides the extension).
            app.out_path_text = app.state.options.export.out_path().display().to_string();
        }

        if ui.button("Copy").clicked() {
            ui.ctx().copy_text(app.export_text());
            app.status = s!("Copied to clipboard.");
        }
        if ui.button("Export").clicked() {
            app.export_now();
        }
    });
}
