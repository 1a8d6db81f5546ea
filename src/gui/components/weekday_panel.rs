// src/gui/components/weekday_panel.rs
use eframe::egui::Ui;

use crate::params::WEEKDAY_NAMES;

/// Weekday filter list (Sun..Sat). Returns true when the selection
/// changed and the table view needs a rebuild.
pub fn show(ui: &mut Ui, selected: &mut Vec<usize>) -> bool {
    let mut changed = false;

    ui.horizontal(|ui| {
        if ui.button("All").clicked() {
            *selected = (0..WEEKDAY_NAMES.len()).collect();
            changed = true;
        }
        if ui.button("None").clicked() {
            selected.clear();
            changed = true;
        }
    });
    ui.separator();

    for (day, name) in WEEKDAY_NAMES.iter().enumerate() {
        let on = selected.contains(&day);
        if ui.selectable_label(on, format!("週{name}")).clicked() {
            if on {
                selected.retain(|&d| d != day);
            } else {
                selected.push(day);
                selected.sort_unstable();
            }
            changed = true;
        }
    }

    changed
}
