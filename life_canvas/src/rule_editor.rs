// rule_editor.rs - Clickable table of the 18 rule entries

use eframe::egui;
use egui::{Sense, Stroke, Vec2};
use life_core::rule::NEIGHBOR_COUNTS;
use life_core::{RuleHandle, RuleTable, State};

use crate::canvas::Palette;

const SWATCH: f32 = 16.0;

/// Draw the rule table; clicking an entry flips it through `rules`.
///
/// The table is read fresh every frame, so presets loaded elsewhere show up
/// on the next repaint.
pub fn show(ui: &mut egui::Ui, rules: &RuleHandle, palette: &Palette) {
    let table = rules.snapshot();

    egui::Grid::new("rule_editor")
        .striped(true)
        .spacing([12.0, 4.0])
        .show(ui, |ui| {
            for title in ["State", "AL. Nbrs.", "Next state", "State", "AL. Nbrs.", "Next state"] {
                ui.strong(title);
            }
            ui.end_row();

            for count in 0..NEIGHBOR_COUNTS {
                for (state, label) in [(State::Living, "ALIVE"), (State::Dead, "DEAD")] {
                    ui.label(if count == 0 { label } else { "" });
                    ui.label(count.to_string());
                    if swatch(ui, entry(&table, state, count), palette).clicked() {
                        toggle(rules, state, count);
                    }
                }
                ui.end_row();
            }
        });

    ui.horizontal(|ui| {
        swatch(ui, State::Dead, palette);
        ui.label("is DEAD cell");
        ui.add_space(12.0);
        swatch(ui, State::Living, palette);
        ui.label("is LIVING cell");
    });
}

fn entry(table: &RuleTable, state: State, count: usize) -> State {
    table.entry(state, count).unwrap_or(State::Dead)
}

fn toggle(rules: &RuleHandle, state: State, count: usize) {
    if let Err(err) = rules.toggle(state, count) {
        tracing::warn!(%err, "rule edit rejected");
    }
}

fn swatch(ui: &mut egui::Ui, state: State, palette: &Palette) -> egui::Response {
    let (rect, response) = ui.allocate_exact_size(Vec2::splat(SWATCH), Sense::click());
    let painter = ui.painter();
    painter.rect_filled(rect, 2.0, palette.color(state));
    painter.rect_stroke(rect, 2.0, Stroke::new(1.0, egui::Color32::GRAY));
    response
}
