// ui.rs - Configuration form, rule editor, controls and canvas

use eframe::egui;
use egui::Color32;
use life_core::patterns::PATTERNS;

use crate::app::CanvasApp;
use crate::rule_editor;

impl eframe::App for CanvasApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        egui::SidePanel::left("settings").resizable(false).show(ctx, |ui| {
            egui::ScrollArea::vertical().show(ui, |ui| {
                self.settings_ui(ui);
                ui.separator();

                ui.heading("Rules");
                ui.horizontal(|ui| {
                    if ui.button("Conway's rule").clicked() {
                        self.load_conway_rule();
                    }
                    if ui.button("🎲 Random rule").clicked() {
                        self.load_random_rule();
                    }
                });
                rule_editor::show(ui, &self.rules, &self.palette);
            });
        });

        egui::CentralPanel::default().show(ctx, |ui| {
            ui.horizontal(|ui| {
                if ui.button("▶ Start").clicked() {
                    self.start();
                }
                if ui.button("⏹ Stop").clicked() {
                    self.stop();
                }

                ui.separator();
                ui.label(format!("Generation: {}", self.sink.generation()));
                ui.separator();
                ui.label(self.sink.rate_label());

                if let Some((live, total)) = self.sink.live_cells() {
                    ui.separator();
                    ui.label(format!(
                        "Live cells: {} ({:.1}%)",
                        live,
                        live as f32 / total as f32 * 100.0
                    ));
                }
            });

            if let Some(status) = &self.status {
                ui.colored_label(Color32::RED, status);
            }

            ui.separator();

            egui::ScrollArea::both().show(ui, |ui| {
                self.sink.paint(ui, &self.palette);
            });
        });
    }
}

impl CanvasApp {
    fn settings_ui(&mut self, ui: &mut egui::Ui) {
        ui.heading("World");

        egui::Grid::new("world_settings").num_columns(2).show(ui, |ui| {
            ui.label("Width:");
            ui.add(egui::DragValue::new(&mut self.config.width).clamp_range(1..=2000));
            ui.end_row();

            ui.label("Height:");
            ui.add(egui::DragValue::new(&mut self.config.height).clamp_range(1..=2000));
            ui.end_row();

            ui.label("Time step (ms):");
            ui.add(egui::DragValue::new(&mut self.config.time_step_ms).clamp_range(0..=10_000));
            ui.end_row();

            ui.label("Pixel size:");
            ui.add(egui::DragValue::new(&mut self.config.pixel_size).clamp_range(1..=64));
            ui.end_row();
        });

        ui.horizontal(|ui| {
            ui.label("Live:");
            ui.color_edit_button_srgba(&mut self.palette.living);
            ui.label("Dead:");
            ui.color_edit_button_srgba(&mut self.palette.dead);
        });

        ui.separator();
        ui.heading("Start points");

        ui.horizontal(|ui| {
            egui::ComboBox::from_id_source("pattern_selector")
                .selected_text(PATTERNS[self.selected_pattern].name)
                .show_ui(ui, |ui| {
                    for (i, pattern) in PATTERNS.iter().enumerate() {
                        ui.selectable_value(&mut self.selected_pattern, i, pattern.name);
                    }
                });

            if ui.button("Apply pattern").clicked() {
                self.apply_pattern();
            }
            if ui.button("🎲 Random points").clicked() {
                self.generate_random_seed_points();
            }
        });

        ui.add(
            egui::TextEdit::multiline(&mut self.config.seed_points)
                .code_editor()
                .desired_rows(8)
                .hint_text("[x, y], [x, y], ..."),
        );
    }
}
