// canvas.rs - Frame sink backed by an egui painter

use std::sync::{Mutex, PoisonError};

use eframe::egui;
use egui::{Color32, Rect, Vec2};
use life_core::sink::cell_rects;
use life_core::{CanvasSize, Frame, FrameRate, FrameSink, Grid, State};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Palette {
    pub living: Color32,
    pub dead: Color32,
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            living: Color32::BLACK,
            dead: Color32::WHITE,
        }
    }
}

impl Palette {
    pub fn color(&self, state: State) -> Color32 {
        match state {
            State::Living => self.living,
            State::Dead   => self.dead,
        }
    }
}

#[derive(Default)]
struct Shown {
    canvas: Option<CanvasSize>,
    generation: u64,
    grid: Option<Grid>,
    rate: Option<FrameRate>,
}

/// Holds the most recent generation for the UI thread to paint.
pub struct CanvasSink {
    ctx: egui::Context,
    shown: Mutex<Shown>,
}

impl CanvasSink {
    pub fn new(ctx: egui::Context) -> Self {
        Self { ctx, shown: Mutex::new(Shown::default()) }
    }

    fn shown(&self) -> std::sync::MutexGuard<'_, Shown> {
        self.shown.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn generation(&self) -> u64 {
        self.shown().generation
    }

    pub fn live_cells(&self) -> Option<(usize, usize)> {
        let shown = self.shown();
        shown.grid.as_ref().map(|g| (g.live_count(), g.width() * g.height()))
    }

    /// Text for the frame-rate label, two decimals like `FPS: 19.87`.
    pub fn rate_label(&self) -> String {
        match self.shown().rate {
            Some(FrameRate { fps: Some(fps), .. }) => format!("FPS: {fps:.2}"),
            Some(FrameRate { fps: None, .. }) => "FPS: unbounded".to_owned(),
            None => "FPS: -".to_owned(),
        }
    }

    /// Paint the latest generation, one filled square per cell.
    pub fn paint(&self, ui: &mut egui::Ui, palette: &Palette) {
        let shown = self.shown();
        let (Some(canvas), Some(grid)) = (shown.canvas, shown.grid.as_ref()) else {
            ui.label("Press Start to run the simulation.");
            return;
        };

        let size = Vec2::new(canvas.width_px as f32, canvas.height_px as f32);
        let (response, painter) = ui.allocate_painter(size, egui::Sense::hover());
        let origin = response.rect.min;

        for rect in cell_rects(grid, canvas.pixel_size) {
            let min = origin + Vec2::new(rect.left as f32, rect.top as f32);
            painter.rect_filled(
                Rect::from_min_size(min, Vec2::splat(rect.size as f32)),
                0.0,
                palette.color(rect.state),
            );
        }
    }
}

impl FrameSink for CanvasSink {
    fn resize(&self, canvas: CanvasSize) {
        let mut shown = self.shown();
        shown.canvas = Some(canvas);
        shown.rate = None;
    }

    fn present(&self, frame: Frame<'_>) {
        {
            let mut shown = self.shown();
            shown.generation = frame.generation;
            shown.grid = Some(frame.grid.clone());
        }
        self.ctx.request_repaint();
    }

    fn report_rate(&self, rate: FrameRate) {
        self.shown().rate = Some(rate);
    }
}
