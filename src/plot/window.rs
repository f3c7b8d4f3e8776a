//! Native plot window built on eframe/egui_plot.

use eframe::egui;
use egui::Color32;
use egui_plot::{Corner, Legend, Line, MarkerShape, Plot, PlotUi, Points};
use tracing::info;

use super::{error_bar_segments, Chart, Rgb, Series, SeriesStyle, ERROR_BAR};

const MARKER_RADIUS: f32 = 2.5;

fn color(rgb: Rgb) -> Color32 {
    Color32::from_rgb(rgb[0], rgb[1], rgb[2])
}

struct ChartApp {
    chart: Chart,
}

fn draw_series(plot_ui: &mut PlotUi, series: &Series) {
    let c = color(series.color);
    plot_ui.line(
        Line::new(series.label.as_str(), series.points.clone())
            .color(c)
            .width(1.5),
    );
    if series.style == SeriesStyle::Line {
        return;
    }
    plot_ui.points(
        Points::new(series.label.as_str(), series.points.clone())
            .radius(MARKER_RADIUS)
            .shape(MarkerShape::Circle)
            .color(c),
    );
    // Bars share the series label so the legend toggles them together.
    for [a, b] in error_bar_segments(series) {
        plot_ui.line(
            Line::new(series.label.as_str(), vec![a, b])
                .color(color(ERROR_BAR))
                .width(1.0),
        );
    }
}

impl eframe::App for ChartApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        egui::CentralPanel::default().show(ctx, |ui| {
            ui.vertical_centered(|ui| ui.heading(self.chart.title.as_str()));
            let mut plot = Plot::new("chart")
                .x_axis_label(self.chart.x_label.as_str())
                .y_axis_label(self.chart.y_label.as_str());
            if self.chart.legend {
                plot = plot.legend(Legend::default().position(Corner::RightTop));
            }
            plot.show(ui, |plot_ui| {
                for series in &self.chart.series {
                    draw_series(plot_ui, series);
                }
            });
        });
    }
}

/// Opens a window showing `chart`; blocks until it is closed.
pub fn show(chart: Chart) -> eframe::Result<()> {
    info!(title = %chart.title, series = chart.series.len(), "opening plot window");
    let title = chart.title.clone();
    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default().with_inner_size(egui::vec2(960.0, 640.0)),
        ..Default::default()
    };
    eframe::run_native(
        &title,
        options,
        Box::new(|_cc| Ok(Box::new(ChartApp { chart }))),
    )
}
