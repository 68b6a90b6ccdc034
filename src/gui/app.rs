//! Chart Viewer Application
//! Native window showing one comparison chart, opened after the file is written.

use crate::charts::ChartPlotter;
use crate::config::{ChartStyle, ChartVariant};
use crate::data::SeriesCollection;
use egui::RichText;

/// Window holding a single series collection.
pub struct ViewerApp {
    collection: SeriesCollection,
    variant: ChartVariant,
    style: ChartStyle,
}

impl ViewerApp {
    pub fn new(
        cc: &eframe::CreationContext<'_>,
        collection: SeriesCollection,
        variant: ChartVariant,
        style: ChartStyle,
    ) -> Self {
        cc.egui_ctx.set_visuals(egui::Visuals::light());
        Self {
            collection,
            variant,
            style,
        }
    }
}

impl eframe::App for ViewerApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        egui::CentralPanel::default().show(ctx, |ui| {
            if self.collection.is_empty() {
                ui.centered_and_justified(|ui| {
                    ui.label(RichText::new("No Data").size(20.0));
                });
                return;
            }

            if self.variant.is_histogram() {
                ChartPlotter::draw_histogram_grid(ui, &self.collection, self.variant, &self.style);
            } else {
                ChartPlotter::draw_line_chart(ui, &self.collection, self.variant, &self.style);
            }
        });
    }
}

/// Open the viewer and block until the window is closed.
pub fn run_viewer(
    collection: SeriesCollection,
    variant: ChartVariant,
    style: ChartStyle,
) -> eframe::Result<()> {
    let title = format!("passplot - {}", collection.axis_label);
    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([style.width as f32, style.height as f32])
            .with_min_inner_size([400.0, 300.0])
            .with_title(title.clone()),
        ..Default::default()
    };

    log::debug!("Opening viewer for {} series", collection.len());
    eframe::run_native(
        &title,
        options,
        Box::new(move |cc| Ok(Box::new(ViewerApp::new(cc, collection, variant, style)))),
    )
}
