use egui::{CornerRadius, Margin, RichText, Stroke, Ui};

use crate::utils::colors::COLOR_RED;

/// "Upload Failed" banner. Returns true when dismissed.
pub fn error_banner(ui: &mut Ui, message: &str) -> bool {
    let mut dismissed = false;
    egui::Frame::new()
        .stroke(Stroke::new(1.0, COLOR_RED.gamma_multiply(0.5)))
        .fill(COLOR_RED.gamma_multiply(0.1))
        .corner_radius(CornerRadius::same(10))
        .inner_margin(Margin::same(12))
        .show(ui, |ui| {
            ui.set_width(ui.available_width());
            ui.horizontal(|ui| {
                ui.vertical(|ui| {
                    ui.label(RichText::new("Upload Failed").strong().color(COLOR_RED));
                    ui.label(message);
                });
                ui.with_layout(egui::Layout::right_to_left(egui::Align::Min), |ui| {
                    dismissed = ui.small_button("Dismiss").clicked();
                });
            });
        });
    dismissed
}
