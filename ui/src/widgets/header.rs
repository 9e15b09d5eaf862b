use egui::{RichText, Ui};

use crate::utils::colors::COLOR_MUTED;

pub const HOSTING_HOME: &str = "https://imgbb.com";

/// App title and the hosting attribution link.
///
/// Returns true when the title was clicked, which takes the user back to
/// the start screen.
pub fn header(ui: &mut Ui) -> bool {
    let mut home_clicked = false;
    ui.horizontal(|ui| {
        let title = ui
            .add(egui::Button::new(RichText::new("ImgShare").heading().strong()).frame(false))
            .on_hover_cursor(egui::CursorIcon::PointingHand);
        home_clicked = title.clicked();
        ui.label(RichText::new("INSTANT HOSTING").small().color(COLOR_MUTED));

        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
            ui.hyperlink_to("Powered by ImgBB", HOSTING_HOME);
        });
    });
    home_clicked
}
