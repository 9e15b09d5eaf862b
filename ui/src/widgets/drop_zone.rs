use egui::{Color32, CornerRadius, CursorIcon, Margin, Response, RichText, Sense, Stroke, Ui};

use crate::utils::colors::{COLOR_ACCENT, COLOR_MUTED};

/// Accessible name of the clickable drop zone.
pub const DROP_ZONE_LABEL: &str = "Choose an image";

/// The upload target.
///
/// Shows the spinner while `uploading`; otherwise the instructions, with an
/// accent border while files hover the window. The returned response is
/// clickable only when not uploading.
pub fn drop_zone(ui: &mut Ui, uploading: bool, dragging: bool) -> Response {
    let (border, fill) = if dragging {
        (COLOR_ACCENT, COLOR_ACCENT.gamma_multiply(0.12))
    } else {
        (COLOR_MUTED, Color32::TRANSPARENT)
    };

    let inner = egui::Frame::new()
        .stroke(Stroke::new(2.0, border))
        .fill(fill)
        .corner_radius(CornerRadius::same(16))
        .inner_margin(Margin::same(32))
        .show(ui, |ui| {
            ui.set_width(ui.available_width());
            ui.set_min_height(200.0);
            ui.vertical_centered(|ui| {
                ui.add_space(24.0);
                if uploading {
                    ui.add(egui::Spinner::new().size(36.0));
                    ui.add_space(12.0);
                    ui.label(RichText::new("Uploading...").strong().color(COLOR_ACCENT));
                    ui.label(
                        RichText::new("Please wait while we process your image")
                            .color(COLOR_MUTED),
                    );
                } else {
                    ui.label(
                        RichText::new("Click to upload or drag and drop")
                            .size(18.0)
                            .strong(),
                    );
                    ui.label(RichText::new("SVG, PNG, JPG or GIF (max. 32MB)").color(COLOR_MUTED));
                    ui.add_space(16.0);
                    ui.label(RichText::new("cmd/ctrl + v to paste").monospace().small());
                }
            });
        });

    if uploading {
        return inner.response;
    }

    let response = inner.response.interact(Sense::click());
    response.widget_info(|| {
        egui::WidgetInfo::labeled(egui::WidgetType::Button, true, DROP_ZONE_LABEL)
    });
    response.on_hover_cursor(CursorIcon::PointingHand)
}
