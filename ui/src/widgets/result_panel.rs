use egui::{CornerRadius, Margin, RichText, Stroke, Ui};
use imgshare_business::{CopyFeedbackCompute, LinkField, UploadResult};

use crate::utils::colors::{COLOR_GREEN, COLOR_MUTED};

/// What the user did in the result view this frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResultAction {
    None,
    /// The field's value was put on the clipboard.
    Copied(LinkField),
    UploadAnother,
}

/// Preview, copyable links and "Upload Another Image" for a finished upload.
pub fn result_panel(
    ui: &mut Ui,
    result: &UploadResult,
    feedback: &CopyFeedbackCompute,
) -> ResultAction {
    let mut action = ResultAction::None;

    card(ui, |ui| {
        ui.vertical_centered(|ui| {
            ui.add(
                egui::Image::from_uri(result.direct_url())
                    .max_height(240.0)
                    .maintain_aspect_ratio(true)
                    .alt_text("Uploaded result"),
            );
            ui.hyperlink_to("Open full size", result.direct_url());
        });
    });

    ui.add_space(12.0);

    card(ui, |ui| {
        ui.label(RichText::new("Upload Successful").heading().color(COLOR_GREEN));
        ui.label(RichText::new("Your image is live and ready to share.").color(COLOR_MUTED));
        ui.separator();

        for field in LinkField::ALL {
            if link_row(ui, field, field.value(result), feedback.is_copied(field)) {
                action = ResultAction::Copied(field);
            }
            ui.add_space(8.0);
        }
    });

    ui.add_space(12.0);

    let another = egui::Button::new("Upload Another Image").min_size(egui::vec2(ui.available_width(), 36.0));
    if ui.add(another).clicked() {
        action = ResultAction::UploadAnother;
    }

    action
}

fn card(ui: &mut Ui, add_contents: impl FnOnce(&mut Ui)) {
    egui::Frame::new()
        .stroke(Stroke::new(1.0, COLOR_MUTED.gamma_multiply(0.3)))
        .corner_radius(CornerRadius::same(16))
        .inner_margin(Margin::same(16))
        .show(ui, |ui| {
            ui.set_width(ui.available_width());
            add_contents(ui);
        });
}

/// One labelled, read-only link with its copy button. Returns true when the
/// value was copied this frame.
fn link_row(ui: &mut Ui, field: LinkField, value: &str, copied: bool) -> bool {
    ui.label(RichText::new(field.label().to_uppercase()).small().strong());

    let clicked = ui
        .horizontal(|ui| {
            let button = if copied {
                egui::Button::new(RichText::new("Copied").color(egui::Color32::WHITE))
                    .fill(COLOR_GREEN)
            } else {
                egui::Button::new("Copy")
            };

            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                let clicked = ui.add(button).clicked();
                let mut text = value;
                ui.add(
                    egui::TextEdit::singleline(&mut text)
                        .desired_width(f32::INFINITY)
                        .font(egui::TextStyle::Monospace),
                );
                clicked
            })
            .inner
        })
        .inner;

    ui.label(RichText::new(field.help()).small().color(COLOR_MUTED));

    if clicked {
        ui.ctx().copy_text(value.to_owned());
    }
    clicked
}
