use eframe::egui::{
    self, text::LayoutJob, Color32, FontId, PointerButton, RichText, Sense, TextFormat, Ui,
};
use strum::{EnumCount, IntoEnumIterator};

use crate::localization::translate;
use crate::types::Section;

/// Enums that display through a localization key.
pub trait LocalizableName {
    fn loc_key(&self) -> &'static str;
}

/// Stateless section switcher:
/// - Left: localized variant names in uppercase, separated by " / "
/// - Active variant highlighted; click cycles forward, right-click backward.
/// Returns Some(new_section) if the user changed it this frame.
pub fn section_switch<T>(ui: &mut Ui, current: &T) -> Option<T>
where
    T: IntoEnumIterator + EnumCount + PartialEq + Clone + LocalizableName,
{
    let mut changed_to: Option<T> = None;

    let variants: Vec<T> = T::iter().collect();
    if variants.is_empty() {
        return None;
    }

    // Styling
    let accent = Color32::from_rgb(210, 85, 85);
    let inactive = Color32::from_gray(140);
    let slash_col = Color32::from_rgb(214, 120, 120);
    let font = FontId::proportional(16.0);

    // Build multi-style text: "GAMES / MOVIES"
    let mut job = LayoutJob::default();
    for (i, v) in variants.iter().enumerate() {
        let is_active = *v == *current;
        let color = if is_active { accent } else { inactive };
        let txt = translate(v.loc_key()).to_uppercase();

        job.append(
            &txt,
            0.0,
            TextFormat {
                font_id: font.clone(),
                color,
                ..Default::default()
            },
        );
        if i + 1 < variants.len() {
            job.append(
                " / ",
                0.0,
                TextFormat {
                    font_id: font.clone(),
                    color: slash_col,
                    ..Default::default()
                },
            );
        }
    }

    let response = ui
        .add(egui::Label::new(job).sense(Sense::click()).selectable(false))
        .on_hover_cursor(egui::CursorIcon::PointingHand);

    // Click to cycle (primary forward, secondary backward)
    if response.clicked_by(PointerButton::Primary) {
        let idx = variants.iter().position(|x| x == current).unwrap_or(0);
        let next = (idx + 1) % variants.len();
        changed_to = Some(variants[next].clone());
    } else if response.clicked_by(PointerButton::Secondary) {
        let idx = variants.iter().position(|x| x == current).unwrap_or(0);
        let prev = (idx + variants.len() - 1) % variants.len();
        changed_to = Some(variants[prev].clone());
    }

    changed_to
}

/// Top navigation bar: section switcher on the left, window shortcuts on the
/// right. Returns (new section if changed, logs clicked, settings clicked).
pub fn draw_nav(ctx: &egui::Context, current: &Section) -> (Option<Section>, bool, bool) {
    let mut changed: Option<Section> = None;
    let mut open_logs = false;
    let mut open_settings = false;

    egui::TopBottomPanel::top("nav_bar").show(ctx, |ui| {
        ui.add_space(crate::ui_constants::spacing::SMALL);
        ui.horizontal(|ui| {
            changed = section_switch(ui, current);

            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                if ui
                    .button(RichText::new(translate("nav-settings")).small())
                    .clicked()
                {
                    open_settings = true;
                }
                if ui
                    .button(RichText::new(translate("nav-logs")).small())
                    .clicked()
                {
                    open_logs = true;
                }
            });
        });
        ui.add_space(crate::ui_constants::spacing::SMALL);
    });

    (changed, open_logs, open_settings)
}
