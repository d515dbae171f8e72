use eframe::egui::{self, Color32, RichText, Rounding, Stroke};

use super::meta_row::draw_meta_rows;
use crate::api::{rendered_text, ContentItem};
use crate::types::Section;
use crate::ui_constants::{card, spacing};

/// Display title for a card: the rendered title interpreted as markup text,
/// or "<Label> <id>" when the CMS sent nothing usable.
pub fn display_title(item: &ContentItem, section: Section) -> String {
    let raw = item.title.rendered.trim();
    if raw.is_empty() {
        format!("{} {}", section.label(), item.id)
    } else {
        rendered_text(raw)
    }
}

/// Fixed-width card: title, optional cover, custom-field rows.
/// Strictly constrained to `width` so rows form a proper grid.
/// - `cover_tex`: decoded cover texture, if its download already finished
pub fn content_card(
    ui: &mut egui::Ui,
    item: &ContentItem,
    section: Section,
    width: f32,
    cover_tex: Option<&egui::TextureHandle>,
) {
    let fill = Color32::from_rgb(36, 36, 36);
    let stroke = Stroke::new(1.0, Color32::from_rgb(64, 64, 64));

    // Hard limit the card width inside the row.
    ui.set_min_width(width);
    ui.set_max_width(width);

    egui::Frame::none()
        .fill(fill)
        .stroke(stroke)
        .rounding(Rounding::same(card::ROUNDING))
        .inner_margin(egui::Margin::symmetric(card::INNER_MARGIN, card::INNER_MARGIN))
        .show(ui, |ui| {
            // Constrain inner content to card width minus inner margins.
            let inner_w = width - card::INNER_MARGIN * 2.0;
            ui.set_width(inner_w);

            // Cover only when its texture is ready; no placeholder otherwise
            if let Some(tex) = cover_tex {
                let size = tex.size_vec2();
                let h = if size.x > 0.0 {
                    inner_w * size.y / size.x
                } else {
                    0.0
                };
                ui.add(
                    egui::Image::new((tex.id(), egui::vec2(inner_w, h)))
                        .rounding(Rounding::same(card::META_ROUNDING)),
                );
                ui.add_space(card::POST_COVER_GAP);
            }

            ui.label(
                RichText::new(display_title(item, section))
                    .heading()
                    .color(Color32::from_rgb(230, 230, 230)),
            );

            // Custom-field rows on a dark rounded plaque, below the title
            if let Some(fields) = &item.acf {
                if !fields.is_empty() {
                    ui.add_space(spacing::SMALL);
                    egui::Frame::none()
                        .fill(Color32::from_rgba_premultiplied(28, 28, 28, 180))
                        .rounding(Rounding::same(card::META_ROUNDING))
                        .inner_margin(egui::Margin::symmetric(
                            card::META_MARGIN_H,
                            card::META_MARGIN_V,
                        ))
                        .show(ui, |ui| {
                            draw_meta_rows(ui, fields);
                        });
                }
            }
        });
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item_from(json: &str) -> ContentItem {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn empty_title_falls_back_to_label_and_id() {
        let item = item_from(r#"{ "id": 42, "title": { "rendered": "" } }"#);
        assert_eq!(display_title(&item, Section::Games), "Game 42");
        assert_eq!(display_title(&item, Section::Movies), "Movie 42");
    }

    #[test]
    fn missing_title_falls_back_too() {
        let item = item_from(r#"{ "id": 7 }"#);
        assert_eq!(display_title(&item, Section::Movies), "Movie 7");
    }

    #[test]
    fn rendered_title_is_interpreted_not_escaped() {
        let item = item_from(
            r#"{ "id": 1, "title": { "rendered": "Miner&#039;s <em>Haven</em>" } }"#,
        );
        assert_eq!(display_title(&item, Section::Games), "Miner's Haven");
    }

    #[test]
    fn whitespace_only_title_counts_as_empty() {
        let item = item_from(r#"{ "id": 5, "title": { "rendered": "   " } }"#);
        assert_eq!(display_title(&item, Section::Games), "Game 5");
    }
}
