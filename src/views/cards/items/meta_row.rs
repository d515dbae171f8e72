use eframe::egui::{self, Color32, RichText};

use crate::api::CustomFields;

/// Draws one labeled row per custom field, in the order the API returned them.
pub fn draw_meta_rows(ui: &mut egui::Ui, fields: &CustomFields) {
    let col = Color32::from_rgb(170, 170, 170);
    for (name, value) in fields.iter() {
        ui.horizontal(|ui| {
            ui.spacing_mut().item_spacing.x = 8.0;
            ui.label(
                RichText::new(format!("{}:", prettify_label(name)))
                    .small()
                    .strong()
                    .color(col),
            );
            ui.label(RichText::new(value.to_string()).small().color(col));
        });
    }
}

/// "release_year" -> "Release Year": underscores become spaces, the first
/// letter of each word is uppercased.
pub fn prettify_label(name: &str) -> String {
    name.split('_')
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn underscores_become_capitalized_words() {
        assert_eq!(prettify_label("release_year"), "Release Year");
        assert_eq!(prettify_label("age_rating_us"), "Age Rating Us");
    }

    #[test]
    fn single_words_only_get_capitalized() {
        assert_eq!(prettify_label("publisher"), "Publisher");
        assert_eq!(prettify_label("Publisher"), "Publisher");
    }

    #[test]
    fn degenerate_names_do_not_panic() {
        assert_eq!(prettify_label(""), "");
        assert_eq!(prettify_label("_"), " ");
        assert_eq!(prettify_label("a__b"), "A  B");
    }
}
