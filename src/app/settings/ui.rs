// Settings UI: separate egui viewport window with staged inputs.

use eframe::egui;
use lazy_static::lazy_static;
use std::sync::RwLock;

use super::store::{save_settings_to_disk, APP_SETTINGS};
use crate::localization::{self, SupportedLang};

lazy_static! {
    static ref SETTINGS_OPEN: RwLock<bool> = RwLock::new(false);
    // Staged values; applied on Save, discarded on Cancel
    static ref BASE_URL_INPUT: RwLock<String> = RwLock::new(String::new());
    static ref LANGUAGE_INPUT: RwLock<Option<SupportedLang>> = RwLock::new(None);
}

pub fn open_settings() {
    let s = APP_SETTINGS.read().unwrap();
    *BASE_URL_INPUT.write().unwrap() = s.base_url.clone();
    *LANGUAGE_INPUT.write().unwrap() = s.language;
    *SETTINGS_OPEN.write().unwrap() = true;
}

fn language_label(lang: Option<SupportedLang>) -> &'static str {
    match lang {
        None => "Auto",
        Some(l) => l.display_name(),
    }
}

pub fn draw_settings_viewport(ctx: &egui::Context) {
    if !*SETTINGS_OPEN.read().unwrap() {
        return;
    }
    let viewport_id = egui::ViewportId::from_hash_of("settings_window");
    ctx.show_viewport_immediate(
        viewport_id,
        egui::ViewportBuilder::default()
            .with_title("Settings")
            .with_inner_size([480.0, 200.0])
            .with_resizable(true),
        move |ctx, _class| {
            // OS close button acts like Cancel
            if ctx.input(|i| i.viewport().close_requested()) {
                *SETTINGS_OPEN.write().unwrap() = false;
                ctx.send_viewport_cmd(egui::ViewportCommand::Close);
                return;
            }
            egui::CentralPanel::default().show(ctx, |ui| {
                ui.horizontal(|ui| {
                    ui.label("CMS base URL:");
                    let mut val = BASE_URL_INPUT.read().unwrap().clone();
                    if ui
                        .add(
                            egui::TextEdit::singleline(&mut val)
                                .hint_text("https://cms.example")
                                .desired_width(f32::INFINITY),
                        )
                        .changed()
                    {
                        *BASE_URL_INPUT.write().unwrap() = val;
                    }
                });
                ui.add_space(crate::ui_constants::spacing::SMALL);

                ui.horizontal(|ui| {
                    ui.label("Language:");
                    let current = *LANGUAGE_INPUT.read().unwrap();
                    egui::ComboBox::from_id_source("language_select")
                        .selected_text(language_label(current))
                        .show_ui(ui, |ui| {
                            let mut staged = current;
                            ui.selectable_value(&mut staged, None, "Auto");
                            for lang in SupportedLang::ALL {
                                ui.selectable_value(&mut staged, Some(lang), lang.display_name());
                            }
                            if staged != current {
                                *LANGUAGE_INPUT.write().unwrap() = staged;
                            }
                        });
                });

                ui.add_space(crate::ui_constants::spacing::MEDIUM);
                ui.separator();
                ui.add_space(crate::ui_constants::spacing::MEDIUM);

                ui.horizontal(|ui| {
                    if ui.button("Save").clicked() {
                        let base_url = BASE_URL_INPUT.read().unwrap().trim().to_string();
                        let language = *LANGUAGE_INPUT.read().unwrap();
                        {
                            let mut s = APP_SETTINGS.write().unwrap();
                            if !base_url.is_empty() {
                                s.base_url = base_url;
                            }
                            s.language = language;
                        }
                        save_settings_to_disk();
                        match language {
                            Some(lang) => {
                                if let Err(e) = localization::set_current_language(lang) {
                                    log::error!("Language switch failed: {e}");
                                }
                            }
                            None => localization::set_language_auto(),
                        }
                        *SETTINGS_OPEN.write().unwrap() = false;
                        ctx.send_viewport_cmd(egui::ViewportCommand::Close);
                    }
                    if ui.button("Cancel").clicked() {
                        *SETTINGS_OPEN.write().unwrap() = false;
                        ctx.send_viewport_cmd(egui::ViewportCommand::Close);
                    }
                });
            });
        },
    );
}
