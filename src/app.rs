// Application state and frame loop. Data fetching lives in the fetch
// submodule, shared state structs in state, window chrome in logs_ui and
// settings.

use eframe::{egui, App};

use crate::api::ContentItem;
use crate::localization::{translate, translate_with};
use crate::types::Section;
use crate::ui_constants::{spacing, CARD_GAP, CARD_WIDTH};
use crate::views::cards::content_card;
use crate::views::nav::{draw_nav, LocalizableName};

mod fetch;
mod logs_ui;
mod runtime;
pub mod settings;
mod state;

pub use fetch::CoverMsg;
pub use runtime::rt;

use state::{ImagesState, NetState};

pub struct ShelfApp {
    section: Section,
    net: NetState,
    images: ImagesState,
}

impl Default for ShelfApp {
    fn default() -> Self {
        Self {
            section: Section::default(),
            net: NetState::new(),
            images: ImagesState::new(),
        }
    }
}

impl App for ShelfApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // Any new logs? ensure we repaint to keep the Logs window fresh
        if crate::logger::take_new_flag() {
            ctx.request_repaint();
        }

        // Incoming listing results and cover textures
        self.poll_incoming(ctx);

        // First activation after startup. A failed fetch does not restart by
        // itself: the next section switch is the retry.
        if self.net.last_result.is_none() && self.net.last_error.is_none() && !self.net.loading {
            self.start_fetch(ctx);
        }

        let (changed, open_logs, open_settings) = draw_nav(ctx, &self.section);
        if let Some(section) = changed {
            // Switching sections is a remount: previous items and covers are
            // dropped and the new section fetches fresh.
            self.section = section;
            self.start_fetch(ctx);
        }
        if open_logs {
            logs_ui::open_logs();
            ctx.request_repaint();
        }
        if open_settings {
            settings::open_settings();
            ctx.request_repaint();
        }

        self.draw_central_panel(ctx);

        // Logs window (separate OS viewport)
        logs_ui::draw_logs_viewport(ctx);

        // Settings window (separate OS viewport)
        settings::draw_settings_viewport(ctx);
    }
}

impl ShelfApp {
    fn draw_central_panel(&mut self, ctx: &egui::Context) {
        let (loading_key, error_key, empty_key) = match self.section {
            Section::Games => ("loading-games", "error-games", "empty-games"),
            Section::Movies => ("loading-movies", "error-movies", "empty-movies"),
        };

        egui::CentralPanel::default().show(ctx, |ui| {
            // Page header with the section title
            ui.vertical_centered(|ui| {
                ui.heading(translate(self.section.loc_key()));
            });
            ui.add_space(spacing::MEDIUM);

            egui::ScrollArea::vertical()
                .auto_shrink([false, false])
                .show(ui, |ui| {
                    let avail_w = ui.available_width().floor();
                    let card_w = CARD_WIDTH;
                    let gap = CARD_GAP;

                    let mut cols = ((avail_w + gap) / (card_w + gap)).floor() as usize;
                    if cols == 0 {
                        cols = 1;
                    }
                    let row_w = (cols as f32) * card_w + ((cols - 1) as f32) * gap;
                    let left_pad = ((avail_w - row_w) / 2.0).max(0.0);

                    if self.net.loading {
                        ui.add_space(spacing::XLARGE);
                        ui.vertical_centered(|ui| {
                            ui.add(egui::Spinner::new());
                            ui.label(translate(loading_key));
                        });
                    } else if let Some(err) = &self.net.last_error {
                        ui.vertical_centered(|ui| {
                            ui.colored_label(
                                egui::Color32::RED,
                                translate_with(error_key, &[("err", err.clone())]),
                            );
                        });
                    } else if let Some(items) = &self.net.last_result {
                        if items.is_empty() {
                            ui.add_space(spacing::XLARGE);
                            ui.vertical_centered(|ui| {
                                ui.label(translate(empty_key));
                            });
                        } else {
                            // Clone so the immutable borrow of net state does
                            // not overlap the grid's borrow of self
                            let items = items.clone();
                            self.draw_cards_grid(ui, &items, cols, left_pad, gap, card_w);
                        }
                    }
                });
        });
    }

    fn draw_cards_grid(
        &mut self,
        ui: &mut egui::Ui,
        items: &[ContentItem],
        cols: usize,
        left_pad: f32,
        gap: f32,
        card_w: f32,
    ) {
        let cols = cols.max(1);
        let total_rows = (items.len() + cols - 1) / cols;

        for r in 0..total_rows {
            ui.horizontal(|ui| {
                ui.add_space(left_pad);
                let base = r * cols;
                for c in 0..cols {
                    if let Some(item) = items.get(base + c) {
                        ui.vertical(|ui| {
                            let cover = self.images.covers.get(&item.id);
                            content_card(ui, item, self.section, card_w, cover);
                        });
                        if c + 1 < cols {
                            ui.add_space(gap);
                        }
                    }
                }
            });
            ui.add_space(gap);
        }
    }
}
