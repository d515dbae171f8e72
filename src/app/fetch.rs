use eframe::egui;

use crate::api;

/// Messages for cover loading.
pub enum CoverMsg {
    Ok {
        req_id: u64,
        id: u64,
        w: usize,
        h: usize,
        rgba: Vec<u8>,
    },
    Err {
        req_id: u64,
        id: u64,
    },
}

impl super::ShelfApp {
    /// Start the single fetch of one activation (app start or section switch).
    pub(super) fn start_fetch(&mut self, ctx: &egui::Context) {
        self.net.loading = true;
        // Reset last state so the UI shows the spinner and clears the previous error
        self.net.last_error = None;
        self.net.last_result = None;
        self.images.reset();
        ctx.request_repaint();

        // Bump the request id so a result from a previous activation is ignored
        self.net.counter = self.net.counter.wrapping_add(1);
        let req_id = self.net.counter;

        let tx = self.net.tx.clone();
        let ctx2 = ctx.clone();
        let section = self.section;
        let base_url = super::settings::with_settings(|s| s.base_url.clone());

        super::rt().spawn(async move {
            let res = api::fetch_items(&base_url, section).await;
            if let Err(err) = &res {
                log::error!("Error fetching {}: {}", section.slug(), err);
            }
            let _ = tx.send((req_id, res));
            ctx2.request_repaint();
        });
    }

    /// Schedule background cover downloads for newly arrived items (idempotent).
    pub(super) fn schedule_cover_downloads(&mut self, ctx: &egui::Context) {
        let req_id = self.net.counter;
        let Some(items) = &self.net.last_result else {
            return;
        };
        for item in items {
            let id = item.id;
            if self.images.covers.contains_key(&id) || self.images.covers_loading.contains(&id)
            {
                continue;
            }
            let Some(url) = item.cover_url() else {
                // No resolvable media: the card renders without an image
                continue;
            };
            self.images.covers_loading.insert(id);
            let url = url.to_string();
            let tx = self.images.cover_tx.clone();
            let ctx2 = ctx.clone();

            super::rt().spawn(async move {
                let msg = match api::fetch_image(&url).await {
                    Ok((w, h, rgba)) => CoverMsg::Ok {
                        req_id,
                        id,
                        w,
                        h,
                        rgba,
                    },
                    Err(err) => {
                        log::warn!("cover fetch failed: id={} err={} url={}", id, err, url);
                        CoverMsg::Err { req_id, id }
                    }
                };
                let _ = tx.send(msg);
                ctx2.request_repaint();
            });
        }
    }

    /// Poll incoming async messages and update state accordingly.
    pub(super) fn poll_incoming(&mut self, ctx: &egui::Context) {
        // Listing results
        while let Ok((id, res)) = self.net.rx.try_recv() {
            if id != self.net.counter {
                // Belongs to an activation that was switched away from
                continue;
            }
            self.net.loading = false;
            match res {
                Ok(items) => {
                    // One diagnostic line per card: display title + cover presence
                    for item in &items {
                        let title = crate::views::cards::display_title(item, self.section);
                        log::info!(
                            "{} \"{}\": featured image = {}",
                            self.section.label(),
                            title,
                            if item.cover_url().is_some() { "YES" } else { "NO" }
                        );
                    }
                    self.net.last_error = None;
                    self.net.last_result = Some(items);
                    self.schedule_cover_downloads(ctx);
                }
                Err(e) => {
                    self.net.last_result = None;
                    self.net.last_error = Some(e.to_string());
                }
            }
        }

        // Covers
        while let Ok(msg) = self.images.cover_rx.try_recv() {
            match msg {
                CoverMsg::Ok {
                    req_id,
                    id,
                    w,
                    h,
                    rgba,
                } => {
                    if req_id != self.net.counter {
                        // Downloaded for a section that is no longer shown
                        continue;
                    }
                    let image = egui::ColorImage::from_rgba_unmultiplied([w, h], &rgba);
                    let tex = ctx.load_texture(
                        format!("cover_{}", id),
                        image,
                        egui::TextureOptions::default(),
                    );
                    self.images.covers.insert(id, tex);
                    self.images.covers_loading.remove(&id);
                    log::info!("cover ok: id={} size={}x{}", id, w, h);
                }
                CoverMsg::Err { req_id, id } => {
                    if req_id == self.net.counter {
                        self.images.covers_loading.remove(&id);
                    }
                }
            }
        }
    }
}
