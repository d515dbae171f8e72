// App state split out of app.rs: network fetch wiring and cover textures.

use eframe::egui;
use std::collections::{HashMap, HashSet};
use std::sync::mpsc;

use super::fetch::CoverMsg;
use crate::api::{ContentItem, FetchError};

pub struct NetState {
    /// Request id of the current activation; results tagged with an older id
    /// are stale and dropped.
    pub counter: u64,
    pub loading: bool,
    pub tx: mpsc::Sender<(u64, Result<Vec<ContentItem>, FetchError>)>,
    pub rx: mpsc::Receiver<(u64, Result<Vec<ContentItem>, FetchError>)>,
    pub last_result: Option<Vec<ContentItem>>,
    pub last_error: Option<String>,
}

impl NetState {
    pub fn new() -> Self {
        let (tx, rx) = mpsc::channel();
        Self {
            counter: 0,
            loading: false,
            tx,
            rx,
            last_result: None,
            last_error: None,
        }
    }
}

pub struct ImagesState {
    pub covers: HashMap<u64, egui::TextureHandle>,
    pub covers_loading: HashSet<u64>,
    pub cover_tx: mpsc::Sender<CoverMsg>,
    pub cover_rx: mpsc::Receiver<CoverMsg>,
}

impl ImagesState {
    pub fn new() -> Self {
        let (cover_tx, cover_rx) = mpsc::channel();
        Self {
            covers: HashMap::new(),
            covers_loading: HashSet::new(),
            cover_tx,
            cover_rx,
        }
    }

    /// Drop everything belonging to the previous section.
    pub fn reset(&mut self) {
        self.covers.clear();
        self.covers_loading.clear();
    }
}
