use std::sync::mpsc::{self, Receiver, Sender};

use chrono::{DateTime, Utc};
use eframe::egui::{self, Context};
use log::error;

use crate::api::ApiClient;

mod messages;
mod state;
mod tasks;
mod ui;

use messages::AppMessage;
use state::{GeneratedDesign, LibraryState, ViewState};

pub struct TextileStudioApp {
    api: ApiClient,
    tx: Sender<AppMessage>,
    rx: Receiver<AppMessage>,
    base_url_input: String,
    info_banner: Option<String>,
    view: ViewState,
    prompt: String,
    generating: bool,
    generate_error: Option<String>,
    // Sequence number of the most recently issued generation request.
    // Completions carrying any older number are dropped.
    request_seq: u64,
    history: Vec<GeneratedDesign>,
    current: Option<usize>,
    library: LibraryState,
}

impl TextileStudioApp {
    pub fn new(_cc: &eframe::CreationContext<'_>) -> Self {
        let default_url = std::env::var("TEXTILE_API_URL")
            .unwrap_or_else(|_| "http://127.0.0.1:8000".to_string());
        Self::with_base_url(default_url)
    }

    fn with_base_url(default_url: String) -> Self {
        let api = ApiClient::new(default_url.clone()).unwrap_or_else(|err| {
            error!("failed to initialise API client: {err}");
            ApiClient::new("http://127.0.0.1:8000").expect("fallback API client")
        });
        let (tx, rx) = mpsc::channel();
        Self {
            api,
            tx,
            rx,
            base_url_input: default_url,
            info_banner: None,
            view: ViewState::Generate,
            prompt: String::new(),
            generating: false,
            generate_error: None,
            request_seq: 0,
            history: Vec::new(),
            current: None,
            library: LibraryState::default(),
        }
    }

    fn spawn_generate(&mut self) {
        // Empty prompts go through as-is; the service accepts them.
        self.request_seq += 1;
        self.generating = true;
        self.generate_error = None;
        self.current = None;
        tasks::generate_design(
            self.api.clone(),
            self.tx.clone(),
            self.request_seq,
            self.prompt.clone(),
        );
    }

    fn spawn_library_search(&mut self) {
        let query = self.library.query.trim().to_string();
        if query.is_empty() {
            self.library.error = Some("Enter a search query".into());
            return;
        }
        self.library.searching = true;
        self.library.error = None;
        self.library.active_query = Some(query.clone());
        tasks::search_library(self.api.clone(), self.tx.clone(), query);
    }

    fn spawn_save_current(&mut self) {
        let Some(index) = self.current else { return };
        let Some(design) = self.history.get(index) else {
            return;
        };
        let suggested = format!("textile-{}.png", design.created_at.format("%Y%m%d-%H%M%S"));
        tasks::save_image_as(self.tx.clone(), design.image.bytes.clone(), suggested);
    }

    fn apply_base_url(&mut self) {
        match self.api.set_base_url(self.base_url_input.clone()) {
            Ok(()) => {
                self.info_banner = Some("API URL updated".into());
                if self.generating {
                    // Invalidate the request still in flight against the old
                    // endpoint; its completion must count as stale.
                    self.request_seq += 1;
                    self.generating = false;
                }
            }
            Err(err) => {
                self.info_banner = Some(format!("Failed to update URL: {err}"));
            }
        }
    }

    fn process_messages(&mut self) {
        messages::process_messages(self);
    }
}

impl eframe::App for TextileStudioApp {
    fn update(&mut self, ctx: &Context, _frame: &mut eframe::Frame) {
        self.process_messages();

        egui::TopBottomPanel::top("top_controls").show(ctx, |ui| {
            ui.horizontal(|ui| {
                ui.label("API Base URL");
                ui.text_edit_singleline(&mut self.base_url_input);
                if ui.button("Apply").clicked() {
                    self.apply_base_url();
                }
                ui.separator();
                if ui
                    .selectable_label(self.view == ViewState::Generate, "Generate")
                    .clicked()
                {
                    self.view = ViewState::Generate;
                }
                if ui
                    .selectable_label(self.view == ViewState::Library, "Design Library")
                    .clicked()
                {
                    self.view = ViewState::Library;
                }
            });

            if let Some(message) = self.info_banner.clone() {
                let mut dismiss = false;
                egui::Frame::group(ui.style())
                    .fill(ui.visuals().extreme_bg_color)
                    .show(ui, |ui| {
                        ui.horizontal(|ui| {
                            ui.label(message.as_str());
                            if ui.button("Dismiss").clicked() {
                                dismiss = true;
                            }
                        });
                    });
                if dismiss {
                    self.info_banner = None;
                }
            }
        });

        egui::CentralPanel::default().show(ctx, |ui| match self.view {
            ViewState::Generate => ui::generate::render_generate(self, ui),
            ViewState::Library => ui::library::render_library(self, ui),
        });
    }
}

fn format_timestamp(ts: &DateTime<Utc>) -> String {
    ts.format("%Y-%m-%d %H:%M UTC").to_string()
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::messages::AppMessage;
    use super::state::LoadedImage;
    use super::*;

    fn test_app() -> TextileStudioApp {
        TextileStudioApp::with_base_url("http://127.0.0.1:8000".to_string())
    }

    fn tiny_image() -> LoadedImage {
        LoadedImage {
            size: [1, 1],
            pixels: vec![0, 0, 0, 255],
            bytes: vec![0],
        }
    }

    #[test]
    fn stale_generation_results_are_discarded() {
        let mut app = test_app();
        app.request_seq = 2;
        app.generating = true;
        app.tx
            .send(AppMessage::GenerationFinished {
                seq: 1,
                prompt: "old".into(),
                result: Ok(tiny_image()),
            })
            .unwrap();
        app.process_messages();
        // The newer request is still outstanding, so nothing may change.
        assert!(app.generating);
        assert!(app.history.is_empty());
        assert_eq!(app.current, None);
    }

    #[test]
    fn matching_generation_result_is_applied() {
        let mut app = test_app();
        app.request_seq = 3;
        app.generating = true;
        app.tx
            .send(AppMessage::GenerationFinished {
                seq: 3,
                prompt: "Gond motif".into(),
                result: Ok(tiny_image()),
            })
            .unwrap();
        app.process_messages();
        assert!(!app.generating);
        assert_eq!(app.history.len(), 1);
        assert_eq!(app.current, Some(0));
        assert_eq!(app.history[0].prompt, "Gond motif");
        assert!(app.generate_error.is_none());
    }

    #[test]
    fn failed_generation_surfaces_error_and_keeps_image_empty() {
        let mut app = test_app();
        app.request_seq = 1;
        app.generating = true;
        app.tx
            .send(AppMessage::GenerationFinished {
                seq: 1,
                prompt: "Ajrakh pattern".into(),
                result: Err("connection refused".into()),
            })
            .unwrap();
        app.process_messages();
        assert!(!app.generating);
        assert_eq!(app.generate_error.as_deref(), Some("connection refused"));
        assert!(app.history.is_empty());
        assert_eq!(app.current, None);
    }

    #[test]
    fn applying_new_base_url_invalidates_inflight_request() {
        let mut app = test_app();
        app.request_seq = 5;
        app.generating = true;
        app.base_url_input = "http://127.0.0.1:9000".into();
        app.apply_base_url();
        assert!(!app.generating);
        assert_eq!(app.request_seq, 6);

        // The old request's completion now counts as stale.
        app.tx
            .send(AppMessage::GenerationFinished {
                seq: 5,
                prompt: "x".into(),
                result: Ok(tiny_image()),
            })
            .unwrap();
        app.process_messages();
        assert!(app.history.is_empty());
        assert_eq!(app.current, None);
    }

    #[test]
    fn superseded_library_query_is_ignored() {
        let mut app = test_app();
        app.library.searching = true;
        app.library.active_query = Some("ikat".into());
        app.tx
            .send(AppMessage::LibrarySearchFinished {
                query: "ajrakh".into(),
                result: Ok(Vec::new()),
            })
            .unwrap();
        app.process_messages();
        assert!(app.library.searching);
        assert!(!app.library.searched);
    }

    #[test]
    fn library_errors_are_surfaced() {
        let mut app = test_app();
        app.library.searching = true;
        app.library.active_query = Some("ajrakh".into());
        app.tx
            .send(AppMessage::LibrarySearchFinished {
                query: "ajrakh".into(),
                result: Err(anyhow::anyhow!("service unavailable")),
            })
            .unwrap();
        app.process_messages();
        assert!(!app.library.searching);
        assert!(app.library.searched);
        assert_eq!(app.library.error.as_deref(), Some("service unavailable"));
        assert!(app.library.results.is_empty());
    }

    #[test]
    fn timestamps_format_as_utc() {
        use chrono::TimeZone;
        let ts = Utc.with_ymd_and_hms(2026, 8, 6, 12, 30, 0).unwrap();
        assert_eq!(format_timestamp(&ts), "2026-08-06 12:30 UTC");
    }
}
