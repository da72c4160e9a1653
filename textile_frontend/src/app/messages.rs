use std::path::PathBuf;

use chrono::Utc;
use log::{error, info};

use crate::models::DesignMatch;

use super::state::{GeneratedDesign, LoadedImage};
use super::TextileStudioApp;

pub enum AppMessage {
    GenerationFinished {
        seq: u64,
        prompt: String,
        result: Result<LoadedImage, String>,
    },
    LibrarySearchFinished {
        query: String,
        result: Result<Vec<DesignMatch>, anyhow::Error>,
    },
    ImageSaved {
        result: Result<PathBuf, String>,
    },
}

pub(super) fn process_messages(app: &mut TextileStudioApp) {
    while let Ok(message) = app.rx.try_recv() {
        match message {
            AppMessage::GenerationFinished {
                seq,
                prompt,
                result,
            } => {
                if seq != app.request_seq {
                    // A newer request supersedes this one; its completion
                    // must not overwrite the image or the loading flag.
                    info!("discarding stale generation result for \"{prompt}\" (seq {seq})");
                    continue;
                }
                app.generating = false;
                match result {
                    Ok(image) => {
                        app.history.push(GeneratedDesign {
                            seq,
                            prompt,
                            created_at: Utc::now(),
                            image,
                            texture: None,
                        });
                        app.current = Some(app.history.len() - 1);
                        app.generate_error = None;
                    }
                    Err(err) => {
                        error!("generation failed: {err}");
                        app.generate_error = Some(err);
                    }
                }
            }
            AppMessage::LibrarySearchFinished { query, result } => {
                if app.library.active_query.as_deref() != Some(query.as_str()) {
                    info!("discarding result for superseded library query \"{query}\"");
                    continue;
                }
                app.library.active_query = None;
                app.library.searching = false;
                app.library.searched = true;
                match result {
                    Ok(results) => {
                        app.library.results = results;
                        app.library.error = None;
                    }
                    Err(err) => {
                        error!("library search failed: {err}");
                        app.library.error = Some(err.to_string());
                        app.library.results.clear();
                    }
                }
            }
            AppMessage::ImageSaved { result } => match result {
                Ok(path) => {
                    app.info_banner = Some(format!("Saved to {}", path.display()));
                }
                Err(err) => {
                    app.info_banner = Some(format!("Failed to save image: {err}"));
                }
            },
        }
    }
}
