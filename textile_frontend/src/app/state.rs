use chrono::{DateTime, Utc};
use eframe::egui::TextureHandle;

use crate::models::DesignMatch;

#[derive(PartialEq)]
pub enum ViewState {
    Generate,
    Library,
}

/// Decoded RGBA pixels plus the image bytes as the server sent them,
/// kept around so export writes the original file unchanged.
pub struct LoadedImage {
    pub size: [usize; 2],
    pub pixels: Vec<u8>,
    pub bytes: Vec<u8>,
}

pub struct GeneratedDesign {
    pub seq: u64,
    pub prompt: String,
    pub created_at: DateTime<Utc>,
    pub image: LoadedImage,
    pub texture: Option<TextureHandle>,
}

#[derive(Default)]
pub struct LibraryState {
    pub query: String,
    /// Query the in-flight search was dispatched with, if any. A completion
    /// for any other query is stale and gets dropped.
    pub active_query: Option<String>,
    pub searching: bool,
    pub searched: bool,
    pub error: Option<String>,
    pub results: Vec<DesignMatch>,
}
