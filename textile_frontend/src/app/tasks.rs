use std::sync::mpsc::Sender;
use std::thread;

use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use log::error;

use crate::api::ApiClient;

use super::messages::AppMessage;
use super::state::LoadedImage;

pub fn generate_design(client: ApiClient, tx: Sender<AppMessage>, seq: u64, prompt: String) {
    thread::spawn(move || {
        let result = client
            .generate_design(&prompt)
            .map_err(|err| err.to_string())
            .and_then(|response| decode_generated_image(&response.image));
        if tx
            .send(AppMessage::GenerationFinished {
                seq,
                prompt,
                result,
            })
            .is_err()
        {
            error!("failed to send GenerationFinished message");
        }
    });
}

pub fn search_library(client: ApiClient, tx: Sender<AppMessage>, query: String) {
    thread::spawn(move || {
        let result = client.retrieve_similar(&query);
        if tx
            .send(AppMessage::LibrarySearchFinished { query, result })
            .is_err()
        {
            error!("failed to send LibrarySearchFinished message");
        }
    });
}

pub fn save_image_as(tx: Sender<AppMessage>, bytes: Vec<u8>, suggested_name: String) {
    thread::spawn(move || {
        let result = (|| {
            let mut dialog = rfd::FileDialog::new().set_file_name(&suggested_name);
            if let Some(pictures) = dirs::picture_dir() {
                dialog = dialog.set_directory(pictures);
            }
            if let Some(path) = dialog.save_file() {
                std::fs::write(&path, &bytes).map_err(|err| err.to_string())?;
                Ok(path)
            } else {
                Err("Save cancelled".to_string())
            }
        })();

        if tx.send(AppMessage::ImageSaved { result }).is_err() {
            error!("failed to send ImageSaved message");
        }
    });
}

/// Base64-decodes a generation payload, tolerating embedded whitespace and a
/// `data:*;base64,` wrapper some clients prepend.
pub(crate) fn decode_image_payload(payload: &str) -> Result<Vec<u8>, String> {
    let trimmed = payload.trim();
    let encoded = match trimmed.split_once("base64,") {
        Some((_, rest)) => rest,
        None => trimmed,
    };
    let cleaned: String = encoded.chars().filter(|c| !c.is_whitespace()).collect();
    STANDARD
        .decode(cleaned.as_bytes())
        .map_err(|err| format!("invalid base64 payload: {err}"))
}

pub(crate) fn decode_generated_image(payload: &str) -> Result<LoadedImage, String> {
    let bytes = decode_image_payload(payload)?;
    let dyn_img =
        image::load_from_memory(&bytes).map_err(|err| format!("image decode error: {err}"))?;
    let rgba = dyn_img.to_rgba8();
    let size = [dyn_img.width() as usize, dyn_img.height() as usize];
    Ok(LoadedImage {
        size,
        pixels: rgba.as_flat_samples().as_slice().to_vec(),
        bytes,
    })
}
