use std::{fs, path::Path};

use base64::{engine::general_purpose::STANDARD, Engine as _};

use crate::error::Result;

pub fn data_url_from_file(path: &Path) -> Result<String> {
    let bytes = fs::read(path)?;
    let mime = mime_guess::from_path(path).first_or_octet_stream();
    log::debug!(
        "Embedding {} ({}, {} bytes)",
        path.display(),
        mime,
        bytes.len()
    );

    Ok(data_url(mime.essence_str(), &bytes))
}

pub fn data_url(mime: &str, bytes: &[u8]) -> String {
    format!("data:{};base64,{}", mime, STANDARD.encode(bytes))
}
