//! `data:<mime>[;param]*;base64,<payload>` decoding.

use base64::Engine;

#[derive(Debug, PartialEq, Eq)]
pub struct DataUri {
    pub mime: String,
    pub bytes: Vec<u8>,
}

pub fn parse(uri: &str) -> Result<DataUri, String> {
    let rest = uri
        .strip_prefix("data:")
        .ok_or_else(|| "Expected a data URI".to_string())?;
    let (header, payload) = rest
        .split_once(',')
        .ok_or_else(|| "Data URI has no payload".to_string())?;

    let mut params = header.split(';');
    let mime = params.next().unwrap_or_default().trim().to_ascii_lowercase();
    if !params.any(|p| p.eq_ignore_ascii_case("base64")) {
        return Err("Data URI must be base64 encoded".to_string());
    }
    if mime.is_empty() {
        return Err("Data URI has no MIME type".to_string());
    }

    let bytes = base64::engine::general_purpose::STANDARD
        .decode(payload.trim())
        .map_err(|e| format!("Invalid base64 payload: {e}"))?;
    if bytes.is_empty() {
        return Err("Empty file".to_string());
    }

    Ok(DataUri { mime, bytes })
}
