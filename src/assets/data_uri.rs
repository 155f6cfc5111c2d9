use base64::Engine as _;

use crate::foundation::error::{BackdropError, BackdropResult};

/// Decoded `data:` URI.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DataUri {
    /// Declared media type (`text/plain` when omitted).
    pub media_type: String,
    /// Payload bytes.
    pub bytes: Vec<u8>,
}

/// Whether `source` is a `data:` URI.
pub fn is_data_uri(source: &str) -> bool {
    source
        .get(..5)
        .is_some_and(|p| p.eq_ignore_ascii_case("data:"))
}

/// Build a base64 `data:` URI.
pub fn encode_data_uri(media_type: &str, bytes: &[u8]) -> String {
    let payload = base64::engine::general_purpose::STANDARD.encode(bytes);
    format!("data:{media_type};base64,{payload}")
}

/// Parse `data:[<media type>][;param...][;base64],<payload>`.
///
/// Non-base64 payloads are percent-decoded.
pub fn parse_data_uri(source: &str) -> BackdropResult<DataUri> {
    if !is_data_uri(source) {
        return Err(BackdropError::decode("not a data: URI"));
    }
    let rest = &source[5..];
    let (meta, payload) = rest
        .split_once(',')
        .ok_or_else(|| BackdropError::decode("data: URI is missing ','"))?;

    let mut params = meta.split(';');
    let media_type = params
        .next()
        .map(str::trim)
        .filter(|m| !m.is_empty())
        .unwrap_or("text/plain")
        .to_ascii_lowercase();
    let is_base64 = params.any(|p| p.trim().eq_ignore_ascii_case("base64"));

    let bytes = if is_base64 {
        let compact: String = payload.chars().filter(|c| !c.is_whitespace()).collect();
        base64::engine::general_purpose::STANDARD
            .decode(compact.as_bytes())
            .map_err(|e| BackdropError::decode(format!("base64 payload: {e}")))?
    } else {
        percent_decode(payload)?
    };

    Ok(DataUri { media_type, bytes })
}

fn percent_decode(s: &str) -> BackdropResult<Vec<u8>> {
    let b = s.as_bytes();
    let mut out = Vec::with_capacity(b.len());
    let mut i = 0usize;
    while i < b.len() {
        if b[i] == b'%' {
            let hex = s
                .get(i + 1..i + 3)
                .and_then(|h| u8::from_str_radix(h, 16).ok())
                .ok_or_else(|| BackdropError::decode("bad percent escape in data: URI"))?;
            out.push(hex);
            i += 3;
        } else {
            out.push(b[i]);
            i += 1;
        }
    }
    Ok(out)
}

#[cfg(test)]
#[path = "../../tests/unit/assets/data_uri.rs"]
mod tests;
