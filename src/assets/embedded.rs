use anyhow::{Context, anyhow, bail};
use base64::{Engine as _, engine::general_purpose};

/// Self-describing encoded raster payload, carried as a `data:` URL.
///
/// Immutable once received; the engine only reads inputs and creates new values.
#[derive(Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(transparent)]
pub struct EmbeddedImage(String);

impl std::fmt::Debug for EmbeddedImage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // Payloads run to megabytes; only show the header.
        let head = self.0.split_once(',').map_or(self.0.as_str(), |(m, _)| m);
        f.debug_tuple("EmbeddedImage")
            .field(&format_args!("{head},<{} bytes>", self.0.len()))
            .finish()
    }
}

impl EmbeddedImage {
    /// Wrap a data URL without validating it. Validation happens at decode time.
    pub fn new(data_url: impl Into<String>) -> Self {
        Self(data_url.into())
    }

    /// Encode PNG bytes as `data:image/png;base64,...`.
    pub fn from_png_bytes(bytes: &[u8]) -> Self {
        let b64 = general_purpose::STANDARD.encode(bytes);
        Self(format!("data:image/png;base64,{b64}"))
    }

    /// The data URL text.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Length of the textual payload in bytes.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// True for an empty or all-whitespace payload.
    pub fn is_empty(&self) -> bool {
        self.0.trim().is_empty()
    }

    /// Decode the payload into the raw encoded image bytes.
    ///
    /// `;base64` payloads accept the standard and URL-safe alphabets; anything else is
    /// percent-decoded.
    pub fn decode_bytes(&self) -> anyhow::Result<Vec<u8>> {
        let s = self.0.trim();
        let Some(rest) = s.strip_prefix("data:") else {
            bail!("not a data URL");
        };
        let (meta, data) = rest
            .split_once(',')
            .ok_or_else(|| anyhow!("invalid data URL: missing comma"))?;

        let is_base64 = meta
            .split(';')
            .any(|t| t.trim().eq_ignore_ascii_case("base64"));
        if !is_base64 {
            return percent_decode(data);
        }

        general_purpose::STANDARD
            .decode(data.trim())
            .or_else(|_| general_purpose::URL_SAFE.decode(data.trim()))
            .context("invalid base64 in data URL")
    }
}

fn percent_decode(s: &str) -> anyhow::Result<Vec<u8>> {
    fn hex(b: u8) -> Option<u8> {
        match b {
            b'0'..=b'9' => Some(b - b'0'),
            b'a'..=b'f' => Some(b - b'a' + 10),
            b'A'..=b'F' => Some(b - b'A' + 10),
            _ => None,
        }
    }

    let bytes = s.as_bytes();
    let mut out = Vec::with_capacity(bytes.len());
    let mut i = 0;
    while i < bytes.len() {
        if bytes[i] != b'%' {
            out.push(bytes[i]);
            i += 1;
            continue;
        }
        let (Some(&hi), Some(&lo)) = (bytes.get(i + 1), bytes.get(i + 2)) else {
            bail!("invalid percent-encoding: truncated");
        };
        let (Some(hi), Some(lo)) = (hex(hi), hex(lo)) else {
            bail!("invalid percent-encoding");
        };
        out.push((hi << 4) | lo);
        i += 3;
    }
    Ok(out)
}

impl From<String> for EmbeddedImage {
    fn from(s: String) -> Self {
        Self(s)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/assets/embedded.rs"]
mod tests;
