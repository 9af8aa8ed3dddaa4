//! `data:` URI payloads.
//!
//! Documents reach the session already encoded as
//! `data:<mime-type>;base64,<data>`. The Gemini agent splits them back into a
//! MIME type and base64 data for an `inlineData` part.

use base64::Engine;
use base64::engine::general_purpose::STANDARD as BASE64_STANDARD;

const DEFAULT_MIME_TYPE: &str = "application/octet-stream";

/// A parsed `data:` URI.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DataUri {
    pub mime_type: String,
    /// Base64-encoded bytes.
    pub data: String,
}

/// Encodes raw bytes as a base64 `data:` URI.
pub fn encode(mime_type: &str, bytes: &[u8]) -> String {
    format!("data:{mime_type};base64,{}", BASE64_STANDARD.encode(bytes))
}

/// Parses a `data:` URI.
///
/// Non-base64 URIs are accepted and their data re-encoded, so the result is
/// always base64. Returns `None` if `payload` is not a `data:` URI.
pub fn parse(payload: &str) -> Option<DataUri> {
    let rest = payload.trim().strip_prefix("data:")?;
    let (header, data) = rest.split_once(',')?;

    let mut params = header.split(';');
    let mime_type = match params.next() {
        Some(m) if !m.is_empty() => m.to_string(),
        _ => DEFAULT_MIME_TYPE.to_string(),
    };
    let is_base64 = params.any(|p| p.eq_ignore_ascii_case("base64"));

    let data = if is_base64 {
        data.to_string()
    } else {
        BASE64_STANDARD.encode(data.as_bytes())
    };

    Some(DataUri { mime_type, data })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_base64_pdf() {
        let uri = parse("data:application/pdf;base64,JVBERi0=").unwrap();
        assert_eq!(uri.mime_type, "application/pdf");
        assert_eq!(uri.data, "JVBERi0=");
    }

    #[test]
    fn test_parse_plain_text_is_reencoded() {
        let uri = parse("data:text/plain,hello").unwrap();
        assert_eq!(uri.mime_type, "text/plain");
        assert_eq!(uri.data, "aGVsbG8=");
    }

    #[test]
    fn test_parse_missing_mime_type() {
        let uri = parse("data:;base64,QQ==").unwrap();
        assert_eq!(uri.mime_type, DEFAULT_MIME_TYPE);
    }

    #[test]
    fn test_parse_rejects_other_strings() {
        assert_eq!(parse("U1"), None);
        assert_eq!(parse("data:text/plain"), None);
    }

    #[test]
    fn test_encode_matches_parse() {
        let payload = encode("text/plain", b"Tenant pays rent monthly.");
        let uri = parse(&payload).unwrap();
        let bytes = BASE64_STANDARD.decode(uri.data).unwrap();
        assert_eq!(bytes, b"Tenant pays rent monthly.");
    }
}
