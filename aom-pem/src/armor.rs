//! PEM armor (RFC 7468)
//!
//! ```text
//! -----BEGIN CERTIFICATE REQUEST-----
//! MIIB7TCCAVYCAQAwgawxCzAJBgNVBAYTAlVT...
//! -----END CERTIFICATE REQUEST-----
//! ```

use aom_core::{AomError, AomResult};
use b64_ct::{FromBase64, STANDARD, ToBase64};
use regex::Regex;

/// Base64 characters per line when wrapping
pub const LINE_WIDTH: usize = 64;

static PEM_BLOCK: once_cell::sync::Lazy<Result<Regex, regex::Error>> = once_cell::sync::Lazy::new(|| {
    Regex::new(r"(?s)-----BEGIN ([^\r\n]*?)-----(.*?)-----END ([^\r\n]*?)-----")
});

/// One armored block
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PemBlock {
    pub label: String,
    pub der: Vec<u8>,
}

/// Extract every PEM block of `text`, in order
///
/// Text outside the armor is ignored.
///
/// # Error Handling
/// Returns `InvalidPem` when no block is found, when a block's BEGIN and END
/// labels differ, or when a body is not valid base64.
pub fn pem_blocks(text: &str) -> AomResult<Vec<PemBlock>> {
    let pattern = PEM_BLOCK
        .as_ref()
        .map_err(|e| AomError::InvalidPem(e.to_string()))?;

    let mut blocks = Vec::new();
    for captures in pattern.captures_iter(text) {
        let label = &captures[1];
        if label != &captures[3] {
            return Err(AomError::InvalidPem(format!(
                "BEGIN label \"{}\" does not match END label \"{}\"",
                label, &captures[3]
            )));
        }

        let body: String = captures[2].chars().filter(|c| !c.is_whitespace()).collect();
        let der = body
            .from_base64()
            .map_err(|e| AomError::InvalidPem(format!("body of \"{}\" is not base64: {:?}", label, e)))?;

        log::debug!("found PEM block \"{}\" with {} DER bytes", label, der.len());
        blocks.push(PemBlock {
            label: label.to_string(),
            der,
        });
    }

    if blocks.is_empty() {
        return Err(AomError::InvalidPem("input is not PEM encoded".to_string()));
    }
    Ok(blocks)
}

/// Strip the armor and return the DER bytes of every block, concatenated
pub fn pem_to_der(text: &str) -> AomResult<Vec<u8>> {
    Ok(pem_blocks(text)?
        .into_iter()
        .flat_map(|block| block.der)
        .collect())
}

/// Wrap DER bytes in PEM armor with 64-column lines and a trailing newline
///
/// # Error Handling
/// Returns `InvalidPem` for a label RFC 7468 does not allow. A label is
/// printable ASCII, may use single hyphens or spaces between words, and must
/// not start or end with either.
pub fn der_to_pem(label: &str, der: &[u8]) -> AomResult<String> {
    validate_label(label)?;

    let encoded = der.to_base64(STANDARD);
    let mut pem = String::with_capacity(encoded.len() + encoded.len() / LINE_WIDTH + 2 * label.len() + 32);
    pem.push_str(&format!("-----BEGIN {}-----\n", label));
    // Base64 output is ASCII, so byte chunks are whole characters
    for line in encoded.as_bytes().chunks(LINE_WIDTH) {
        pem.push_str(&String::from_utf8_lossy(line));
        pem.push('\n');
    }
    pem.push_str(&format!("-----END {}-----\n", label));
    Ok(pem)
}

/// `label = labelchar *( ["-" / SP] labelchar )`, RFC 7468 §3
fn validate_label(label: &str) -> AomResult<()> {
    let is_labelchar = |c: char| c.is_ascii_graphic() && c != '-';
    let is_separator = |c: char| c == '-' || c == ' ';

    let chars: Vec<char> = label.chars().collect();
    let valid = match (chars.first(), chars.last()) {
        (Some(&first), Some(&last)) => {
            is_labelchar(first)
                && is_labelchar(last)
                && chars.iter().all(|&c| is_labelchar(c) || is_separator(c))
                && chars
                    .windows(2)
                    .all(|pair| !(is_separator(pair[0]) && is_separator(pair[1])))
        }
        _ => false,
    };
    if !valid {
        return Err(AomError::InvalidPem(format!("invalid PEM label \"{}\"", label)));
    }
    Ok(())
}
