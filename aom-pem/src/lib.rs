//! PEM armor for the ASN.1 abstract object model
//!
//! PEM is DER wrapped in base64 between `-----BEGIN <label>-----` and
//! `-----END <label>-----` lines. Both directions are supported; writing uses
//! 64-character lines.

pub mod armor;
pub mod codec;

pub use armor::{LINE_WIDTH, PemBlock, der_to_pem, pem_blocks, pem_to_der};
pub use codec::{DEFAULT_LABEL, PEM_ENCODING, PemCodec};
