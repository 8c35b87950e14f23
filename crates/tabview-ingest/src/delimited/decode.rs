//! Byte-to-text decoding for delimited sources.

use std::borrow::Cow;

use encoding_rs::{Encoding, WINDOWS_1252};

/// Decodes raw source bytes into text.
///
/// A byte order mark selects the encoding (UTF-8, UTF-16 LE/BE) and is
/// stripped. Without a BOM the bytes are read as UTF-8 when valid and as
/// Windows-1252 otherwise. Decoding never fails; malformed sequences become
/// replacement characters.
pub fn decode_text(bytes: &[u8]) -> Cow<'_, str> {
    if let Some((encoding, bom_len)) = Encoding::for_bom(bytes) {
        let (text, had_errors) = encoding.decode_without_bom_handling(&bytes[bom_len..]);
        if had_errors {
            tracing::debug!(
                encoding = encoding.name(),
                "replaced malformed sequences while decoding"
            );
        }
        return text;
    }

    match std::str::from_utf8(bytes) {
        Ok(text) => Cow::Borrowed(text),
        Err(_) => {
            tracing::debug!("source is not valid UTF-8, decoding as windows-1252");
            WINDOWS_1252.decode_without_bom_handling(bytes).0
        }
    }
}
