//! Unwrapping of textual envelopes.
//!
//! CRLs are often shipped as text: a Base64 payload between literal begin
//! and end marker lines. This module locates such an envelope in a buffer
//! and recovers the binary record inside along with the number of input
//! bytes the envelope occupied, so that several concatenated envelopes
//! can be consumed one after the other.

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use crate::error::{Error, ErrorKind};


/// The marker line starting a wrapped CRL.
pub const CRL_BEGIN_MARKER: &str = "-----BEGIN X509 CRL-----";

/// The marker line ending a wrapped CRL.
pub const CRL_END_MARKER: &str = "-----END X509 CRL-----";


//------------ PemBlock ------------------------------------------------------

/// One unwrapped envelope.
#[derive(Clone, Debug)]
pub struct PemBlock {
    /// The decoded binary payload.
    pub der: Vec<u8>,

    /// The input bytes occupied by the envelope.
    ///
    /// This counts everything up to and including the end marker and any
    /// line break directly following it.
    pub consumed: usize,
}


/// Tries to unwrap the first envelope found in a buffer.
///
/// Returns `Ok(None)` if either marker is missing, meaning the buffer
/// isn’t wrapped at all. A present envelope with a payload that doesn’t
/// decode as Base64 is an error.
pub fn read_block(
    input: &[u8],
    begin: &str,
    end: &str,
) -> Result<Option<PemBlock>, Error> {
    let begin_idx = match find(input, begin.as_bytes()) {
        Some(idx) => idx,
        None => return Ok(None)
    };
    let payload_start = begin_idx + begin.len();
    let end_idx = match find(&input[payload_start..], end.as_bytes()) {
        Some(idx) => payload_start + idx,
        None => return Ok(None)
    };

    let payload: Vec<u8> = input[payload_start..end_idx].iter().copied()
        .filter(|ch| !matches!(ch, b' ' | b'\t' | b'\r' | b'\n'))
        .collect();
    let der = STANDARD.decode(payload).map_err(|err| {
        Error::with_cause(ErrorKind::InvalidFormat, err)
    })?;

    // Consume the end marker and the line break following it.
    let mut consumed = end_idx + end.len();
    while input.get(consumed).map_or(false, |&ch| {
        ch == b'\r' || ch == b'\n'
    }) {
        consumed += 1;
    }

    Ok(Some(PemBlock { der, consumed }))
}

/// Returns the index of the first occurrence of `needle` in `haystack`.
fn find(haystack: &[u8], needle: &[u8]) -> Option<usize> {
    if needle.len() > haystack.len() {
        return None
    }
    haystack.windows(needle.len()).position(|window| window == needle)
}


//============ Tests =========================================================
