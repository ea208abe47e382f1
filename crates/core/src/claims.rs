//! Unverified bearer-token payload decoding.
//!
//! The client inspects token claims for expiry checks and session display
//! only. Signature verification belongs to the server; the third segment is
//! never examined here.

use crate::types::Claims;
use base64::Engine;
use base64::engine::general_purpose::{URL_SAFE, URL_SAFE_NO_PAD};
use thiserror::Error;

/// Ways a token can fail structural decoding
#[derive(Debug, Error)]
pub enum DecodeError {
    /// Token does not have exactly three dot-separated segments
    #[error("Malformed token: expected 3 segments, found {0}")]
    SegmentCount(usize),

    /// Payload segment is not valid base64
    #[error("Malformed token payload: {0}")]
    Base64(#[from] base64::DecodeError),

    /// Payload segment is not a valid claim set
    #[error("Invalid claim set: {0}")]
    Claims(#[from] serde_json::Error),
}

/// Decode the claim set from a bearer token without verifying the signature.
///
/// Fails with [`DecodeError`] if the segment count is not exactly three or
/// the payload is not a base64-encoded JSON claim set. Issuers differ on
/// whether the payload carries padding, so both forms are accepted.
pub fn decode_claims(token: &str) -> Result<Claims, DecodeError> {
    let segments: Vec<&str> = token.split('.').collect();
    if segments.len() != 3 {
        return Err(DecodeError::SegmentCount(segments.len()));
    }

    let payload = segments[1];
    let bytes = URL_SAFE_NO_PAD
        .decode(payload)
        .or_else(|_| URL_SAFE.decode(payload))?;

    Ok(serde_json::from_slice(&bytes)?)
}
