//! Cookie signing
//!
//! Values are HMAC-SHA256 signed with the configured secret.
//! Format: `{value}.{base64url(hmac_sha256(value))}`

use base64::{Engine as _, engine::general_purpose::URL_SAFE_NO_PAD};
use hmac::{Hmac, Mac};
use rand::RngCore;
use serde::{Serialize, de::DeserializeOwned};
use sha2::Sha256;

use crate::error::AppError;

type HmacSha256 = Hmac<Sha256>;

fn mac_for(secret: &str) -> Result<HmacSha256, AppError> {
    HmacSha256::new_from_slice(secret.as_bytes()).map_err(|e| AppError::Encryption(e.to_string()))
}

/// Generate a random URL-safe token (32 bytes of entropy)
pub fn generate_token() -> String {
    let mut bytes = [0u8; 32];
    rand::thread_rng().fill_bytes(&mut bytes);
    URL_SAFE_NO_PAD.encode(bytes)
}

/// Append an HMAC signature to `value`
pub fn sign_value(value: &str, secret: &str) -> Result<String, AppError> {
    let mut mac = mac_for(secret)?;
    mac.update(value.as_bytes());
    let signature = URL_SAFE_NO_PAD.encode(mac.finalize().into_bytes());

    Ok(format!("{}.{}", value, signature))
}

/// Verify a signed value and return the original value
///
/// # Errors
/// Returns `Unauthorized` if the value is malformed or the signature
/// does not match.
pub fn verify_signed_value(signed: &str, secret: &str) -> Result<String, AppError> {
    let (value, signature_b64) = signed
        .rsplit_once('.')
        .ok_or_else(AppError::unauthorized)?;

    if value.is_empty() {
        return Err(AppError::unauthorized());
    }

    let signature = URL_SAFE_NO_PAD
        .decode(signature_b64)
        .map_err(|_| AppError::unauthorized())?;

    let mut mac = mac_for(secret)?;
    mac.update(value.as_bytes());
    mac.verify_slice(&signature)
        .map_err(|_| AppError::unauthorized())?;

    Ok(value.to_string())
}

/// Serialize a payload to JSON, base64url it and sign it
pub fn encode_signed_payload<T: Serialize>(payload: &T, secret: &str) -> Result<String, AppError> {
    let json = serde_json::to_vec(payload).map_err(|e| AppError::Internal(e.into()))?;
    sign_value(&URL_SAFE_NO_PAD.encode(json), secret)
}

/// Verify and decode a payload produced by [`encode_signed_payload`]
pub fn decode_signed_payload<T: DeserializeOwned>(signed: &str, secret: &str) -> Result<T, AppError> {
    let payload_b64 = verify_signed_value(signed, secret)?;
    let bytes = URL_SAFE_NO_PAD
        .decode(payload_b64)
        .map_err(|_| AppError::unauthorized())?;

    serde_json::from_slice(&bytes).map_err(|_| AppError::unauthorized())
}
