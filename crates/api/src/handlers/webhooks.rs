//! Payments-provider webhook intake.
//!
//! Verifies the provider's `stripe-signature` header over the raw body and
//! acknowledges the event. Responses here are provider-facing plain JSON,
//! not the service envelope; event processing happens elsewhere.

use axum::body::Bytes;
use axum::extract::State;
use axum::http::{HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Json;
use hmac::{Hmac, Mac};
use serde_json::{json, Value as JsonValue};
use sha2::Sha256;

use crate::state::AppState;

type HmacSha256 = Hmac<Sha256>;

/// Seconds a signed timestamp may lag before the payload is rejected as a
/// replay.
const TIMESTAMP_TOLERANCE_SECS: i64 = 300;

/// POST /webhooks/stripe
///
/// The body must arrive unparsed: the signature covers the exact bytes the
/// provider sent, so this handler sits outside any body-consuming layer.
pub async fn stripe(State(state): State<AppState>, headers: HeaderMap, body: Bytes) -> Response {
    let Some(signature) = headers
        .get("stripe-signature")
        .and_then(|v| v.to_str().ok())
    else {
        return reject(StatusCode::BAD_REQUEST, "Missing stripe signature");
    };

    let Some(secret) = state.config.stripe_webhook_secret.as_deref() else {
        tracing::error!("Webhook received but STRIPE_WEBHOOK_SECRET is not configured");
        return reject(StatusCode::INTERNAL_SERVER_ERROR, "Webhook not configured");
    };

    let now = chrono::Utc::now().timestamp();
    if !verify_signature(secret, signature, &body, now) {
        tracing::warn!("Webhook signature verification failed");
        return reject(StatusCode::BAD_REQUEST, "Invalid signature");
    }

    let event_id = serde_json::from_slice::<JsonValue>(&body)
        .ok()
        .and_then(|event| event.get("id").cloned())
        .unwrap_or(JsonValue::Null);

    tracing::info!(event_id = %event_id, "Webhook event acknowledged");
    Json(json!({ "received": true, "eventId": event_id })).into_response()
}

fn reject(status: StatusCode, message: &str) -> Response {
    (status, Json(json!({ "error": message }))).into_response()
}

/// Check a `t={timestamp},v1={hex}` header against HMAC-SHA256 of
/// `"{timestamp}.{body}"`. Any one valid `v1` entry within the timestamp
/// tolerance accepts the payload; the provider sends several during secret
/// rotation.
fn verify_signature(secret: &str, header: &str, body: &[u8], now: i64) -> bool {
    let mut timestamp: Option<i64> = None;
    let mut candidates: Vec<Vec<u8>> = Vec::new();

    for part in header.split(',') {
        match part.trim().split_once('=') {
            Some(("t", value)) => timestamp = value.parse().ok(),
            Some(("v1", value)) => {
                if let Ok(bytes) = hex::decode(value) {
                    candidates.push(bytes);
                }
            }
            _ => {}
        }
    }

    let Some(timestamp) = timestamp else {
        return false;
    };
    if (now - timestamp).abs() > TIMESTAMP_TOLERANCE_SECS {
        return false;
    }

    candidates.iter().any(|candidate| {
        let mut mac = match HmacSha256::new_from_slice(secret.as_bytes()) {
            Ok(mac) => mac,
            Err(_) => return false,
        };
        mac.update(timestamp.to_string().as_bytes());
        mac.update(b".");
        mac.update(body);
        mac.verify_slice(candidate).is_ok()
    })
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    const SECRET: &str = "whsec_test_secret";
    const BODY: &[u8] = br#"{"id": "evt_123", "type": "checkout.session.completed"}"#;

    fn sign(secret: &str, timestamp: i64, body: &[u8]) -> String {
        let mut mac = HmacSha256::new_from_slice(secret.as_bytes()).unwrap();
        mac.update(timestamp.to_string().as_bytes());
        mac.update(b".");
        mac.update(body);
        hex::encode(mac.finalize().into_bytes())
    }

    #[test]
    fn valid_signature_is_accepted() {
        let now = 1_700_000_000;
        let header = format!("t={now},v1={}", sign(SECRET, now, BODY));
        assert!(verify_signature(SECRET, &header, BODY, now));
    }

    #[test]
    fn wrong_secret_is_rejected() {
        let now = 1_700_000_000;
        let header = format!("t={now},v1={}", sign("whsec_other", now, BODY));
        assert!(!verify_signature(SECRET, &header, BODY, now));
    }

    #[test]
    fn tampered_body_is_rejected() {
        let now = 1_700_000_000;
        let header = format!("t={now},v1={}", sign(SECRET, now, BODY));
        assert!(!verify_signature(SECRET, &header, b"{}", now));
    }

    #[test]
    fn stale_timestamp_is_rejected() {
        let signed_at = 1_700_000_000;
        let header = format!("t={signed_at},v1={}", sign(SECRET, signed_at, BODY));
        assert!(!verify_signature(
            SECRET,
            &header,
            BODY,
            signed_at + TIMESTAMP_TOLERANCE_SECS + 1
        ));
    }

    #[test]
    fn timestamp_within_tolerance_is_accepted() {
        let signed_at = 1_700_000_000;
        let header = format!("t={signed_at},v1={}", sign(SECRET, signed_at, BODY));
        assert!(verify_signature(
            SECRET,
            &header,
            BODY,
            signed_at + TIMESTAMP_TOLERANCE_SECS - 1
        ));
    }

    #[test]
    fn missing_parts_are_rejected() {
        let now = 1_700_000_000;
        assert!(!verify_signature(SECRET, "", BODY, now));
        assert!(!verify_signature(SECRET, "t=1700000000", BODY, now));
        assert!(!verify_signature(
            SECRET,
            &format!("v1={}", sign(SECRET, now, BODY)),
            BODY,
            now
        ));
        assert!(!verify_signature(SECRET, "t=garbage,v1=zz", BODY, now));
    }

    #[test]
    fn malformed_v1_entries_are_skipped() {
        let now = 1_700_000_000;
        // Odd length and non-hex digests never become candidates.
        let header = format!("t={now},v1=0,v1=zz,v1={}", sign(SECRET, now, BODY));
        assert!(verify_signature(SECRET, &header, BODY, now));
        assert!(!verify_signature(SECRET, &format!("t={now},v1=0"), BODY, now));
    }

    #[test]
    fn any_valid_v1_entry_accepts_during_rotation() {
        let now = 1_700_000_000;
        let stale = "0".repeat(64);
        let header = format!("t={now},v1={stale},v1={}", sign(SECRET, now, BODY));
        assert!(verify_signature(SECRET, &header, BODY, now));
    }

}
