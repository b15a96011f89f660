/*
[INPUT]:  Opaque session token string
[OUTPUT]: Expiry timestamp when the token is a JWT carrying `exp`
[POS]:    Auth layer - best-effort token introspection (no signature check)
[UPDATE]: When the backend changes token format
*/

use base64::{
    Engine as _,
    engine::general_purpose::{URL_SAFE, URL_SAFE_NO_PAD},
};
use chrono::{DateTime, Utc};

/// Read the `exp` claim of a JWT without verifying it
///
/// Returns `None` for anything that is not a decodable JWT with a numeric
/// `exp`; such tokens are treated as non-expiring and left to the server.
pub fn token_expiry(token: &str) -> Option<DateTime<Utc>> {
    let payload_b64 = token.trim().split('.').nth(1)?;
    let payload_bytes = URL_SAFE_NO_PAD
        .decode(payload_b64)
        .or_else(|_| URL_SAFE.decode(payload_b64))
        .ok()?;
    let payload: serde_json::Value = serde_json::from_slice(&payload_bytes).ok()?;
    let exp = payload.get("exp")?;
    let seconds = exp.as_i64().or_else(|| exp.as_f64().map(|f| f as i64))?;
    DateTime::from_timestamp(seconds, 0)
}

#[cfg(test)]
pub(crate) fn make_test_jwt(claims: serde_json::Value) -> String {
    let header = serde_json::json!({"alg": "none", "typ": "JWT"});
    let header_b64 = URL_SAFE_NO_PAD.encode(serde_json::to_vec(&header).unwrap());
    let payload_b64 = URL_SAFE_NO_PAD.encode(serde_json::to_vec(&claims).unwrap());
    format!("{header_b64}.{payload_b64}.signature")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_token_expiry_from_exp_claim() {
        let token = make_test_jwt(serde_json::json!({"sub": "a@b.c", "exp": 1_700_000_000}));
        let expiry = token_expiry(&token).expect("expiry");
        assert_eq!(expiry.timestamp(), 1_700_000_000);
    }

    #[test]
    fn test_token_expiry_absent() {
        assert!(token_expiry("opaque-token").is_none());
        assert!(token_expiry("a.!!!.c").is_none());

        let token = make_test_jwt(serde_json::json!({"sub": "a@b.c"}));
        assert!(token_expiry(&token).is_none());
    }
}
