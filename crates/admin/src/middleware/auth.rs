//! Session token authentication for the embedded admin page.
//!
//! Shopify App Bridge gives the page a short-lived HS256 JWT signed with the
//! app's API secret. Every protected request carries it either as
//! `Authorization: Bearer <token>` or, on the initial document load, as the
//! `id_token` query parameter.
//!
//! A token is accepted only when:
//! - the header names `HS256` and the signature verifies
//! - `aud` equals the app's API key
//! - `exp` and `nbf` hold within [`CLOCK_LEEWAY_SECS`]
//! - the `dest` host is the configured store
//!
//! Anything else is rejected with 401 before any handler logic runs.

use axum::{
    extract::FromRequestParts,
    http::{header::AUTHORIZATION, request::Parts},
};
use base64::{Engine as _, engine::general_purpose::URL_SAFE_NO_PAD};
use hmac::{Hmac, Mac};
use secrecy::ExposeSecret;
use serde::Deserialize;
use sha2::Sha256;
use thiserror::Error;

use crate::config::ShopifyAppConfig;
use crate::error::AppError;
use crate::state::AppState;

type HmacSha256 = Hmac<Sha256>;

/// Allowed clock skew between Shopify and this server.
pub const CLOCK_LEEWAY_SECS: i64 = 5;

/// Query parameter carrying the token on document loads.
pub const ID_TOKEN_PARAM: &str = "id_token";

/// Why a session token was rejected.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SessionTokenError {
    #[error("no session token supplied")]
    Missing,
    #[error("malformed session token: {0}")]
    Malformed(&'static str),
    #[error("unsupported signing algorithm: {0}")]
    UnsupportedAlgorithm(String),
    #[error("signature mismatch")]
    BadSignature,
    #[error("token expired")]
    Expired,
    #[error("token not yet valid")]
    NotYetValid,
    #[error("audience does not match the app")]
    WrongAudience,
    #[error("token issued for another shop: {0}")]
    WrongShop(String),
}

#[derive(Debug, Deserialize)]
struct Header {
    alg: String,
}

/// Verified session token claims.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct SessionClaims {
    /// Shop admin URL, e.g. `https://store.myshopify.com/admin`.
    pub iss: String,
    /// Shop URL, e.g. `https://store.myshopify.com`.
    pub dest: String,
    /// App API key.
    pub aud: String,
    /// Staff user id.
    #[serde(default)]
    pub sub: Option<String>,
    pub exp: i64,
    pub nbf: i64,
    #[serde(default)]
    pub iat: Option<i64>,
    #[serde(default)]
    pub jti: Option<String>,
    #[serde(default)]
    pub sid: Option<String>,
}

impl SessionClaims {
    /// Key for per-view page state: the App Bridge session id, falling back
    /// to the staff user, then the shop.
    #[must_use]
    pub fn session_key(&self) -> &str {
        self.sid
            .as_deref()
            .or(self.sub.as_deref())
            .unwrap_or(&self.dest)
    }
}

/// Verify a compact JWS session token at time `now` (unix seconds).
///
/// # Errors
///
/// Returns the first check that fails; see the module docs for the list.
pub fn verify_session_token(
    token: &str,
    app: &ShopifyAppConfig,
    store: &str,
    now: i64,
) -> Result<SessionClaims, SessionTokenError> {
    let mut segments = token.split('.');
    let (Some(header_b64), Some(payload_b64), Some(signature_b64), None) = (
        segments.next(),
        segments.next(),
        segments.next(),
        segments.next(),
    ) else {
        return Err(SessionTokenError::Malformed("expected three segments"));
    };

    let header: Header = decode_segment(header_b64, "header")?;
    if header.alg != "HS256" {
        return Err(SessionTokenError::UnsupportedAlgorithm(header.alg));
    }

    let signature = URL_SAFE_NO_PAD
        .decode(signature_b64)
        .map_err(|_| SessionTokenError::Malformed("signature is not base64url"))?;

    let mut mac = HmacSha256::new_from_slice(app.api_secret.expose_secret().as_bytes())
        .map_err(|_| SessionTokenError::BadSignature)?;
    mac.update(header_b64.as_bytes());
    mac.update(b".");
    mac.update(payload_b64.as_bytes());
    mac.verify_slice(&signature)
        .map_err(|_| SessionTokenError::BadSignature)?;

    let claims: SessionClaims = decode_segment(payload_b64, "payload")?;

    if now > claims.exp + CLOCK_LEEWAY_SECS {
        return Err(SessionTokenError::Expired);
    }
    if now + CLOCK_LEEWAY_SECS < claims.nbf {
        return Err(SessionTokenError::NotYetValid);
    }
    if claims.aud != app.api_key {
        return Err(SessionTokenError::WrongAudience);
    }

    let dest_host = url::Url::parse(&claims.dest)
        .ok()
        .and_then(|u| u.host_str().map(str::to_ascii_lowercase));
    if dest_host.as_deref() != Some(store.to_ascii_lowercase().as_str()) {
        return Err(SessionTokenError::WrongShop(claims.dest));
    }

    Ok(claims)
}

fn decode_segment<T: serde::de::DeserializeOwned>(
    segment: &str,
    what: &'static str,
) -> Result<T, SessionTokenError> {
    let bytes = URL_SAFE_NO_PAD
        .decode(segment)
        .map_err(|_| SessionTokenError::Malformed(what))?;
    serde_json::from_slice(&bytes).map_err(|_| SessionTokenError::Malformed(what))
}

/// Pull the raw token from the request.
fn token_from_parts(parts: &Parts) -> Option<String> {
    let bearer = parts
        .headers
        .get(AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "))
        .map(str::trim)
        .filter(|t| !t.is_empty());
    if let Some(token) = bearer {
        return Some(token.to_string());
    }

    let query = parts.uri.query()?;
    url::form_urlencoded::parse(query.as_bytes())
        .find(|(k, _)| k == ID_TOKEN_PARAM)
        .map(|(_, v)| v.into_owned())
        .filter(|t| !t.is_empty())
}

/// Extractor that requires a valid session token.
///
/// # Example
///
/// ```rust,ignore
/// async fn protected_handler(
///     RequireSessionToken(claims): RequireSessionToken,
/// ) -> impl IntoResponse {
///     format!("Hello, {}!", claims.dest)
/// }
/// ```
#[derive(Debug, Clone)]
pub struct RequireSessionToken(pub SessionClaims);

impl FromRequestParts<AppState> for RequireSessionToken {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let config = state.config();
        let now = chrono::Utc::now().timestamp();

        let claims = token_from_parts(parts)
            .ok_or(SessionTokenError::Missing)
            .and_then(|token| {
                verify_session_token(&token, &config.app, &config.shopify.store, now)
            })
            .map_err(|e| {
                tracing::warn!(reason = %e, path = %parts.uri.path(), "Rejected session token");
                AppError::Unauthorized(e.to_string())
            })?;

        set_sentry_user(claims.sub.as_deref());
        Ok(Self(claims))
    }
}

/// Set the Sentry user context from the token's staff user id.
fn set_sentry_user(user_id: Option<&str>) {
    sentry::configure_scope(|scope| {
        scope.set_user(user_id.map(|id| sentry::User {
            id: Some(id.to_string()),
            ..Default::default()
        }));
    });
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use axum::http::Request;
    use secrecy::SecretString;

    use super::*;

    const SECRET: &str = "hush-4f9c2e7a1b";
    const STORE: &str = "desk-test.myshopify.com";
    const NOW: i64 = 1_760_000_000;

    fn app() -> ShopifyAppConfig {
        ShopifyAppConfig {
            api_key: "app-key".to_string(),
            api_secret: SecretString::from(SECRET),
        }
    }

    fn claims() -> serde_json::Value {
        serde_json::json!({
            "iss": format!("https://{STORE}/admin"),
            "dest": format!("https://{STORE}"),
            "aud": "app-key",
            "sub": "42",
            "exp": NOW + 60,
            "nbf": NOW - 60,
            "iat": NOW - 60,
            "jti": "a1b2",
            "sid": "s1"
        })
    }

    fn sign(header: &serde_json::Value, claims: &serde_json::Value, secret: &str) -> String {
        let header = URL_SAFE_NO_PAD.encode(serde_json::to_vec(header).unwrap());
        let payload = URL_SAFE_NO_PAD.encode(serde_json::to_vec(claims).unwrap());
        let mut mac = HmacSha256::new_from_slice(secret.as_bytes()).unwrap();
        mac.update(format!("{header}.{payload}").as_bytes());
        let signature = URL_SAFE_NO_PAD.encode(mac.finalize().into_bytes());
        format!("{header}.{payload}.{signature}")
    }

    fn token(claims: &serde_json::Value) -> String {
        sign(&serde_json::json!({"alg": "HS256", "typ": "JWT"}), claims, SECRET)
    }

    #[test]
    fn test_valid_token() {
        let verified = verify_session_token(&token(&claims()), &app(), STORE, NOW).unwrap();
        assert_eq!(verified.sub.as_deref(), Some("42"));
        assert_eq!(verified.aud, "app-key");
    }

    #[test]
    fn test_session_key_falls_back_to_user_then_shop() {
        let mut claims: SessionClaims = serde_json::from_value(claims()).unwrap();
        assert_eq!(claims.session_key(), "s1");
        claims.sid = None;
        assert_eq!(claims.session_key(), "42");
        claims.sub = None;
        assert_eq!(claims.session_key(), format!("https://{STORE}"));
    }

    #[test]
    fn test_wrong_secret_is_rejected() {
        let forged = sign(&serde_json::json!({"alg": "HS256"}), &claims(), "other-secret");
        assert_eq!(
            verify_session_token(&forged, &app(), STORE, NOW),
            Err(SessionTokenError::BadSignature)
        );
    }

    #[test]
    fn test_tampered_payload_is_rejected() {
        let mut tampered = claims();
        tampered["dest"] = serde_json::json!("https://evil.myshopify.com");
        let payload = URL_SAFE_NO_PAD.encode(serde_json::to_vec(&tampered).unwrap());
        let good = token(&claims());
        let mut parts: Vec<&str> = good.split('.').collect();
        parts[1] = &payload;

        assert_eq!(
            verify_session_token(&parts.join("."), &app(), STORE, NOW),
            Err(SessionTokenError::BadSignature)
        );
    }

    #[test]
    fn test_none_algorithm_is_rejected() {
        let unsigned = sign(&serde_json::json!({"alg": "none"}), &claims(), SECRET);
        assert_eq!(
            verify_session_token(&unsigned, &app(), STORE, NOW),
            Err(SessionTokenError::UnsupportedAlgorithm("none".to_string()))
        );
    }

    #[test]
    fn test_expiry_and_not_before_respect_leeway() {
        let mut expired = claims();
        expired["exp"] = serde_json::json!(NOW - CLOCK_LEEWAY_SECS);
        assert!(verify_session_token(&token(&expired), &app(), STORE, NOW).is_ok());
        expired["exp"] = serde_json::json!(NOW - CLOCK_LEEWAY_SECS - 1);
        assert_eq!(
            verify_session_token(&token(&expired), &app(), STORE, NOW),
            Err(SessionTokenError::Expired)
        );

        let mut early = claims();
        early["nbf"] = serde_json::json!(NOW + CLOCK_LEEWAY_SECS + 1);
        assert_eq!(
            verify_session_token(&token(&early), &app(), STORE, NOW),
            Err(SessionTokenError::NotYetValid)
        );
    }

    #[test]
    fn test_audience_and_shop_must_match() {
        let mut other_app = claims();
        other_app["aud"] = serde_json::json!("someone-else");
        assert_eq!(
            verify_session_token(&token(&other_app), &app(), STORE, NOW),
            Err(SessionTokenError::WrongAudience)
        );

        let mut other_shop = claims();
        other_shop["dest"] = serde_json::json!("https://other.myshopify.com");
        assert!(matches!(
            verify_session_token(&token(&other_shop), &app(), STORE, NOW),
            Err(SessionTokenError::WrongShop(_))
        ));
    }

    #[test]
    fn test_malformed_tokens() {
        for raw in ["", "abc", "a.b", "a.b.c.d", "!!.!!.!!"] {
            assert!(matches!(
                verify_session_token(raw, &app(), STORE, NOW),
                Err(SessionTokenError::Malformed(_))
            ));
        }
    }

    #[test]
    fn test_token_from_header_or_query() {
        let (parts, ()) = Request::builder()
            .uri("/")
            .header(AUTHORIZATION, "Bearer abc.def.ghi")
            .body(())
            .unwrap()
            .into_parts();
        assert_eq!(token_from_parts(&parts).as_deref(), Some("abc.def.ghi"));

        let (parts, ()) = Request::builder()
            .uri("/?shop=x&id_token=abc.def.ghi")
            .body(())
            .unwrap()
            .into_parts();
        assert_eq!(token_from_parts(&parts).as_deref(), Some("abc.def.ghi"));

        let (parts, ()) = Request::builder()
            .uri("/")
            .header(AUTHORIZATION, "Basic Zm9vOmJhcg==")
            .body(())
            .unwrap()
            .into_parts();
        assert_eq!(token_from_parts(&parts), None);
    }
}
