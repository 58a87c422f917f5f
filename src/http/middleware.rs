//! Admin authentication middleware - Supabase JWT verification

use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};
use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine};
use hmac::{Hmac, Mac};
use serde::Deserialize;
use sha2::Sha256;

use crate::app::AppState;
use crate::http::error::AppError;

type HmacSha256 = Hmac<Sha256>;

/// Claims we care about from the Supabase access token
#[derive(Debug, Clone, Deserialize)]
pub struct AdminClaims {
    pub sub: String,
    pub exp: u64,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub role: Option<String>,
}

/// The authenticated admin, available to handlers via request extensions
#[derive(Debug, Clone)]
pub struct AdminSession {
    pub token: String,
    pub claims: AdminClaims,
}

/// Verify a GoTrue-issued JWT: HMAC-SHA256 signature over
/// "header.payload" plus an expiry check.
pub fn verify_access_token(token: &str, secret: &str) -> Result<AdminClaims, AppError> {
    let invalid = || AppError::Unauthorized("Geçersiz oturum.".to_string());

    let mut parts = token.splitn(3, '.');
    let (header, payload, signature) = match (parts.next(), parts.next(), parts.next()) {
        (Some(h), Some(p), Some(s)) if !s.is_empty() => (h, p, s),
        _ => return Err(invalid()),
    };

    let mut mac = HmacSha256::new_from_slice(secret.as_bytes()).map_err(|_| invalid())?;
    mac.update(header.as_bytes());
    mac.update(b".");
    mac.update(payload.as_bytes());

    let provided = URL_SAFE_NO_PAD.decode(signature).map_err(|_| invalid())?;
    mac.verify_slice(&provided).map_err(|_| invalid())?;

    let payload_json = URL_SAFE_NO_PAD.decode(payload).map_err(|_| invalid())?;
    let claims: AdminClaims = serde_json::from_slice(&payload_json).map_err(|_| invalid())?;

    let now = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0);

    if claims.exp < now {
        return Err(AppError::Unauthorized("Oturum süresi doldu.".to_string()));
    }

    Ok(claims)
}

/// Middleware guarding the admin routes
pub async fn require_admin(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, AppError> {
    let token = request
        .headers()
        .get("Authorization")
        .and_then(|h| h.to_str().ok())
        .and_then(|h| h.strip_prefix("Bearer "))
        .ok_or_else(|| AppError::Unauthorized("Giriş yapmanız gerekiyor.".to_string()))?
        .to_string();

    let claims = verify_access_token(&token, &state.config.supabase_jwt_secret)?;

    request
        .extensions_mut()
        .insert(AdminSession { token, claims });

    Ok(next.run(request).await)
}

#[cfg(test)]
mod tests {
    use super::*;

    const SECRET: &str = "test-jwt-secret";

    fn sign_token(payload: &str, secret: &str) -> String {
        let header = URL_SAFE_NO_PAD.encode(br#"{"alg":"HS256","typ":"JWT"}"#);
        let payload = URL_SAFE_NO_PAD.encode(payload.as_bytes());

        let mut mac = HmacSha256::new_from_slice(secret.as_bytes()).unwrap();
        mac.update(header.as_bytes());
        mac.update(b".");
        mac.update(payload.as_bytes());
        let signature = URL_SAFE_NO_PAD.encode(mac.finalize().into_bytes());

        format!("{}.{}.{}", header, payload, signature)
    }

    fn future_exp() -> u64 {
        std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .unwrap()
            .as_secs()
            + 3600
    }

    #[test]
    fn accepts_valid_token() {
        let payload = format!(
            r#"{{"sub":"admin-1","exp":{},"email":"admin@example.com"}}"#,
            future_exp()
        );
        let token = sign_token(&payload, SECRET);

        let claims = verify_access_token(&token, SECRET).unwrap();
        assert_eq!(claims.sub, "admin-1");
        assert_eq!(claims.email.as_deref(), Some("admin@example.com"));
    }

    #[test]
    fn rejects_wrong_secret() {
        let payload = format!(r#"{{"sub":"admin-1","exp":{}}}"#, future_exp());
        let token = sign_token(&payload, "other-secret");

        assert!(verify_access_token(&token, SECRET).is_err());
    }

    #[test]
    fn rejects_expired_token() {
        let token = sign_token(r#"{"sub":"admin-1","exp":1}"#, SECRET);
        assert!(verify_access_token(&token, SECRET).is_err());
    }

    #[test]
    fn rejects_malformed_token() {
        assert!(verify_access_token("not-a-jwt", SECRET).is_err());
        assert!(verify_access_token("a.b", SECRET).is_err());
    }
}
