use axum::http::{HeaderMap, header};

/// Pull the token out of `Authorization: Bearer <token>`.
///
/// The value must start with `Bearer` (case-sensitive); the token is everything after the
/// first space. No space, a non-ASCII value, another scheme or an empty token read as "absent".
pub fn extract_bearer(headers: &HeaderMap) -> Option<&str> {
    let value = headers.get(header::AUTHORIZATION)?.to_str().ok()?;
    if !value.starts_with("Bearer") {
        return None;
    }
    let (_, token) = value.split_once(' ')?;

    if token.is_empty() { None } else { Some(token) }
}
