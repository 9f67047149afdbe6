use axum::extract::{Request, State};
use axum::http::{HeaderMap, header};
use axum::middleware::Next;
use axum::response::Response;
use tracing::{info, warn};

use crate::api_config::LegacyAuthScheme;
use crate::error::ApiResult;
use crate::state::RouteGate;

const BEARER_SCHEME: &str = "bearer";
const LEGACY_SCHEME: &str = "jwt";

/// Admits the request through the route group's allow-list and exposes the
/// resulting `AccessContext` to handlers.
pub async fn require_roles(
    State(gate): State<RouteGate>,
    mut request: Request,
    next: Next,
) -> ApiResult<Response> {
    let credential = extract_credential(request.headers(), gate.legacy_auth_scheme);
    let context = gate
        .access_gate
        .admit(credential.as_deref(), &gate.allow_list)?;

    request.extensions_mut().insert(context);
    Ok(next.run(request).await)
}

/// Returns the token carried by the `Authorization` header.
///
/// `Bearer` is the standard scheme; `JWT` is a deprecated alias honoured
/// according to `legacy`. Anything else counts as no credential.
pub fn extract_credential(headers: &HeaderMap, legacy: LegacyAuthScheme) -> Option<String> {
    let value = headers.get(header::AUTHORIZATION)?.to_str().ok()?.trim();
    let (scheme, token) = value.split_once(|ch: char| ch.is_ascii_whitespace())?;
    let token = token.trim();

    if scheme.eq_ignore_ascii_case(BEARER_SCHEME) {
        return Some(token.to_owned());
    }

    if scheme.eq_ignore_ascii_case(LEGACY_SCHEME) {
        return match legacy {
            LegacyAuthScheme::Accept => {
                warn!("request authenticated with deprecated 'JWT' authorization scheme");
                Some(token.to_owned())
            }
            LegacyAuthScheme::Reject => {
                info!("rejected deprecated 'JWT' authorization scheme");
                None
            }
        };
    }

    None
}
