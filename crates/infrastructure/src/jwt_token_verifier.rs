use hrdesk_application::TokenVerifier;
use hrdesk_core::{CredentialError, TokenClaims};
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{Algorithm, DecodingKey, Validation, decode};
use serde::Deserialize;
use tracing::debug;

/// HS256 bearer token verifier backed by a shared secret.
pub struct JwtTokenVerifier {
    decoding_key: DecodingKey,
    validation: Validation,
}

impl JwtTokenVerifier {
    /// Creates a verifier for `secret` allowing `leeway_seconds` of clock skew.
    #[must_use]
    pub fn new(secret: &[u8], leeway_seconds: u64) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = leeway_seconds;
        // Issuers may stamp an audience; this service does not scope tokens by it.
        validation.validate_aud = false;
        validation.set_required_spec_claims(&["exp", "sub"]);

        Self {
            decoding_key: DecodingKey::from_secret(secret),
            validation,
        }
    }
}

// Older issuers wrote a single `role` string instead of the `roles` array.
#[derive(Debug, Deserialize)]
struct AccessTokenPayload {
    sub: String,
    #[serde(default)]
    roles: Vec<String>,
    #[serde(default)]
    role: Option<String>,
    #[serde(default)]
    employee_id: Option<String>,
    #[serde(default)]
    username: Option<String>,
    #[serde(default)]
    email: Option<String>,
}

impl From<AccessTokenPayload> for TokenClaims {
    fn from(payload: AccessTokenPayload) -> Self {
        let mut role_labels = payload.roles;
        role_labels.extend(payload.role);

        TokenClaims::new(payload.sub, role_labels)
            .with_employee_id(payload.employee_id)
            .with_contact(payload.username, payload.email)
    }
}

impl TokenVerifier for JwtTokenVerifier {
    fn verify(&self, token: &str) -> Result<TokenClaims, CredentialError> {
        let data = decode::<AccessTokenPayload>(token, &self.decoding_key, &self.validation)
            .map_err(|error| {
                let reason = match error.kind() {
                    ErrorKind::ExpiredSignature => "token has expired".to_owned(),
                    ErrorKind::ImmatureSignature => "token is not yet valid".to_owned(),
                    ErrorKind::InvalidSignature => "token signature is invalid".to_owned(),
                    ErrorKind::InvalidAlgorithm => "token algorithm is not accepted".to_owned(),
                    ErrorKind::MissingRequiredClaim(claim) => {
                        format!("token is missing required claim '{claim}'")
                    }
                    _ => format!("token is malformed: {error}"),
                };
                CredentialError::InvalidCredential(reason)
            })?;

        let claims = TokenClaims::from(data.claims);
        debug!(
            subject = claims.subject(),
            role_labels = ?claims.role_labels(),
            employee_id = ?claims.employee_id(),
            username = ?claims.username(),
            "decoded access token"
        );

        Ok(claims)
    }
}
