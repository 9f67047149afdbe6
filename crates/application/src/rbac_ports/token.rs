use hrdesk_core::{CredentialError, TokenClaims};

/// Port for cryptographic verification of bearer credentials.
///
/// Implementations hold their verification secret for the process lifetime
/// and keep no per-call state.
pub trait TokenVerifier: Send + Sync {
    /// Verifies signature and expiry of `token` and returns its claims.
    fn verify(&self, token: &str) -> Result<TokenClaims, CredentialError>;
}
