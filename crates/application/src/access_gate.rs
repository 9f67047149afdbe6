use std::sync::Arc;

use hrdesk_core::{AccessContext, AccessError, CredentialError, TokenClaims};
use hrdesk_domain::{AllowList, RoleLabelMap};
use tracing::{debug, info};

use crate::TokenVerifier;

/// Request pipeline: token verification, role normalization, allow-list check.
///
/// Holds only immutable configuration, so one instance is shared by every
/// request.
#[derive(Clone)]
pub struct AccessGate {
    verifier: Arc<dyn TokenVerifier>,
    role_labels: Arc<RoleLabelMap>,
}

impl AccessGate {
    /// Creates a gate from a verifier and the role label table.
    #[must_use]
    pub fn new(verifier: Arc<dyn TokenVerifier>, role_labels: RoleLabelMap) -> Self {
        Self {
            verifier,
            role_labels: Arc::new(role_labels),
        }
    }

    /// Verifies a raw credential extracted from the request.
    pub fn verify(&self, credential: Option<&str>) -> Result<TokenClaims, CredentialError> {
        let token = credential
            .map(str::trim)
            .filter(|token| !token.is_empty())
            .ok_or(CredentialError::MissingCredential)?;

        self.verifier.verify(token)
    }

    /// Maps the claims' role labels to canonical identifiers.
    #[must_use]
    pub fn normalize(&self, claims: &TokenClaims) -> Vec<String> {
        self.role_labels.normalize(claims.role_labels())
    }

    /// Decides access for already verified claims.
    pub fn authorize(
        &self,
        claims: &TokenClaims,
        allow_list: &AllowList,
    ) -> Result<AccessContext, AccessError> {
        let roles = self.normalize(claims);
        let context = AccessContext::new(
            claims.subject(),
            claims.employee_id().map(str::to_owned),
            roles,
        );

        ensure_allowed(&context, allow_list)?;
        Ok(context)
    }

    /// Runs the full pipeline for one request.
    pub fn admit(
        &self,
        credential: Option<&str>,
        allow_list: &AllowList,
    ) -> Result<AccessContext, AccessError> {
        let claims = self.verify(credential).map_err(|error| {
            info!(reason = %error, "access denied: credential rejected");
            AccessError::Unauthenticated(error)
        })?;

        debug!(
            subject = claims.subject(),
            role_labels = ?claims.role_labels(),
            employee_id = ?claims.employee_id(),
            "credential verified"
        );

        self.authorize(&claims, allow_list)
    }
}

/// Checks an already admitted caller against another allow-list.
pub fn ensure_allowed(context: &AccessContext, allow_list: &AllowList) -> Result<(), AccessError> {
    if allow_list.permits(context.roles()) {
        return Ok(());
    }

    let allowed = allow_list.to_strings();
    info!(
        subject = context.subject(),
        roles = ?context.roles(),
        allowed = ?allowed,
        "access denied: no admitted role"
    );

    Err(AccessError::Forbidden {
        subject: context.subject().to_owned(),
        allowed,
    })
}

#[cfg(test)]
mod tests;
