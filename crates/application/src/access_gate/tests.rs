use std::collections::HashMap;
use std::sync::Arc;

use hrdesk_core::{AccessError, CredentialError, TokenClaims};
use hrdesk_domain::{AllowList, CanonicalRole, RoleLabelMap};

use crate::{AccessPolicy, TokenVerifier};

use super::{AccessGate, ensure_allowed};

struct FakeTokenVerifier {
    tokens: HashMap<String, TokenClaims>,
}

impl TokenVerifier for FakeTokenVerifier {
    fn verify(&self, token: &str) -> Result<TokenClaims, CredentialError> {
        self.tokens
            .get(token)
            .cloned()
            .ok_or_else(|| CredentialError::InvalidCredential("bad signature".to_owned()))
    }
}

fn gate_with(tokens: Vec<(&str, &str, Vec<&str>)>) -> AccessGate {
    let tokens = tokens
        .into_iter()
        .map(|(token, subject, roles)| {
            (
                token.to_owned(),
                TokenClaims::new(subject, roles.into_iter().map(str::to_owned).collect())
                    .with_employee_id(Some(format!("emp-{subject}"))),
            )
        })
        .collect();

    AccessGate::new(
        Arc::new(FakeTokenVerifier { tokens }),
        RoleLabelMap::builtin(),
    )
}

#[test]
fn legacy_admin_label_is_admitted_to_admin_route() {
    let gate = gate_with(vec![("t-admin", "alice", vec!["Admin"])]);
    let allow_list = AllowList::new(&[CanonicalRole::Admin]);

    let context = gate.admit(Some("t-admin"), &allow_list);
    let Ok(context) = context else {
        panic!("admin should be admitted");
    };

    assert_eq!(context.subject(), "alice");
    assert_eq!(context.roles(), ["role_admin".to_owned()]);
    assert_eq!(context.employee_id(), Some("emp-alice"));
}

#[test]
fn employee_is_forbidden_from_admin_route() {
    let gate = gate_with(vec![("t-emp", "bob", vec!["role_employee"])]);

    let result = gate.admit(Some("t-emp"), &AccessPolicy::rbac_write());

    assert!(matches!(
        result,
        Err(AccessError::Forbidden { ref subject, ref allowed })
            if subject == "bob" && allowed == &vec!["role_admin".to_owned()]
    ));
}

#[test]
fn missing_credential_is_unauthenticated() {
    let gate = gate_with(Vec::new());

    let result = gate.admit(None, &AccessPolicy::rbac_read());

    assert_eq!(
        result,
        Err(AccessError::Unauthenticated(
            CredentialError::MissingCredential
        ))
    );
}

#[test]
fn blank_credential_is_treated_as_missing() {
    let gate = gate_with(Vec::new());

    let result = gate.verify(Some("   "));

    assert_eq!(result, Err(CredentialError::MissingCredential));
}

#[test]
fn unverifiable_credential_is_unauthenticated_even_with_admin_claims() {
    let gate = gate_with(vec![("t-admin", "alice", vec!["role_admin"])]);

    let result = gate.admit(Some("forged"), &AccessPolicy::rbac_write());

    assert!(matches!(
        result,
        Err(AccessError::Unauthenticated(
            CredentialError::InvalidCredential(_)
        ))
    ));
}

#[test]
fn token_without_roles_is_valid_but_forbidden() {
    let gate = gate_with(vec![("t-none", "carol", vec![])]);

    let claims = gate.verify(Some("t-none"));
    assert!(matches!(claims, Ok(ref claims) if claims.role_labels().is_empty()));

    let result = gate.admit(Some("t-none"), &AccessPolicy::self_service());
    assert!(matches!(result, Err(AccessError::Forbidden { .. })));
}

#[test]
fn hr_can_write_assignments_but_not_roles() {
    let gate = gate_with(vec![("t-hr", "dana", vec!["HR"])]);

    assert!(
        gate.admit(Some("t-hr"), &AccessPolicy::assignment_write())
            .is_ok()
    );
    assert!(gate.admit(Some("t-hr"), &AccessPolicy::rbac_write()).is_err());
}

#[test]
fn normalized_roles_keep_token_order_and_duplicates() {
    let gate = gate_with(vec![("t-mixed", "erin", vec!["Manager", "role_manager", "Intern"])]);

    let Ok(claims) = gate.verify(Some("t-mixed")) else {
        panic!("token should verify");
    };

    assert_eq!(
        gate.normalize(&claims),
        vec![
            "role_manager".to_owned(),
            "role_manager".to_owned(),
            "Intern".to_owned(),
        ]
    );
}

#[test]
fn ensure_allowed_rechecks_admitted_context() {
    let gate = gate_with(vec![("t-mgr", "frank", vec!["role_manager"])]);

    let Ok(context) = gate.admit(Some("t-mgr"), &AccessPolicy::self_service()) else {
        panic!("manager should pass self-service route");
    };

    assert!(ensure_allowed(&context, &AccessPolicy::self_service()).is_ok());
    assert!(ensure_allowed(&context, &AccessPolicy::rbac_read()).is_err());
}
