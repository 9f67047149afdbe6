use hrdesk_core::AccessContext;
use serde::Serialize;

/// Caller identity as seen by the access gate.
#[derive(Debug, Serialize)]
pub struct AccessContextResponse {
    pub subject: String,
    pub employee_id: Option<String>,
    pub roles: Vec<String>,
}

impl From<&AccessContext> for AccessContextResponse {
    fn from(context: &AccessContext) -> Self {
        Self {
            subject: context.subject().to_owned(),
            employee_id: context.employee_id().map(str::to_owned),
            roles: context.roles().to_vec(),
        }
    }
}
