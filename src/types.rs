//! Wire types for the backend resources this service transports.
//!
//! Relayed bodies are never re-encoded through these; they exist for request
//! validation and for the pages that render backend data themselves.
use serde::{Deserialize, Serialize};

/// Registered numbers per user, enforced by the backend.
pub const NUMBER_LIMIT: usize = 4;

// ---------------------------------------------------------------------------
// Requests
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LoginRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
}

impl LoginRequest {
    /// Both fields, when present and non-empty.
    pub fn credentials(&self) -> Option<(&str, &str)> {
        match (self.email.as_deref(), self.password.as_deref()) {
            (Some(email), Some(password)) if !email.is_empty() && !password.is_empty() => Some((email, password)),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ForgotPasswordRequest {
    pub email: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChangePasswordRequest {
    pub new_password: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateInstanceRequest {
    pub instance_name: Option<String>,
    pub token: Option<String>,
}

// ---------------------------------------------------------------------------
// User configuration
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserConfig {
    #[serde(rename = "instancia_sdr", default)]
    pub sdr_instance: String,
    #[serde(rename = "fixed_nome", default)]
    pub closer_name: String,
    #[serde(rename = "numero_destino", default)]
    pub closer_number: String,
    #[serde(rename = "instancia_ia", default)]
    pub ai_instance: String,
    #[serde(rename = "numero_fixo_grupo", default)]
    pub group_number: String,
    #[serde(rename = "google_calendar_id", default)]
    pub calendar_id: String,
}

/// `GET /api/config-user` answers `{ "success": true, "data": [config] }`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UserConfigEnvelope {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub data: Vec<UserConfig>,
}

impl UserConfigEnvelope {
    pub fn into_first(self) -> Option<UserConfig> {
        if self.success {
            self.data.into_iter().next()
        } else {
            None
        }
    }
}

// ---------------------------------------------------------------------------
// WhatsApp instances
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserInstance {
    pub id: String,
    pub instance_name: String,
    #[serde(default)]
    pub instance_id: Option<String>,
    #[serde(default)]
    pub created_at: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ListInstancesResponse {
    #[serde(default)]
    pub instances: Vec<UserInstance>,
    pub count: usize,
    pub limit: usize,
}

impl ListInstancesResponse {
    pub fn is_limit_reached(&self) -> bool {
        self.count >= self.limit
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QrCode {
    pub pairing_code: Option<String>,
    pub code: String,
    pub base64: String,
}

// ---------------------------------------------------------------------------
// Registered numbers
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserNumber {
    pub id: String,
    #[serde(default)]
    pub user_email: Option<String>,
    pub number: String,
    #[serde(default)]
    pub created_at: Option<String>,
}

/// The backend has answered both a bare array and `{ "numbers": [...] }`.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum NumberList {
    Bare(Vec<UserNumber>),
    Wrapped {
        #[serde(default)]
        numbers: Vec<UserNumber>,
    },
}

impl NumberList {
    pub fn into_vec(self) -> Vec<UserNumber> {
        match self {
            NumberList::Bare(numbers) | NumberList::Wrapped { numbers } => numbers,
        }
    }
}

// ---------------------------------------------------------------------------
// Groups
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WhatsAppGroup {
    pub id: String,
    pub subject: String,
    #[serde(default)]
    pub creation: Option<i64>,
    #[serde(default)]
    pub owner: Option<String>,
    #[serde(default)]
    pub participants: Option<u32>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ListGroupsResponse {
    #[serde(default)]
    pub groups: Vec<WhatsAppGroup>,
}
