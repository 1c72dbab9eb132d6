use serde::{Deserialize, Serialize};

use crate::generator::{PasswordOptions, DEFAULT_LENGTH};
use crate::strength::StrengthReport;

/// A labeled password persisted to the store file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SavedPassword {
    pub password: String,
    pub label: String,
    pub created_at: String,
}

impl SavedPassword {
    /// Copy suitable for listings: the password is replaced by bullets of
    /// the same length.
    pub fn masked(&self) -> Self {
        Self {
            password: "•".repeat(self.password.chars().count()),
            label: self.label.clone(),
            created_at: self.created_at.clone(),
        }
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct GenerateRequest {
    pub length: Option<usize>,
    pub use_digits: Option<bool>,
    pub use_special_chars: Option<bool>,
}

impl From<GenerateRequest> for PasswordOptions {
    fn from(req: GenerateRequest) -> Self {
        Self {
            length: req.length.unwrap_or(DEFAULT_LENGTH),
            use_digits: req.use_digits.unwrap_or(true),
            use_special_chars: req.use_special_chars.unwrap_or(true),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct GeneratedPassword {
    pub password: String,
    pub strength: StrengthReport,
}

#[derive(Debug, Deserialize)]
pub struct StrengthRequest {
    pub password: String,
}

#[derive(Debug, Serialize)]
pub struct GuideEntry {
    pub strength: String,
    pub icon: &'static str,
    pub description: &'static str,
}

#[derive(Debug, Deserialize)]
pub struct SavePasswordRequest {
    pub password: String,
    pub label: String,
}

#[derive(Debug, Default, Deserialize)]
pub struct RevealQuery {
    #[serde(default)]
    pub reveal: bool,
}

#[derive(Debug, Serialize)]
pub struct ListPasswordsResponse {
    pub passwords: Vec<SavedPassword>,
}

#[derive(Debug, Deserialize)]
pub struct CopyRequest {
    pub password: String,
}

#[derive(Debug, Serialize)]
pub struct CopyResponse {
    pub copied: bool,
}

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub service: String,
    pub version: String,
}
