//! HTTP API response DTOs.

use serde::{Deserialize, Serialize};

/// Response of `GET /api/health`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HealthDto {
    pub status: String,
}

/// Response of `GET /api/presence`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PresenceDto {
    pub count: usize,
    pub users: Vec<String>,
    /// RFC 3339
    pub generated_at: String,
}
