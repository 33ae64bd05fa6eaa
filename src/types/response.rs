use serde::Serialize;
use utoipa::ToSchema;

/// Flat acknowledgement body: `{"success": true}`
#[derive(Debug, Serialize, ToSchema)]
pub struct SuccessResponse {
    pub success: bool,
}

impl SuccessResponse {
    pub fn new() -> Self {
        Self { success: true }
    }
}

impl Default for SuccessResponse {
    fn default() -> Self {
        Self::new()
    }
}

/// Flat update acknowledgement body: `{"updated": true}`
#[derive(Debug, Serialize, ToSchema)]
pub struct UpdatedResponse {
    pub updated: bool,
}

impl UpdatedResponse {
    pub fn new() -> Self {
        Self { updated: true }
    }
}

impl Default for UpdatedResponse {
    fn default() -> Self {
        Self::new()
    }
}
