use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Error payload carried inside the `{ success: false, error: ... }`
/// envelope built at the error boundary.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ApiError {
    pub code: String,
    pub message: String,
}
