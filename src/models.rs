use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Body returned by create, replace and delete.
///
/// ```json
/// {"id": 6, "message": "Employee created successfully"}
/// ```
///
/// `id` is only present on create.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
pub struct MutationResponse {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<i32>,
    pub message: String,
}

impl MutationResponse {
    pub fn created(id: i32, display_name: &str) -> Self {
        Self {
            id: Some(id),
            message: format!("{display_name} created successfully"),
        }
    }

    pub fn updated(display_name: &str) -> Self {
        Self {
            id: None,
            message: format!("{display_name} updated successfully"),
        }
    }

    pub fn deleted(display_name: &str) -> Self {
        Self {
            id: None,
            message: format!("{display_name} deleted successfully"),
        }
    }
}

/// Body of the single-field status routes, e.g. `{"status": "Approved"}`.
#[derive(Debug, Deserialize, Serialize)]
pub struct StatusChange<S> {
    pub status: S,
}
