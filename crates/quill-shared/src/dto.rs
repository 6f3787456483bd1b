//! Data Transfer Objects - request/response types for the API.

use serde::{Deserialize, Serialize};

/// Request to create a post.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreatePostRequest {
    pub title: String,
    pub content: String,
    #[serde(default)]
    pub category: Option<String>,
}

/// Request to edit a post. Omitted fields are left untouched.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdatePostRequest {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub content: Option<String>,
    #[serde(default)]
    pub category: Option<String>,
}

/// A post as shown to readers.
///
/// `category` is the display category, so it is never empty.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PostResponse {
    pub id: String,
    pub title: String,
    pub content: String,
    pub category: String,
    pub created_at: String,
    pub likes: u64,
}

/// Request to login.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

/// Response containing authentication tokens.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthResponse {
    pub access_token: String,
    pub token_type: String,
    pub expires_in: u64,
}

/// Partial change to the editor draft.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DraftUpdateRequest {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub content: Option<String>,
    #[serde(default)]
    pub category: Option<String>,
}

/// Toolbar action over the draft content.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FormatRequest {
    pub selection_start: usize,
    pub selection_end: usize,
    pub tag: String,
}

/// Current editor state as seen by the admin form.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EditorResponse {
    /// Id of the post being edited; absent while creating.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub editing: Option<String>,
    pub title: String,
    pub content: String,
    pub category: String,
}
