use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Claims carried by a Supabase-issued JWT.
///
/// `sub` is the account UUID in `auth.users`; `user_metadata` is whatever
/// profile data the OAuth provider handed over at sign-in.
#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    /// The auth account UUID.
    pub sub: String,
    /// Token expiration (Unix timestamp).
    pub exp: usize,
    /// Token issued-at (Unix timestamp).
    pub iat: Option<usize>,
    /// Issuer, normally the project URL + `/auth/v1`.
    pub iss: Option<String>,
    /// Email from the auth provider.
    pub email: Option<String>,
    /// Supabase role (e.g. "authenticated").
    pub role: Option<String>,
    /// Profile metadata from the OAuth provider.
    pub user_metadata: Option<UserMetadata>,
}

/// Profile fields populated by the OAuth provider. Which of these are set
/// varies by provider, so the accessors below try each in turn.
#[derive(Debug, Serialize, Deserialize)]
pub struct UserMetadata {
    pub full_name: Option<String>,
    pub name: Option<String>,
    pub avatar_url: Option<String>,
    pub picture: Option<String>,
    pub email: Option<String>,
}

impl Claims {
    /// The account UUID from the `sub` claim.
    pub fn user_id(&self) -> Result<Uuid, String> {
        Uuid::parse_str(&self.sub).map_err(|e| format!("Invalid UUID in sub claim: {e}"))
    }

    /// Best-effort display name from metadata.
    pub fn display_name(&self) -> Option<String> {
        self.user_metadata
            .as_ref()
            .and_then(|m| m.full_name.clone().or_else(|| m.name.clone()))
    }

    /// Best-effort avatar URL from metadata.
    pub fn avatar_url(&self) -> Option<String> {
        self.user_metadata
            .as_ref()
            .and_then(|m| m.avatar_url.clone().or_else(|| m.picture.clone()))
    }

    /// Best-effort email: prefer the top-level claim, fall back to metadata.
    pub fn user_email(&self) -> Option<String> {
        self.email
            .clone()
            .or_else(|| self.user_metadata.as_ref().and_then(|m| m.email.clone()))
    }
}
