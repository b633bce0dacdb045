///! Tests for the JWT claims layer.
///!
///! Token signatures are validated against the auth provider's JWKS, which
///! needs the network; what can (and does) go wrong offline is the mapping
///! from claims to a local user identity, so that is what is tested here.
use uuid::Uuid;

use gigboard_backend::auth::jwt::{Claims, UserMetadata};

fn claims_with_metadata(sub: &str, metadata: Option<UserMetadata>) -> Claims {
    Claims {
        sub: sub.to_string(),
        exp: 4_102_444_800, // far future
        iat: None,
        iss: Some("https://example.supabase.co/auth/v1".to_string()),
        email: Some("alice@example.com".to_string()),
        role: Some("authenticated".to_string()),
        user_metadata: metadata,
    }
}

#[test]
fn user_id_comes_from_the_sub_claim() {
    let id = Uuid::new_v4();
    let claims = claims_with_metadata(&id.to_string(), None);

    assert_eq!(claims.user_id().unwrap(), id);
}

#[test]
fn malformed_sub_claim_is_rejected() {
    let claims = claims_with_metadata("not-a-uuid", None);

    assert!(claims.user_id().is_err());
}

#[test]
fn display_name_prefers_full_name_over_name() {
    let claims = claims_with_metadata(
        &Uuid::new_v4().to_string(),
        Some(UserMetadata {
            full_name: Some("Alice Smith".to_string()),
            name: Some("alice".to_string()),
            avatar_url: None,
            picture: None,
            email: None,
        }),
    );

    assert_eq!(claims.display_name().unwrap(), "Alice Smith");
}

#[test]
fn display_name_falls_back_to_name() {
    let claims = claims_with_metadata(
        &Uuid::new_v4().to_string(),
        Some(UserMetadata {
            full_name: None,
            name: Some("alice".to_string()),
            avatar_url: None,
            picture: None,
            email: None,
        }),
    );

    assert_eq!(claims.display_name().unwrap(), "alice");
}

#[test]
fn avatar_url_falls_back_to_picture() {
    let claims = claims_with_metadata(
        &Uuid::new_v4().to_string(),
        Some(UserMetadata {
            full_name: None,
            name: None,
            avatar_url: None,
            picture: Some("https://example.com/p.png".to_string()),
            email: None,
        }),
    );

    assert_eq!(claims.avatar_url().unwrap(), "https://example.com/p.png");
}

#[test]
fn email_prefers_the_top_level_claim() {
    let claims = claims_with_metadata(
        &Uuid::new_v4().to_string(),
        Some(UserMetadata {
            full_name: None,
            name: None,
            avatar_url: None,
            picture: None,
            email: Some("metadata@example.com".to_string()),
        }),
    );

    assert_eq!(claims.user_email().unwrap(), "alice@example.com");
}

#[test]
fn helpers_cope_with_missing_metadata() {
    let claims = claims_with_metadata(&Uuid::new_v4().to_string(), None);

    assert_eq!(claims.user_email().unwrap(), "alice@example.com");
    assert!(claims.display_name().is_none());
    assert!(claims.avatar_url().is_none());
}
