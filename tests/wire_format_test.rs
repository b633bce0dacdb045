///! Tests pinning the JSON wire format the web client depends on.
///!
///! The frontend string-matches gig and bid statuses ("open", "hired", ...)
///! and sends the hire request as {"bidId": "..."}, so these shapes are
///! contracts, not implementation details.
use uuid::Uuid;

use gigboard_backend::models::bids::{self, BidStatus, HireRequest};
use gigboard_backend::models::gigs::{self, GigStatus};
use gigboard_backend::models::users::{self, UserResponse};

#[test]
fn hire_request_uses_the_bid_id_wire_name() {
    let id = Uuid::new_v4();
    let body = format!(r#"{{"bidId": "{id}"}}"#);

    let req: HireRequest = serde_json::from_str(&body).unwrap();
    assert_eq!(req.bid_id, id);
}

#[test]
fn hire_request_without_bid_id_is_rejected() {
    assert!(serde_json::from_str::<HireRequest>("{}").is_err());
    assert!(serde_json::from_str::<HireRequest>(r#"{"bidId": "nope"}"#).is_err());
}

#[test]
fn gig_status_serializes_lowercase() {
    let gig = gigs::Model {
        id: Uuid::new_v4(),
        title: "Logo design".to_string(),
        description: "Vector logo, two revisions".to_string(),
        budget: 150.0,
        owner_id: Uuid::new_v4(),
        status: GigStatus::Open,
        created_at: chrono::Utc::now(),
    };

    let json = serde_json::to_value(&gig).unwrap();
    assert_eq!(json["status"], "open");

    let assigned = gigs::Model {
        status: GigStatus::Assigned,
        ..gig
    };
    let json = serde_json::to_value(&assigned).unwrap();
    assert_eq!(json["status"], "assigned");
}

#[test]
fn bid_status_serializes_lowercase() {
    let bid = bids::Model {
        id: Uuid::new_v4(),
        gig_id: Uuid::new_v4(),
        freelancer_id: Uuid::new_v4(),
        message: "I can start today".to_string(),
        price: 120.0,
        status: BidStatus::Pending,
        created_at: chrono::Utc::now(),
    };

    for (status, expected) in [
        (BidStatus::Pending, "pending"),
        (BidStatus::Hired, "hired"),
        (BidStatus::Rejected, "rejected"),
    ] {
        let bid = bids::Model {
            status,
            ..bid.clone()
        };
        let json = serde_json::to_value(&bid).unwrap();
        assert_eq!(json["status"], expected);
    }
}

#[test]
fn user_response_exposes_only_profile_fields() {
    let user = users::Model {
        id: Uuid::new_v4(),
        email: "alice@example.com".to_string(),
        display_name: Some("Alice".to_string()),
        avatar_url: None,
        auth_provider: "supabase".to_string(),
        created_at: chrono::Utc::now(),
    };

    let json = serde_json::to_value(UserResponse::from(user)).unwrap();
    let obj = json.as_object().unwrap();

    assert!(obj.contains_key("email"));
    assert!(obj.contains_key("display_name"));
    // Provider internals stay out of API responses.
    assert!(!obj.contains_key("auth_provider"));
}
