use actix_web::{HttpResponse, ResponseError, http::StatusCode, web};
use sea_orm::{DatabaseConnection, DbErr};
use std::sync::Arc;
use thiserror::Error;
use uuid::Uuid;

use crate::auth::middleware::AuthenticatedUser;
use crate::cache::{RedisCache, keys};
use crate::db::bids::{self as bid_db, HireOutcome};
use crate::models::bids::HireRequest;
use crate::models::gigs::{self, GigStatus};

/// Everything that can go wrong while hiring, mapped onto HTTP statuses.
/// Missing/invalid credentials (401) are rejected by the extractor and a
/// malformed body (400) by the JSON extractor, both before this handler runs.
#[derive(Debug, Error)]
pub enum HireError {
    #[error("Bid not found")]
    BidNotFound,
    #[error("Only gig owner can hire")]
    NotGigOwner,
    #[error("Gig already has a hired freelancer")]
    AlreadyAssigned,
    #[error("Internal server error")]
    Database(#[from] DbErr),
}

impl ResponseError for HireError {
    fn status_code(&self) -> StatusCode {
        match self {
            HireError::BidNotFound => StatusCode::NOT_FOUND,
            HireError::NotGigOwner => StatusCode::FORBIDDEN,
            HireError::AlreadyAssigned => StatusCode::CONFLICT,
            HireError::Database(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        if let HireError::Database(e) = self {
            // Surface a generic message; the store error goes to the log only.
            tracing::error!("hire failed: {e}");
        }
        HttpResponse::build(self.status_code()).json(serde_json::json!({
            "error": self.to_string(),
        }))
    }
}

/// The checks a hire must pass before any write, in order: the caller must
/// own the parent gig, and the gig must not already be assigned.
pub fn check_hire_preconditions(caller_id: Uuid, gig: &gigs::Model) -> Result<(), HireError> {
    if gig.owner_id != caller_id {
        return Err(HireError::NotGigOwner);
    }
    if gig.status == GigStatus::Assigned {
        return Err(HireError::AlreadyAssigned);
    }
    Ok(())
}

/// POST /api/hire — the gig owner accepts one bid.
///
/// The target bid becomes `hired`, every other bid on the gig becomes
/// `rejected`, and the gig becomes `assigned` — one transaction, so no
/// half-hired state is ever observable. The gig status is re-checked
/// inside the transaction, which makes the second of two racing hire
/// attempts (and any repeat call after a success) fail with a conflict.
pub async fn hire_freelancer(
    user: AuthenticatedUser,
    db: web::Data<DatabaseConnection>,
    cache: web::Data<Arc<RedisCache>>,
    body: web::Json<HireRequest>,
) -> Result<HttpResponse, HireError> {
    let caller_id = user.0.id;
    let bid_id = body.bid_id;

    // One read: the bid joined with its parent gig's owner and status.
    let (bid, gig) = bid_db::get_bid_with_gig(db.get_ref(), bid_id)
        .await?
        .ok_or(HireError::BidNotFound)?;

    check_hire_preconditions(caller_id, &gig)?;

    match bid_db::hire_bid(db.get_ref(), bid.id, bid.gig_id).await? {
        HireOutcome::Hired => {}
        HireOutcome::GigAlreadyAssigned => return Err(HireError::AlreadyAssigned),
        HireOutcome::BidGone => return Err(HireError::BidNotFound),
    }

    tracing::info!(gig_id = %gig.id, bid_id = %bid.id, "freelancer hired");

    // Every cached view that embeds gig or bid status is now stale.
    let _ = cache.delete(&keys::gig(gig.id)).await;
    let _ = cache.delete(&keys::gig_bids(gig.id)).await;
    let _ = cache.delete_pattern(keys::gig_list_pattern()).await;

    Ok(HttpResponse::Ok().json(serde_json::json!({
        "success": true,
        "message": "Freelancer hired successfully",
    })))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn gig_owned_by(owner_id: Uuid, status: GigStatus) -> gigs::Model {
        gigs::Model {
            id: Uuid::new_v4(),
            title: "Build a landing page".to_string(),
            description: "Single page, responsive".to_string(),
            budget: 500.0,
            owner_id,
            status,
            created_at: chrono::Utc::now(),
        }
    }

    #[test]
    fn owner_of_open_gig_passes_preconditions() {
        let owner = Uuid::new_v4();
        let gig = gig_owned_by(owner, GigStatus::Open);

        assert!(check_hire_preconditions(owner, &gig).is_ok());
    }

    #[test]
    fn non_owner_is_forbidden() {
        let gig = gig_owned_by(Uuid::new_v4(), GigStatus::Open);
        let stranger = Uuid::new_v4();

        let err = check_hire_preconditions(stranger, &gig).unwrap_err();
        assert!(matches!(err, HireError::NotGigOwner));
        assert_eq!(err.status_code(), StatusCode::FORBIDDEN);
    }

    #[test]
    fn assigned_gig_is_a_conflict_even_for_the_owner() {
        let owner = Uuid::new_v4();
        let gig = gig_owned_by(owner, GigStatus::Assigned);

        let err = check_hire_preconditions(owner, &gig).unwrap_err();
        assert!(matches!(err, HireError::AlreadyAssigned));
        assert_eq!(err.status_code(), StatusCode::CONFLICT);
    }

    #[test]
    fn ownership_is_checked_before_gig_state() {
        // A non-owner probing an assigned gig sees 403, not 409.
        let gig = gig_owned_by(Uuid::new_v4(), GigStatus::Assigned);

        let err = check_hire_preconditions(Uuid::new_v4(), &gig).unwrap_err();
        assert!(matches!(err, HireError::NotGigOwner));
    }

    #[test]
    fn error_statuses_match_the_api_contract() {
        assert_eq!(HireError::BidNotFound.status_code(), StatusCode::NOT_FOUND);
        assert_eq!(HireError::NotGigOwner.status_code(), StatusCode::FORBIDDEN);
        assert_eq!(HireError::AlreadyAssigned.status_code(), StatusCode::CONFLICT);
        assert_eq!(
            HireError::Database(DbErr::Custom("boom".to_string())).status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn database_errors_do_not_leak_details() {
        let err = HireError::Database(DbErr::Custom("connection refused".to_string()));
        assert_eq!(err.to_string(), "Internal server error");
    }
}
