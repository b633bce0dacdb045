use actix_web::HttpResponse;
use sea_orm::DatabaseConnection;
use uuid::Uuid;

use crate::db::gigs as gig_db;
use crate::models::gigs::Model;

/// Verify that `user_id` owns `gig_id` and return the gig.
///
/// Ownership of the gig is the sole authority over its bids: only the
/// owner may list them or hire from them.
pub async fn verify_gig_owner(
    db: &DatabaseConnection,
    gig_id: Uuid,
    user_id: Uuid,
) -> Result<Model, HttpResponse> {
    match gig_db::get_gig_by_id(db, gig_id).await {
        Ok(Some(gig)) if gig.owner_id == user_id => Ok(gig),
        Ok(Some(_)) => Err(HttpResponse::Forbidden().json(serde_json::json!({
            "error": "You do not own this gig",
        }))),
        Ok(None) => Err(HttpResponse::NotFound().json(serde_json::json!({
            "error": format!("Gig {gig_id} not found"),
        }))),
        Err(e) => Err(HttpResponse::InternalServerError().json(serde_json::json!({
            "error": format!("Database error: {e}"),
        }))),
    }
}
