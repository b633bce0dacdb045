use actix_web::{HttpResponse, Responder, web};
use sea_orm::DatabaseConnection;
use std::sync::Arc;
use uuid::Uuid;

use crate::auth::authorization::verify_gig_owner;
use crate::auth::middleware::AuthenticatedUser;
use crate::cache::{CacheConfig, RedisCache, keys};
use crate::db::bids as bid_db;
use crate::db::gigs as gig_db;
use crate::models::bids::CreateBid;
use crate::models::gigs::GigStatus;

/// POST /api/gigs/{id}/bids — a freelancer submits a bid on a gig.
///
/// The freelancer is the authenticated caller. The gig must exist and
/// still be open, owners cannot bid on their own gig, and one pending bid
/// per freelancer per gig is allowed.
pub async fn create_bid(
    user: AuthenticatedUser,
    db: web::Data<DatabaseConnection>,
    cache: web::Data<Arc<RedisCache>>,
    path: web::Path<Uuid>,
    body: web::Json<CreateBid>,
) -> impl Responder {
    let gig_id = path.into_inner();
    let freelancer_id = user.0.id;
    let input = body.into_inner();

    if !(input.price > 0.0) {
        return HttpResponse::BadRequest().json(serde_json::json!({
            "error": "Price must be a positive number",
        }));
    }

    // 1. Verify the gig exists.
    let gig = match gig_db::get_gig_by_id(db.get_ref(), gig_id).await {
        Ok(Some(gig)) => gig,
        Ok(None) => {
            return HttpResponse::NotFound().json(serde_json::json!({
                "error": format!("Gig {gig_id} not found"),
            }));
        }
        Err(e) => {
            return HttpResponse::InternalServerError().json(serde_json::json!({
                "error": format!("Database error: {e}"),
            }));
        }
    };

    // 2. Prevent owners from bidding on their own gig.
    if gig.owner_id == freelancer_id {
        return HttpResponse::BadRequest().json(serde_json::json!({
            "error": "You cannot bid on your own gig",
        }));
    }

    // 3. An assigned gig is closed to further competition.
    if gig.status == GigStatus::Assigned {
        return HttpResponse::Conflict().json(serde_json::json!({
            "error": "This gig has already been assigned",
        }));
    }

    // 4. Check for a duplicate pending bid.
    match bid_db::pending_bid_exists(db.get_ref(), gig_id, freelancer_id).await {
        Ok(true) => {
            return HttpResponse::Conflict().json(serde_json::json!({
                "error": "You have already submitted a bid on this gig",
            }));
        }
        Err(e) => {
            return HttpResponse::InternalServerError().json(serde_json::json!({
                "error": format!("Database error: {e}"),
            }));
        }
        _ => {}
    }

    // 5. Create the bid.
    match bid_db::insert_bid(db.get_ref(), input, gig_id, freelancer_id).await {
        Ok(bid) => {
            let _ = cache.delete(&keys::gig_bids(gig_id)).await;
            HttpResponse::Created().json(bid)
        }
        Err(e) => HttpResponse::InternalServerError().json(serde_json::json!({
            "error": format!("Failed to create bid: {e}"),
        })),
    }
}

/// GET /api/gigs/{id}/bids — list all bids on a gig.
///
/// Only the gig owner can see the bids on their gig.
pub async fn get_bids_for_gig(
    user: AuthenticatedUser,
    db: web::Data<DatabaseConnection>,
    cache: web::Data<Arc<RedisCache>>,
    cache_config: web::Data<CacheConfig>,
    path: web::Path<Uuid>,
) -> impl Responder {
    let gig_id = path.into_inner();

    if let Err(resp) = verify_gig_owner(db.get_ref(), gig_id, user.0.id).await {
        return resp;
    }

    let cache_key = keys::gig_bids(gig_id);
    if let Ok(Some(cached)) = cache.get::<serde_json::Value>(&cache_key).await {
        return HttpResponse::Ok().json(cached);
    }

    match bid_db::get_bids_by_gig(db.get_ref(), gig_id).await {
        Ok(bids) => {
            let _ = cache
                .set(&cache_key, &bids, Some(cache_config.bids_ttl.as_secs()))
                .await;
            HttpResponse::Ok().json(bids)
        }
        Err(e) => HttpResponse::InternalServerError().json(serde_json::json!({
            "error": format!("Database error: {e}"),
        })),
    }
}

/// GET /api/bids/mine — list the caller's own bids.
pub async fn get_my_bids(
    user: AuthenticatedUser,
    db: web::Data<DatabaseConnection>,
) -> impl Responder {
    match bid_db::get_bids_by_freelancer(db.get_ref(), user.0.id).await {
        Ok(bids) => HttpResponse::Ok().json(bids),
        Err(e) => HttpResponse::InternalServerError().json(serde_json::json!({
            "error": format!("Failed to fetch bids: {e}"),
        })),
    }
}
