use actix_web::{HttpResponse, Responder, web};
use sea_orm::DatabaseConnection;
use std::sync::Arc;
use uuid::Uuid;

use crate::auth::middleware::AuthenticatedUser;
use crate::cache::{CacheConfig, RedisCache, keys};
use crate::db::gigs as gig_db;
use crate::models::PaginationQuery;
use crate::models::gigs::CreateGig;

/// GET /api/gigs — list open gigs, newest first (requires authentication).
/// Query params: ?page=1&limit=20
pub async fn get_gigs(
    _user: AuthenticatedUser,
    db: web::Data<DatabaseConnection>,
    cache: web::Data<Arc<RedisCache>>,
    cache_config: web::Data<CacheConfig>,
    query: web::Query<PaginationQuery>,
) -> impl Responder {
    let page = query.page();
    let limit = query.limit();
    let cache_key = keys::gig_list(page, limit);

    // Try the cache first
    if let Ok(Some(cached)) = cache.get::<serde_json::Value>(&cache_key).await {
        return HttpResponse::Ok().json(cached);
    }

    match gig_db::get_open_gigs_paginated(db.get_ref(), page, limit).await {
        Ok(gigs) => {
            let _ = cache
                .set(&cache_key, &gigs, Some(cache_config.gig_list_ttl.as_secs()))
                .await;
            HttpResponse::Ok().json(gigs)
        }
        Err(e) => HttpResponse::InternalServerError().json(serde_json::json!({
            "error": format!("Failed to fetch gigs: {e}"),
        })),
    }
}

/// GET /api/gigs/{id} — get a single gig (requires authentication).
pub async fn get_gig(
    _user: AuthenticatedUser,
    db: web::Data<DatabaseConnection>,
    cache: web::Data<Arc<RedisCache>>,
    cache_config: web::Data<CacheConfig>,
    path: web::Path<Uuid>,
) -> impl Responder {
    let id = path.into_inner();
    let cache_key = keys::gig(id);

    if let Ok(Some(cached)) = cache.get::<serde_json::Value>(&cache_key).await {
        return HttpResponse::Ok().json(cached);
    }

    match gig_db::get_gig_by_id(db.get_ref(), id).await {
        Ok(Some(gig)) => {
            let _ = cache
                .set(&cache_key, &gig, Some(cache_config.gig_ttl.as_secs()))
                .await;
            HttpResponse::Ok().json(gig)
        }
        Ok(None) => HttpResponse::NotFound().json(serde_json::json!({
            "error": format!("Gig {id} not found"),
        })),
        Err(e) => HttpResponse::InternalServerError().json(serde_json::json!({
            "error": format!("Database error: {e}"),
        })),
    }
}

/// POST /api/gigs — post a new gig owned by the caller (requires authentication).
pub async fn create_gig(
    user: AuthenticatedUser,
    db: web::Data<DatabaseConnection>,
    cache: web::Data<Arc<RedisCache>>,
    body: web::Json<CreateGig>,
) -> impl Responder {
    let input = body.into_inner();

    if input.title.trim().is_empty() {
        return HttpResponse::BadRequest().json(serde_json::json!({
            "error": "Title is required",
        }));
    }
    if !(input.budget > 0.0) {
        return HttpResponse::BadRequest().json(serde_json::json!({
            "error": "Budget must be a positive number",
        }));
    }

    match gig_db::insert_gig(db.get_ref(), input, user.0.id).await {
        Ok(gig) => {
            // New gigs appear in the open-gigs listing
            let _ = cache.delete_pattern(keys::gig_list_pattern()).await;
            HttpResponse::Created().json(gig)
        }
        Err(e) => HttpResponse::InternalServerError().json(serde_json::json!({
            "error": format!("Failed to create gig: {e}"),
        })),
    }
}

/// GET /api/gigs/mine — list the caller's own gigs, any status.
pub async fn get_my_gigs(
    user: AuthenticatedUser,
    db: web::Data<DatabaseConnection>,
) -> impl Responder {
    match gig_db::get_gigs_by_owner(db.get_ref(), user.0.id).await {
        Ok(gigs) => HttpResponse::Ok().json(gigs),
        Err(e) => HttpResponse::InternalServerError().json(serde_json::json!({
            "error": format!("Failed to fetch gigs: {e}"),
        })),
    }
}
