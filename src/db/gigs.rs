use sea_orm::*;
use uuid::Uuid;

use crate::models::gigs::{self, CreateGig, GigStatus};

/// Insert a new gig owned by `owner_id`. New gigs always start open.
pub async fn insert_gig(
    db: &DatabaseConnection,
    input: CreateGig,
    owner_id: Uuid,
) -> Result<gigs::Model, DbErr> {
    let new_gig = gigs::ActiveModel {
        id: Set(Uuid::new_v4()),
        title: Set(input.title),
        description: Set(input.description),
        budget: Set(input.budget),
        owner_id: Set(owner_id),
        status: Set(GigStatus::Open),
        created_at: Set(chrono::Utc::now()),
    };

    new_gig.insert(db).await
}

/// Fetch open gigs, newest first, one page at a time.
pub async fn get_open_gigs_paginated(
    db: &DatabaseConnection,
    page: u64,
    limit: u64,
) -> Result<Vec<gigs::Model>, DbErr> {
    gigs::Entity::find()
        .filter(gigs::Column::Status.eq(GigStatus::Open))
        .order_by_desc(gigs::Column::CreatedAt)
        .paginate(db, limit)
        .fetch_page(page.saturating_sub(1))
        .await
}

/// Fetch a single gig by ID.
pub async fn get_gig_by_id(
    db: &DatabaseConnection,
    id: Uuid,
) -> Result<Option<gigs::Model>, DbErr> {
    gigs::Entity::find_by_id(id).one(db).await
}

/// Fetch all gigs owned by a user, any status, newest first.
pub async fn get_gigs_by_owner(
    db: &DatabaseConnection,
    owner_id: Uuid,
) -> Result<Vec<gigs::Model>, DbErr> {
    gigs::Entity::find()
        .filter(gigs::Column::OwnerId.eq(owner_id))
        .order_by_desc(gigs::Column::CreatedAt)
        .all(db)
        .await
}
