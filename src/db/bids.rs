use sea_orm::prelude::Expr;
use sea_orm::*;
use uuid::Uuid;

use crate::models::bids::{self, BidStatus, CreateBid};
use crate::models::gigs::{self, GigStatus};

/// Outcome of the transactional hire in [`hire_bid`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HireOutcome {
    /// The bid was hired, its siblings rejected, and the gig assigned.
    Hired,
    /// Another hire committed first; nothing was changed.
    GigAlreadyAssigned,
    /// The bid or its gig disappeared between the handler's read and the
    /// transaction; nothing was changed.
    BidGone,
}

/// Insert a new bid from `freelancer_id` on `gig_id`. New bids start pending.
pub async fn insert_bid(
    db: &DatabaseConnection,
    input: CreateBid,
    gig_id: Uuid,
    freelancer_id: Uuid,
) -> Result<bids::Model, DbErr> {
    let new_bid = bids::ActiveModel {
        id: Set(Uuid::new_v4()),
        gig_id: Set(gig_id),
        freelancer_id: Set(freelancer_id),
        message: Set(input.message),
        price: Set(input.price),
        status: Set(BidStatus::Pending),
        created_at: Set(chrono::Utc::now()),
    };

    new_bid.insert(db).await
}

/// Fetch all bids on a gig, newest first.
pub async fn get_bids_by_gig(
    db: &DatabaseConnection,
    gig_id: Uuid,
) -> Result<Vec<bids::Model>, DbErr> {
    bids::Entity::find()
        .filter(bids::Column::GigId.eq(gig_id))
        .order_by_desc(bids::Column::CreatedAt)
        .all(db)
        .await
}

/// Fetch all bids submitted by a freelancer, newest first.
pub async fn get_bids_by_freelancer(
    db: &DatabaseConnection,
    freelancer_id: Uuid,
) -> Result<Vec<bids::Model>, DbErr> {
    bids::Entity::find()
        .filter(bids::Column::FreelancerId.eq(freelancer_id))
        .order_by_desc(bids::Column::CreatedAt)
        .all(db)
        .await
}

/// Fetch a bid together with its parent gig in one read.
pub async fn get_bid_with_gig(
    db: &DatabaseConnection,
    bid_id: Uuid,
) -> Result<Option<(bids::Model, gigs::Model)>, DbErr> {
    let row = bids::Entity::find_by_id(bid_id)
        .find_also_related(gigs::Entity)
        .one(db)
        .await?;

    // The FK makes the gig side non-null; flatten the Option away.
    Ok(row.and_then(|(bid, gig)| gig.map(|gig| (bid, gig))))
}

/// Check whether a freelancer already has a pending bid on a gig.
pub async fn pending_bid_exists(
    db: &DatabaseConnection,
    gig_id: Uuid,
    freelancer_id: Uuid,
) -> Result<bool, DbErr> {
    let count = bids::Entity::find()
        .filter(bids::Column::GigId.eq(gig_id))
        .filter(bids::Column::FreelancerId.eq(freelancer_id))
        .filter(bids::Column::Status.eq(BidStatus::Pending))
        .count(db)
        .await?;

    Ok(count > 0)
}

/// Hire `bid_id` on `gig_id` as one transaction:
/// the target bid becomes hired, every sibling bid becomes rejected (a
/// single set-oriented update, not a per-row loop), and the gig becomes
/// assigned. The gig row is re-read under `FOR UPDATE` and its status
/// re-checked inside the transaction, so concurrent hire attempts on the
/// same gig serialize and at most one commits.
pub async fn hire_bid(
    db: &DatabaseConnection,
    bid_id: Uuid,
    gig_id: Uuid,
) -> Result<HireOutcome, DbErr> {
    let txn = db.begin().await?;

    let gig = match gigs::Entity::find_by_id(gig_id)
        .lock_exclusive()
        .one(&txn)
        .await?
    {
        Some(gig) => gig,
        None => {
            txn.rollback().await?;
            return Ok(HireOutcome::BidGone);
        }
    };

    if gig.status == GigStatus::Assigned {
        txn.rollback().await?;
        return Ok(HireOutcome::GigAlreadyAssigned);
    }

    let hired = bids::Entity::update_many()
        .col_expr(bids::Column::Status, Expr::value(BidStatus::Hired))
        .filter(bids::Column::Id.eq(bid_id))
        .exec(&txn)
        .await?;

    if hired.rows_affected == 0 {
        txn.rollback().await?;
        return Ok(HireOutcome::BidGone);
    }

    bids::Entity::update_many()
        .col_expr(bids::Column::Status, Expr::value(BidStatus::Rejected))
        .filter(bids::Column::GigId.eq(gig_id))
        .filter(bids::Column::Id.ne(bid_id))
        .exec(&txn)
        .await?;

    let mut active: gigs::ActiveModel = gig.into();
    active.status = Set(GigStatus::Assigned);
    active.update(&txn).await?;

    txn.commit().await?;
    Ok(HireOutcome::Hired)
}
