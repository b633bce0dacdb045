use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Bid lifecycle. Every bid starts `pending`. Hiring moves exactly one bid
/// per gig to `hired` and every sibling to `rejected` in the same
/// transaction, so a bid on an assigned gig is never left `pending`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, EnumIter, DeriveActiveEnum)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::None)")]
#[serde(rename_all = "lowercase")]
pub enum BidStatus {
    #[sea_orm(string_value = "pending")]
    Pending,
    #[sea_orm(string_value = "hired")]
    Hired,
    #[sea_orm(string_value = "rejected")]
    Rejected,
}

/// SeaORM entity for the `bids` table.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "bids")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub gig_id: Uuid,
    pub freelancer_id: Uuid,
    #[sea_orm(column_type = "Text")]
    pub message: String,
    #[sea_orm(column_type = "Double")]
    pub price: f64,
    pub status: BidStatus,
    pub created_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::gigs::Entity",
        from = "Column::GigId",
        to = "super::gigs::Column::Id"
    )]
    Gig,
    #[sea_orm(
        belongs_to = "super::users::Entity",
        from = "Column::FreelancerId",
        to = "super::users::Column::Id"
    )]
    Freelancer,
}

impl Related<super::gigs::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Gig.def()
    }
}

impl Related<super::users::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Freelancer.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

// ── DTOs ──

/// Request body for POST /api/gigs/{id}/bids.
/// The gig comes from the path and the freelancer from the JWT.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateBid {
    pub message: String,
    pub price: f64,
}

/// Request body for POST /api/hire. The field name is the wire format the
/// web client sends, hence the camelCase rename.
#[derive(Debug, Clone, Deserialize)]
pub struct HireRequest {
    #[serde(rename = "bidId")]
    pub bid_id: Uuid,
}
