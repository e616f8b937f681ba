use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Bid status stored as a lowercase string in the database.
///
/// `Pending` is the only non-terminal state: a bid moves pending→hired or
/// pending→rejected, once, by the hiring coordinator, and never again.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize, EnumIter, DeriveActiveEnum)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::None)")]
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
    /// Identity reference; never equal to the gig's owner_id.
    pub freelancer_id: Uuid,
    #[sea_orm(column_type = "Text")]
    pub message: String,
    #[sea_orm(column_type = "Double")]
    pub amount: f64,
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
}

impl Related<super::gigs::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Gig.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

// ── DTOs ──

/// Request body for POST /api/bids.
/// `freelancer_id` comes from the JWT, never the body.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateBid {
    pub gig_id: Uuid,
    pub message: String,
    pub amount: f64,
}
