use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Gig status stored as a lowercase string in the database.
///
/// A gig only ever moves `Open` → `Assigned`, exactly once, and never back.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize, EnumIter, DeriveActiveEnum)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::None)")]
pub enum GigStatus {
    #[sea_orm(string_value = "open")]
    Open,
    #[sea_orm(string_value = "assigned")]
    Assigned,
}

/// SeaORM entity for the `gigs` table.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "gigs")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub title: String,
    #[sea_orm(column_type = "Text")]
    pub description: String,
    #[sea_orm(column_type = "Double")]
    pub budget: f64,
    /// Identity reference; users live in the external identity provider.
    pub owner_id: Uuid,
    pub status: GigStatus,
    pub created_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::bids::Entity")]
    Bids,
}

impl Related<super::bids::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Bids.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

// ── DTOs ──

#[derive(Debug, Clone, Deserialize)]
pub struct CreateGig {
    pub title: String,
    pub description: String,
    pub budget: f64,
}

/// Query string for GET /api/gigs (`?search=` filters by title substring).
#[derive(Debug, Clone, Deserialize)]
pub struct GigListQuery {
    pub search: Option<String>,
}
