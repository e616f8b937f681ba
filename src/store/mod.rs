pub mod memory;
pub mod postgres;

use async_trait::async_trait;
use sea_orm::DbErr;
use thiserror::Error;
use uuid::Uuid;

use crate::models::{bids, gigs};

pub use memory::MemoryStore;
pub use postgres::{SeaOrmStore, create_pool};

/// Storage-layer failures, kept separate from the service-level taxonomy so
/// callers can distinguish a lost race from a broken backend.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The compare-and-set on the gig's status found it no longer open.
    #[error("gig is already assigned")]
    AlreadyAssigned,

    /// A record read earlier in the request was gone inside the transaction.
    #[error("{0} vanished mid-transaction")]
    RecordVanished(&'static str),

    /// Retryable contention (deadlock or serialization failure).
    #[error("transient storage contention: {0}")]
    Transient(String),

    #[error(transparent)]
    Db(#[from] DbErr),
}

/// Persistence abstraction over gigs and bids.
///
/// Plain reads and inserts plus one compound primitive,
/// [`assign_gig_to_bid`](MarketStore::assign_gig_to_bid), which must be
/// atomic with respect to every other concurrent call on the same gig: the
/// status check and all downstream writes commit as one unit or not at all.
/// Exclusivity must be enforced at the shared-storage layer, not in-process,
/// because independent service instances share one database.
#[async_trait]
pub trait MarketStore: Send + Sync {
    async fn insert_gig(&self, gig: gigs::Model) -> Result<gigs::Model, StoreError>;

    async fn gig_by_id(&self, id: Uuid) -> Result<Option<gigs::Model>, StoreError>;

    /// Open gigs only, optionally filtered by a case-insensitive title
    /// substring, newest first.
    async fn list_open_gigs(
        &self,
        title_filter: Option<&str>,
    ) -> Result<Vec<gigs::Model>, StoreError>;

    async fn insert_bid(&self, bid: bids::Model) -> Result<bids::Model, StoreError>;

    async fn bid_by_id(&self, id: Uuid) -> Result<Option<bids::Model>, StoreError>;

    async fn bids_for_gig(&self, gig_id: Uuid) -> Result<Vec<bids::Model>, StoreError>;

    /// The hire transition, in one atomic unit:
    /// 1. compare-and-set the gig's status open→assigned — the race guard;
    ///    if the gig is no longer open, nothing is written and
    ///    [`StoreError::AlreadyAssigned`] is returned;
    /// 2. mark the winning bid hired;
    /// 3. mark every other still-pending bid on the gig rejected.
    ///
    /// Returns the updated gig and winning bid. Any failure after the gate
    /// rolls the whole unit back; no partial transition is ever observable.
    async fn assign_gig_to_bid(
        &self,
        gig_id: Uuid,
        bid_id: Uuid,
    ) -> Result<(gigs::Model, bids::Model), StoreError>;
}
