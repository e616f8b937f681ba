use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Mutex;
use uuid::Uuid;

use crate::models::bids::{self, BidStatus};
use crate::models::gigs::{self, GigStatus};
use crate::store::{MarketStore, StoreError};

/// In-memory [`MarketStore`] for tests and local development.
///
/// One mutex guards both tables; the assignment primitive holds it across
/// the whole check-and-write sequence (no awaits inside), so concurrent
/// hires see the same exactly-one-winner behavior as the Postgres
/// transaction.
#[derive(Default)]
pub struct MemoryStore {
    inner: Mutex<Tables>,
}

#[derive(Default)]
struct Tables {
    gigs: HashMap<Uuid, gigs::Model>,
    bids: HashMap<Uuid, bids::Model>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Tables> {
        // A poisoned lock means a panicked test, not recoverable state.
        self.inner.lock().unwrap_or_else(|e| e.into_inner())
    }
}

#[async_trait]
impl MarketStore for MemoryStore {
    async fn insert_gig(&self, gig: gigs::Model) -> Result<gigs::Model, StoreError> {
        self.lock().gigs.insert(gig.id, gig.clone());
        Ok(gig)
    }

    async fn gig_by_id(&self, id: Uuid) -> Result<Option<gigs::Model>, StoreError> {
        Ok(self.lock().gigs.get(&id).cloned())
    }

    async fn list_open_gigs(
        &self,
        title_filter: Option<&str>,
    ) -> Result<Vec<gigs::Model>, StoreError> {
        let needle = title_filter.map(str::to_lowercase);
        let mut open: Vec<_> = self
            .lock()
            .gigs
            .values()
            .filter(|g| g.status == GigStatus::Open)
            .filter(|g| match &needle {
                Some(n) => g.title.to_lowercase().contains(n),
                None => true,
            })
            .cloned()
            .collect();
        open.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(a.id.cmp(&b.id)));
        Ok(open)
    }

    async fn insert_bid(&self, bid: bids::Model) -> Result<bids::Model, StoreError> {
        self.lock().bids.insert(bid.id, bid.clone());
        Ok(bid)
    }

    async fn bid_by_id(&self, id: Uuid) -> Result<Option<bids::Model>, StoreError> {
        Ok(self.lock().bids.get(&id).cloned())
    }

    async fn bids_for_gig(&self, gig_id: Uuid) -> Result<Vec<bids::Model>, StoreError> {
        let mut bids: Vec<_> = self
            .lock()
            .bids
            .values()
            .filter(|b| b.gig_id == gig_id)
            .cloned()
            .collect();
        bids.sort_by(|a, b| a.created_at.cmp(&b.created_at).then(a.id.cmp(&b.id)));
        Ok(bids)
    }

    async fn assign_gig_to_bid(
        &self,
        gig_id: Uuid,
        bid_id: Uuid,
    ) -> Result<(gigs::Model, bids::Model), StoreError> {
        let mut tables = self.lock();

        if !tables.bids.contains_key(&bid_id) {
            return Err(StoreError::RecordVanished("bid"));
        }
        let gig = tables
            .gigs
            .get_mut(&gig_id)
            .ok_or(StoreError::RecordVanished("gig"))?;
        // The race guard: first caller through flips the status, everyone
        // else finds it already assigned.
        if gig.status != GigStatus::Open {
            return Err(StoreError::AlreadyAssigned);
        }
        gig.status = GigStatus::Assigned;
        let gig = gig.clone();

        let winner = tables.bids.get_mut(&bid_id).expect("checked above");
        winner.status = BidStatus::Hired;
        let winner = winner.clone();

        for bid in tables.bids.values_mut() {
            if bid.gig_id == gig_id && bid.id != bid_id && bid.status == BidStatus::Pending {
                bid.status = BidStatus::Rejected;
            }
        }

        Ok((gig, winner))
    }
}
