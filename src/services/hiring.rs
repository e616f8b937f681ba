use serde::Serialize;
use std::time::Duration;
use uuid::Uuid;

use crate::error::AppError;
use crate::models::gigs::GigStatus;
use crate::models::{bids, gigs};
use crate::store::{MarketStore, StoreError};

/// Attempts against transient storage contention before giving up.
const MAX_HIRE_ATTEMPTS: u32 = 3;
const RETRY_BACKOFF: Duration = Duration::from_millis(25);

/// The committed transition: the assigned gig and the hired bid.
#[derive(Debug, Clone, Serialize)]
pub struct HireOutcome {
    pub gig: gigs::Model,
    pub bid: bids::Model,
}

/// Hire the freelancer behind `bid_id`, finalizing the gig's assignment.
///
/// Authorization and the fast-path status check run first, with zero side
/// effects on failure. The actual transition is delegated to the store's
/// atomic [`assign_gig_to_bid`](MarketStore::assign_gig_to_bid) primitive,
/// whose compare-and-set on the gig's status is the sole authority on
/// exclusivity: among concurrent hires on one gig exactly one commits and
/// every other caller gets `Conflict`, regardless of interleaving. A stale
/// fast-path read can never admit a second winner, only produce an earlier
/// error.
pub async fn hire<S: MarketStore + ?Sized>(
    store: &S,
    bid_id: Uuid,
    caller_id: Uuid,
) -> Result<HireOutcome, AppError> {
    let bid = store
        .bid_by_id(bid_id)
        .await?
        .ok_or_else(|| AppError::not_found("bid", bid_id))?;

    // A bid always references a live gig; a miss here is broken referential
    // integrity, not a caller error.
    let gig = store.gig_by_id(bid.gig_id).await?.ok_or_else(|| {
        AppError::internal(format!("bid {bid_id} references missing gig {}", bid.gig_id))
    })?;

    if gig.owner_id != caller_id {
        return Err(AppError::forbidden("not authorized to hire for this gig"));
    }
    if gig.status != GigStatus::Open {
        return Err(AppError::Conflict("gig is already assigned".to_string()));
    }

    let mut attempt = 1;
    loop {
        match store.assign_gig_to_bid(gig.id, bid.id).await {
            Ok((gig, bid)) => {
                tracing::info!(
                    gig_id = %gig.id,
                    bid_id = %bid.id,
                    freelancer_id = %bid.freelancer_id,
                    "gig assigned"
                );
                return Ok(HireOutcome { gig, bid });
            }
            Err(StoreError::Transient(cause)) if attempt < MAX_HIRE_ATTEMPTS => {
                tracing::warn!(gig_id = %gig.id, attempt, %cause, "hire contention, retrying");
                tokio::time::sleep(RETRY_BACKOFF * attempt).await;
                attempt += 1;
            }
            Err(StoreError::Transient(cause)) => {
                tracing::warn!(gig_id = %gig.id, %cause, "hire retries exhausted");
                return Err(AppError::Unavailable);
            }
            Err(err) => return Err(err.into()),
        }
    }
}
