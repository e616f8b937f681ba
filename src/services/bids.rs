use chrono::Utc;
use uuid::Uuid;

use crate::error::AppError;
use crate::models::bids::{self, BidStatus, CreateBid};
use crate::models::gigs::GigStatus;
use crate::store::MarketStore;

/// Submit a bid on an open gig.
///
/// Preconditions, each a distinct failure: the gig exists, is still open,
/// the bidder is not its owner, the message is non-empty and the amount
/// positive. On success a pending bid is inserted and nothing else changes.
///
/// The check-then-insert here is deliberately not joined with the hire
/// transaction: a bid admitted in the instant before a concurrent hire
/// commits simply stays pending forever, because the hire gate re-checks the
/// gig's status atomically. Such a bid can never be hired.
pub async fn submit_bid<S: MarketStore + ?Sized>(
    store: &S,
    bidder_id: Uuid,
    input: CreateBid,
) -> Result<bids::Model, AppError> {
    let gig = store
        .gig_by_id(input.gig_id)
        .await?
        .ok_or_else(|| AppError::not_found("gig", input.gig_id))?;

    if gig.status != GigStatus::Open {
        return Err(AppError::InvalidState(
            "gig is not open for bidding".to_string(),
        ));
    }
    if bidder_id == gig.owner_id {
        return Err(AppError::forbidden("owner cannot bid on own gig"));
    }
    if input.message.trim().is_empty() {
        return Err(AppError::Validation {
            field: "message",
            reason: "must not be empty",
        });
    }
    if !input.amount.is_finite() || input.amount <= 0.0 {
        return Err(AppError::Validation {
            field: "amount",
            reason: "must be a positive number",
        });
    }

    let bid = bids::Model {
        id: Uuid::new_v4(),
        gig_id: gig.id,
        freelancer_id: bidder_id,
        message: input.message,
        amount: input.amount,
        status: BidStatus::Pending,
        created_at: Utc::now(),
    };
    let bid = store.insert_bid(bid).await?;
    tracing::info!(bid_id = %bid.id, gig_id = %bid.gig_id, "bid submitted");
    Ok(bid)
}

/// List every bid on a gig, oldest first. Owner-only: the gig's bids are
/// visible to nobody but the identity that posted the gig.
pub async fn list_bids_for_gig<S: MarketStore + ?Sized>(
    store: &S,
    gig_id: Uuid,
    caller_id: Uuid,
) -> Result<Vec<bids::Model>, AppError> {
    let gig = store
        .gig_by_id(gig_id)
        .await?
        .ok_or_else(|| AppError::not_found("gig", gig_id))?;

    if gig.owner_id != caller_id {
        return Err(AppError::forbidden(
            "not authorized to view bids for this gig",
        ));
    }

    Ok(store.bids_for_gig(gig_id).await?)
}
