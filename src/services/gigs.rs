use chrono::Utc;
use uuid::Uuid;

use crate::error::AppError;
use crate::models::gigs::{self, CreateGig, GigStatus};
use crate::store::MarketStore;

/// Create a new gig owned by the caller. Gigs start open and stay open
/// until the hiring coordinator assigns them.
pub async fn create_gig<S: MarketStore + ?Sized>(
    store: &S,
    owner_id: Uuid,
    input: CreateGig,
) -> Result<gigs::Model, AppError> {
    if input.title.trim().is_empty() {
        return Err(AppError::Validation {
            field: "title",
            reason: "must not be empty",
        });
    }
    if input.description.trim().is_empty() {
        return Err(AppError::Validation {
            field: "description",
            reason: "must not be empty",
        });
    }
    if !input.budget.is_finite() || input.budget <= 0.0 {
        return Err(AppError::Validation {
            field: "budget",
            reason: "must be a positive number",
        });
    }

    let gig = gigs::Model {
        id: Uuid::new_v4(),
        title: input.title,
        description: input.description,
        budget: input.budget,
        owner_id,
        status: GigStatus::Open,
        created_at: Utc::now(),
    };
    let gig = store.insert_gig(gig).await?;
    tracing::info!(gig_id = %gig.id, owner_id = %gig.owner_id, "gig created");
    Ok(gig)
}

/// List open gigs, optionally filtered by a case-insensitive title
/// substring. Public: no caller identity required.
pub async fn list_open_gigs<S: MarketStore + ?Sized>(
    store: &S,
    search: Option<&str>,
) -> Result<Vec<gigs::Model>, AppError> {
    let search = search.map(str::trim).filter(|s| !s.is_empty());
    Ok(store.list_open_gigs(search).await?)
}

/// Fetch a single gig by id. Public.
pub async fn get_gig<S: MarketStore + ?Sized>(
    store: &S,
    id: Uuid,
) -> Result<gigs::Model, AppError> {
    store
        .gig_by_id(id)
        .await?
        .ok_or_else(|| AppError::not_found("gig", id))
}
