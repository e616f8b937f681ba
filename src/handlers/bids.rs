use actix_web::{HttpResponse, web};
use uuid::Uuid;

use crate::auth::middleware::AuthenticatedUser;
use crate::error::AppError;
use crate::models::bids::CreateBid;
use crate::services::{bids as bid_service, hiring};
use crate::store::SeaOrmStore;

/// POST /api/bids — submit a bid on a gig (requires authentication).
/// The freelancer id comes from the JWT, never the body.
pub async fn create_bid(
    user: AuthenticatedUser,
    store: web::Data<SeaOrmStore>,
    body: web::Json<CreateBid>,
) -> Result<HttpResponse, AppError> {
    let bid = bid_service::submit_bid(store.get_ref(), user.0, body.into_inner()).await?;
    Ok(HttpResponse::Created().json(bid))
}

/// GET /api/bids/{gig_id} — list bids for a gig (gig owner only).
pub async fn get_bids_for_gig(
    user: AuthenticatedUser,
    store: web::Data<SeaOrmStore>,
    path: web::Path<Uuid>,
) -> Result<HttpResponse, AppError> {
    let bids = bid_service::list_bids_for_gig(store.get_ref(), path.into_inner(), user.0).await?;
    Ok(HttpResponse::Ok().json(bids))
}

/// PATCH /api/bids/{bid_id}/hire — hire the freelancer behind a bid
/// (gig owner only; at most one hire per gig ever succeeds).
pub async fn hire_bid(
    user: AuthenticatedUser,
    store: web::Data<SeaOrmStore>,
    path: web::Path<Uuid>,
) -> Result<HttpResponse, AppError> {
    let outcome = hiring::hire(store.get_ref(), path.into_inner(), user.0).await?;
    Ok(HttpResponse::Ok().json(outcome))
}
