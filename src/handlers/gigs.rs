use actix_web::{HttpResponse, web};
use uuid::Uuid;

use crate::auth::middleware::AuthenticatedUser;
use crate::error::AppError;
use crate::models::gigs::{CreateGig, GigListQuery};
use crate::services::gigs as gig_service;
use crate::store::SeaOrmStore;

/// GET /api/gigs — list open gigs, optional `?search=` title filter (public).
pub async fn get_gigs(
    store: web::Data<SeaOrmStore>,
    query: web::Query<GigListQuery>,
) -> Result<HttpResponse, AppError> {
    let gigs = gig_service::list_open_gigs(store.get_ref(), query.search.as_deref()).await?;
    Ok(HttpResponse::Ok().json(gigs))
}

/// GET /api/gigs/{id} — get a single gig (public).
pub async fn get_gig(
    store: web::Data<SeaOrmStore>,
    path: web::Path<Uuid>,
) -> Result<HttpResponse, AppError> {
    let gig = gig_service::get_gig(store.get_ref(), path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(gig))
}

/// POST /api/gigs — create a new gig (requires authentication).
pub async fn create_gig(
    user: AuthenticatedUser,
    store: web::Data<SeaOrmStore>,
    body: web::Json<CreateGig>,
) -> Result<HttpResponse, AppError> {
    let gig = gig_service::create_gig(store.get_ref(), user.0, body.into_inner()).await?;
    Ok(HttpResponse::Created().json(gig))
}
