pub mod bids;
pub mod gigs;

use actix_web::web;

pub fn init_routes(cfg: &mut web::ServiceConfig) {
    // ── Gig routes (listing and single fetch are public) ──
    cfg.service(
        web::scope("/gigs")
            .route("", web::get().to(gigs::get_gigs))
            .route("", web::post().to(gigs::create_gig))
            .route("/{id}", web::get().to(gigs::get_gig)),
    );

    // ── Bid routes (all protected — require valid JWT) ──
    cfg.service(
        web::scope("/bids")
            .route("", web::post().to(bids::create_bid))
            .route("/{gig_id}", web::get().to(bids::get_bids_for_gig))
            .route("/{bid_id}/hire", web::patch().to(bids::hire_bid)),
    );
}
