pub mod auth;
pub mod bids;
pub mod gigs;
pub mod hire;

use actix_web::web;

pub fn init_routes(cfg: &mut web::ServiceConfig) {
    // ── Auth routes (protected by JWT via the AuthenticatedUser extractor) ──
    cfg.service(web::scope("/auth").route("/me", web::get().to(auth::me)));

    // ── Gig routes (all protected — require valid JWT) ──
    // "/mine" is registered before "/{id}" so the literal segment wins.
    cfg.service(
        web::scope("/gigs")
            .route("", web::get().to(gigs::get_gigs))
            .route("", web::post().to(gigs::create_gig))
            .route("/mine", web::get().to(gigs::get_my_gigs))
            .route("/{id}", web::get().to(gigs::get_gig))
            .route("/{id}/bids", web::get().to(bids::get_bids_for_gig))
            .route("/{id}/bids", web::post().to(bids::create_bid)),
    );

    // ── Bid routes (all protected — require valid JWT) ──
    cfg.service(web::scope("/bids").route("/mine", web::get().to(bids::get_my_bids)));

    // ── The hire transition ──
    cfg.service(web::resource("/hire").route(web::post().to(hire::hire_freelancer)));
}
