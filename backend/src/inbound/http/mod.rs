//! HTTP inbound adapter exposing REST endpoints.

pub mod auth;
pub mod corrections;
pub mod docs;
pub mod error;
pub mod health;
pub mod postings;
pub mod root;
pub mod schemas;
pub mod state;

use actix_web::web;

pub use error::ApiResult;

/// Register every API route together with the extractor configuration that
/// turns malformed input into 400 error envelopes.
///
/// Callers provide [`state::HttpState`] and [`health::HealthState`] as app
/// data.
///
/// # Examples
/// ```
/// use actix_web::App;
/// use find_my_bike::inbound::http::configure;
///
/// let _app = App::new().configure(configure);
/// ```
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.app_data(error::json_config())
        .app_data(error::query_config())
        .service(root::root)
        .service(postings::list_postings)
        .service(postings::add_postings)
        .service(corrections::list_corrections)
        .service(corrections::add_correction)
        .service(docs::openapi_json)
        .service(docs::docs)
        .service(docs::logout)
        .service(health::ready)
        .service(health::live);
}
