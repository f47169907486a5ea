//! HTTP inbound adapter exposing REST endpoints.

pub mod envelope;
pub mod error;
pub mod filters;
pub mod payloads;
pub mod ping;
pub mod schemas;
pub mod state;
#[cfg(test)]
pub(crate) mod test_utils;
pub mod users;
pub mod validation;

use actix_web::web;

pub use error::ApiResult;

/// JSON extractor configuration shared by every route.
///
/// Bodies are decoded regardless of `Content-Type`, and any decode failure
/// answers `400 Invalid request payload` in the envelope.
pub fn json_config() -> web::JsonConfig {
    web::JsonConfig::default()
        .content_type_required(false)
        .error_handler(error::json_error_handler)
}

/// Register every route, the JSON configuration and the fallback for
/// unknown routes.
///
/// # Examples
/// ```
/// use actix_web::App;
/// use search_admin::inbound::http::configure;
///
/// let _app = App::new().configure(configure);
/// ```
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.app_data(json_config())
        .service(ping::ping)
        .service(users::create_user)
        .service(users::list_users)
        .service(users::get_user)
        .service(users::update_user)
        .service(users::delete_user)
        .service(filters::create_filter)
        .service(filters::list_filters)
        .service(filters::get_filter)
        .service(filters::delete_filter)
        .default_service(web::to(error::unknown_route));
}
