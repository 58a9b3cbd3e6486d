//! HTTP inbound adapter exposing REST endpoints.

pub mod auth;
pub mod categories;
pub mod entries;
pub mod envelope;
pub mod error;
pub mod feed;
pub mod health;
pub mod schemas;
pub mod state;
pub mod status;
pub mod supplies;
#[cfg(test)]
pub mod test_utils;
pub mod users;
pub mod validation;

use actix_web::{Scope, web};

/// Every JSON handler under `/api/v1`.
///
/// Body and path extraction failures are answered with the shared error
/// envelope rather than actix's plain-text defaults.
///
/// # Examples
/// ```no_run
/// use actix_web::App;
/// use feedforward::inbound::http::api_scope;
///
/// let app = App::new().service(api_scope());
/// ```
pub fn api_scope() -> Scope {
    web::scope("/api/v1")
        .app_data(web::JsonConfig::default().error_handler(error::json_error_handler))
        .app_data(web::PathConfig::default().error_handler(error::path_error_handler))
        .service(users::register)
        .service(users::login)
        .service(supplies::create_supply)
        .service(supplies::list_donations)
        .service(supplies::get_donation)
        .service(supplies::update_donation)
        .service(supplies::delete_donation)
        .service(supplies::get_donor)
        .service(categories::category_count)
        .service(feed::leaderboard)
        .service(feed::community_feed)
        .service(feed::publish_post)
        .service(entries::create_volunteer)
        .service(entries::list_volunteers)
        .service(entries::create_testimonial)
}
