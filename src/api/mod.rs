pub mod analysis;
pub mod error;
pub mod health;
pub mod openapi;

use actix_web::web;

/// Register every dashboard route
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.configure(health::configure)
        .configure(analysis::configure)
        .configure(openapi::configure);
}
