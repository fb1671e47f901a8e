// Route exports
pub mod issues;

use actix_web::web;

pub use issues::AppState;

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1")
            .configure(issues::configure),
    );
}
