//! HTTP handlers and route configuration.

mod auth;
mod editor;
mod health;
mod posts;

use actix_web::web;

use crate::middleware::error::AppError;

/// Configure all application routes.
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.app_data(
        web::PathConfig::default()
            .error_handler(|err, _req| AppError::BadRequest(err.to_string()).into()),
    );

    cfg.service(
        web::scope("/api")
            // Public routes
            .route("/health", web::get().to(health::health_check))
            .service(
                web::scope("/posts")
                    .route("", web::get().to(posts::list_posts))
                    .route("/{id}", web::get().to(posts::get_post))
                    .route("/{id}/like", web::post().to(posts::like_post)),
            )
            // Auth routes
            .service(
                web::scope("/auth")
                    .route("/login", web::post().to(auth::login))
                    .route("/logout", web::post().to(auth::logout)),
            )
            // Admin routes - every handler requires an AdminIdentity
            .service(
                web::scope("/admin")
                    .route("/posts", web::post().to(posts::create_post))
                    .route("/posts/{id}", web::put().to(posts::update_post))
                    .route("/posts/{id}", web::delete().to(posts::delete_post))
                    .service(
                        web::scope("/editor")
                            .route("", web::get().to(editor::show))
                            .route("/new", web::post().to(editor::start_create))
                            .route("/edit/{id}", web::post().to(editor::start_edit))
                            .route("/draft", web::patch().to(editor::update_draft))
                            .route("/format", web::post().to(editor::format))
                            .route("/save", web::post().to(editor::save))
                            .route("/cancel", web::post().to(editor::cancel)),
                    ),
            ),
    );
}
