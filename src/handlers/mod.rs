use actix_web::{get, web, HttpResponse};

use crate::auth::AuthMiddleware;

pub mod admin_handler;
pub mod auth_handler;
pub mod quiz_handler;

/// Route table, shared by `main` and the HTTP-level tests.
///
/// The submit route and the whole admin scope sit behind `AuthMiddleware`;
/// role checks happen inside the admin handlers.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(health_check)
        .service(
            web::scope("/api/auth")
                .service(auth_handler::register)
                .service(auth_handler::login),
        )
        .service(
            web::scope("/api/quiz")
                .service(quiz_handler::list_quizzes)
                .service(quiz_handler::get_quiz)
                .service(
                    web::scope("/{quiz_id}")
                        .wrap(AuthMiddleware)
                        .service(quiz_handler::submit_quiz),
                ),
        )
        .service(
            web::scope("/api/admin")
                .wrap(AuthMiddleware)
                .service(admin_handler::list_quizzes)
                .service(admin_handler::create_quiz)
                .service(admin_handler::delete_quiz)
                .service(admin_handler::leaderboard)
                .service(admin_handler::score_history),
        );
}

#[get("/health")]
async fn health_check() -> HttpResponse {
    HttpResponse::Ok().json(serde_json::json!({
        "status": "healthy",
        "version": env!("CARGO_PKG_VERSION")
    }))
}
