use actix_web::{get, post, web, HttpResponse};

use crate::{
    app_state::AppState,
    auth::AuthenticatedUser,
    errors::AppError,
    models::dto::request::SubmitQuizRequest,
};

#[get("")]
pub async fn list_quizzes(state: web::Data<AppState>) -> Result<HttpResponse, AppError> {
    let summaries = state.quiz_service.list_summaries().await?;
    Ok(HttpResponse::Ok().json(summaries))
}

/// Serves the quiz for taking: question text, type, and options only. The
/// correct answers stay server-side.
#[get("/{id}")]
pub async fn get_quiz(
    state: web::Data<AppState>,
    id: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    let quiz = state.quiz_service.get_for_taking(&id).await?;
    Ok(HttpResponse::Ok().json(quiz))
}

#[post("/submit")]
pub async fn submit_quiz(
    state: web::Data<AppState>,
    quiz_id: web::Path<String>,
    auth: AuthenticatedUser,
    request: web::Json<SubmitQuizRequest>,
) -> Result<HttpResponse, AppError> {
    let response = state
        .score_service
        .submit(&quiz_id, &auth.0.sub, &request.answers)
        .await?;
    Ok(HttpResponse::Ok().json(response))
}
