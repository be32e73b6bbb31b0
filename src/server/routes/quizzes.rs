use axum::{extract::State, routing::post, Json, Router};
use serde::{Deserialize, Serialize};
use serde_aux::field_attributes::deserialize_number_from_string;
use sqlx::SqlitePool;

use crate::{
    db::{queries::questions, Question},
    quiz::{next_question, QuizScope},
    server::{app::AppState, extract::ApiJson},
    telemetry::QUIZ_QUESTIONS_SERVED,
};

use super::ApiResponse;

#[derive(Deserialize, Default)]
struct QuizCategory {
    #[serde(default)]
    #[serde(deserialize_with = "deserialize_number_from_string")]
    id: i64,
    #[serde(rename = "type")]
    #[serde(default)]
    kind: Option<String>,
}

#[derive(Deserialize)]
struct QuizRequest {
    #[serde(default)]
    previous_questions: Vec<i64>,
    #[serde(default)]
    quiz_category: QuizCategory,
}

#[derive(Serialize)]
struct QuizResponse {
    question: Option<Question>,
    success: bool,
}

async fn next_quiz_question(
    State(pool): State<SqlitePool>,
    ApiJson(request): ApiJson<QuizRequest>,
) -> ApiResponse<QuizResponse> {
    let scope = QuizScope::from_category_id(request.quiz_category.id);
    tracing::debug!(
        scope = %scope.label(),
        category = ?request.quiz_category.kind,
        asked = request.previous_questions.len(),
        "picking quiz question"
    );

    let candidates = questions::get_questions_in_random_order(&pool, scope.category_id()).await?;
    let question = next_question(candidates, &request.previous_questions);
    if question.is_some() {
        QUIZ_QUESTIONS_SERVED
            .with_label_values(&[scope.label().as_str()])
            .inc();
    }

    Ok(Json(QuizResponse {
        question,
        success: true,
    }))
}

pub fn quizzes_router(state: AppState) -> Router {
    Router::new()
        .route("/quizzes", post(next_quiz_question))
        .with_state(state)
}
