use std::collections::BTreeMap;

use axum::{
    extract::{Query, State},
    routing::{delete, get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use serde_aux::field_attributes::deserialize_number_from_string;
use sqlx::SqlitePool;

use crate::{
    db::{
        queries::{categories, questions},
        NewQuestion, Question,
    },
    server::{
        app::AppState,
        error::ApiError,
        extract::{ApiJson, ApiPath},
        pagination::{paginate, PageQuery},
    },
    telemetry::QUESTION_CHANGES,
};

use super::{categories::category_map, ApiResponse};

// the front end posts select values as strings, so numbers may arrive either way
#[derive(Deserialize)]
struct QuestionBody {
    question: String,
    answer: String,
    #[serde(deserialize_with = "deserialize_number_from_string")]
    difficulty: i64,
    #[serde(deserialize_with = "deserialize_number_from_string")]
    category: i64,
}

impl TryFrom<QuestionBody> for NewQuestion {
    type Error = ApiError;

    fn try_from(body: QuestionBody) -> Result<Self, Self::Error> {
        let question = body.question.trim();
        let answer = body.answer.trim();
        if question.is_empty() || answer.is_empty() || !(1..=5).contains(&body.difficulty) {
            return Err(ApiError::Unprocessable);
        }
        Ok(NewQuestion {
            question: question.to_owned(),
            answer: answer.to_owned(),
            category: body.category,
            difficulty: body.difficulty,
        })
    }
}

#[derive(Deserialize)]
struct SearchBody {
    #[serde(rename = "searchTerm")]
    search_term: String,
}

#[derive(Serialize)]
struct QuestionsPage {
    questions: Vec<Question>,
    total_questions: usize,
    categories: BTreeMap<i64, String>,
    current_category: Option<String>,
    success: bool,
}

#[derive(Serialize)]
struct SearchResults {
    questions: Vec<Question>,
    total_questions: usize,
    current_category: Option<String>,
    success: bool,
}

#[derive(Serialize)]
struct Created {
    success: bool,
    created: i64,
}

#[derive(Serialize)]
struct Deleted {
    success: bool,
    deleted: i64,
}

async fn list_questions(
    State(pool): State<SqlitePool>,
    Query(page): Query<PageQuery>,
) -> ApiResponse<QuestionsPage> {
    let questions = questions::get_all_questions(&pool).await?;
    let categories = categories::get_all_categories(&pool).await?;
    let total_questions = questions.len();

    let current = paginate(questions, page.page());
    if current.is_empty() {
        return Err(ApiError::NotFound);
    }

    Ok(Json(QuestionsPage {
        questions: current,
        total_questions,
        current_category: categories.first().map(|c| c.kind.clone()),
        categories: category_map(categories),
        success: true,
    }))
}

async fn create_question(
    State(pool): State<SqlitePool>,
    ApiJson(body): ApiJson<QuestionBody>,
) -> ApiResponse<Created> {
    let new_question = NewQuestion::try_from(body)?;
    let id = questions::create_question(&pool, &new_question)
        .await
        .map_err(|err| {
            tracing::warn!(error = %err, "failed to create question");
            ApiError::Unprocessable
        })?;
    QUESTION_CHANGES.with_label_values(&["created"]).inc();
    tracing::info!(id, "question created");

    Ok(Json(Created {
        success: true,
        created: id,
    }))
}

async fn search_questions(
    State(pool): State<SqlitePool>,
    Query(page): Query<PageQuery>,
    ApiJson(body): ApiJson<SearchBody>,
) -> ApiResponse<SearchResults> {
    let questions = questions::search_questions(&pool, &body.search_term).await?;
    let current_category = categories::get_default_category(&pool).await?;
    let total_questions = questions.len();

    Ok(Json(SearchResults {
        questions: paginate(questions, page.page()),
        total_questions,
        current_category: current_category.map(|c| c.kind),
        success: true,
    }))
}

async fn delete_question(
    State(pool): State<SqlitePool>,
    ApiPath(id): ApiPath<i64>,
) -> ApiResponse<Deleted> {
    questions::get_question_by_id(&pool, id)
        .await?
        .ok_or(ApiError::NotFound)?;
    // a concurrent delete may have won the race since the lookup
    if questions::delete_question(&pool, id).await? == 0 {
        return Err(ApiError::NotFound);
    }
    QUESTION_CHANGES.with_label_values(&["deleted"]).inc();
    tracing::info!(id, "question deleted");

    Ok(Json(Deleted {
        success: true,
        deleted: id,
    }))
}

pub fn questions_router(state: AppState) -> Router {
    Router::new()
        .route("/questions", get(list_questions).post(create_question))
        .route("/questions/search", post(search_questions))
        .route("/questions/{id}", delete(delete_question))
        .with_state(state)
}
