use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
};
use serde::Serialize;
use serde_json::{Map, Value};
use tracing::error;

use campus_api::{ApiError, CampusApi};
use campus_db::SessionStore;
use campus_types::api::{
    AccountOutcome, ApplicationRequest, CommitteeSignup, FacultySignup, FeedbackRequest,
    LoginRequest, SendMessageRequest, SickLeaveRequest, StudentSignup,
};
use campus_types::models::User;

pub type AppState = Arc<AppStateInner>;

pub struct AppStateInner {
    pub api: CampusApi,
    pub sessions: SessionStore,
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/auth/login", post(login))
        .route("/auth/signup/student", post(signup_student))
        .route("/auth/signup/faculty", post(signup_faculty))
        .route("/auth/signup/committee", post(signup_committee))
        .route("/session", get(get_session).put(put_session).delete(clear_session))
        .route("/profiles/{user_id}", get(get_profile).put(update_profile))
        .route("/profiles/{user_id}/achievements", get(student_achievements))
        .route("/tasks/dashboard", get(dashboard_tasks))
        .route("/tasks/explorer/{student_id}", get(explorer_tasks))
        .route("/applications", post(submit_application))
        .route("/committees", get(committees))
        .route("/events", get(events))
        .route("/achievements", get(college_achievements))
        .route("/feedback/targets", get(feedback_targets))
        .route("/feedback", post(submit_feedback))
        .route("/chat/{user_id}", get(chat_data))
        .route("/channels/{channel_id}/messages", get(channel_messages))
        .route("/messages", post(send_message))
        .route("/sick-leaves", post(submit_sick_leave))
        .route("/sick-leaves/{student_id}", get(student_sick_leaves))
        .with_state(state)
}

fn internal(e: ApiError) -> StatusCode {
    error!("Request failed: {}", e);
    StatusCode::INTERNAL_SERVER_ERROR
}

/// Refusals are still 200: the body carries `success: false` and the message.
fn created<B: Serialize>(success: bool, body: B) -> impl IntoResponse {
    let status = if success {
        StatusCode::CREATED
    } else {
        StatusCode::OK
    };
    (status, Json(body))
}

/// Session reads and writes hit the medium directly, off the async runtime.
async fn session_task<F, T>(sessions: &SessionStore, f: F) -> Result<T, StatusCode>
where
    F: FnOnce(&SessionStore) -> anyhow::Result<T> + Send + 'static,
    T: Send + 'static,
{
    let sessions = sessions.clone();
    tokio::task::spawn_blocking(move || f(&sessions))
        .await
        .map_err(|e| {
            error!("spawn_blocking join error: {}", e);
            StatusCode::INTERNAL_SERVER_ERROR
        })?
        .map_err(|e| internal(e.into()))
}

// -- Auth & session --

async fn login(
    State(state): State<AppState>,
    Json(req): Json<LoginRequest>,
) -> Result<impl IntoResponse, StatusCode> {
    let outcome = state
        .api
        .login(&req.email, &req.password)
        .await
        .map_err(internal)?;
    Ok(Json(AccountOutcome::from(outcome)))
}

async fn signup_student(
    State(state): State<AppState>,
    Json(req): Json<StudentSignup>,
) -> Result<impl IntoResponse, StatusCode> {
    let outcome = state.api.signup_student(req).await.map_err(internal)?;
    Ok(created(outcome.success, AccountOutcome::from(outcome)))
}

async fn signup_faculty(
    State(state): State<AppState>,
    Json(req): Json<FacultySignup>,
) -> Result<impl IntoResponse, StatusCode> {
    let outcome = state.api.signup_faculty(req).await.map_err(internal)?;
    Ok(created(outcome.success, AccountOutcome::from(outcome)))
}

async fn signup_committee(
    State(state): State<AppState>,
    Json(req): Json<CommitteeSignup>,
) -> Result<impl IntoResponse, StatusCode> {
    let outcome = state.api.signup_committee(req).await.map_err(internal)?;
    Ok(created(outcome.success, AccountOutcome::from(outcome)))
}

async fn get_session(State(state): State<AppState>) -> Result<impl IntoResponse, StatusCode> {
    let user = session_task(&state.sessions, |sessions| sessions.current()).await?;
    Ok(Json(user))
}

async fn put_session(
    State(state): State<AppState>,
    Json(user): Json<User>,
) -> Result<StatusCode, StatusCode> {
    session_task(&state.sessions, move |sessions| sessions.save(&user)).await?;
    Ok(StatusCode::NO_CONTENT)
}

async fn clear_session(State(state): State<AppState>) -> Result<StatusCode, StatusCode> {
    session_task(&state.sessions, |sessions| sessions.clear()).await?;
    Ok(StatusCode::NO_CONTENT)
}

// -- Profiles --

async fn get_profile(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
) -> Result<impl IntoResponse, StatusCode> {
    let user = state
        .api
        .get_student_profile(&user_id)
        .await
        .map_err(internal)?
        .ok_or(StatusCode::NOT_FOUND)?;
    Ok(Json(user))
}

async fn update_profile(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
    Json(patch): Json<Map<String, Value>>,
) -> Result<impl IntoResponse, StatusCode> {
    let outcome = state
        .api
        .update_student_profile(&user_id, patch)
        .await
        .map_err(internal)?;
    Ok(Json(AccountOutcome::from(outcome)))
}

async fn student_achievements(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
) -> Result<impl IntoResponse, StatusCode> {
    let achievements = state
        .api
        .get_student_achievements(&user_id)
        .await
        .map_err(internal)?;
    Ok(Json(achievements))
}

// -- Tasks & applications --

async fn dashboard_tasks(State(state): State<AppState>) -> Result<impl IntoResponse, StatusCode> {
    let tasks = state.api.get_dashboard_tasks().await.map_err(internal)?;
    Ok(Json(tasks))
}

async fn explorer_tasks(
    State(state): State<AppState>,
    Path(student_id): Path<String>,
) -> Result<impl IntoResponse, StatusCode> {
    let tasks = state
        .api
        .get_tasks_for_explorer(&student_id)
        .await
        .map_err(internal)?;
    Ok(Json(tasks))
}

async fn submit_application(
    State(state): State<AppState>,
    Json(req): Json<ApplicationRequest>,
) -> Result<impl IntoResponse, StatusCode> {
    let outcome = state.api.submit_application(req).await.map_err(internal)?;
    Ok(created(outcome.success, outcome))
}

// -- Catalog --

async fn committees(State(state): State<AppState>) -> Result<impl IntoResponse, StatusCode> {
    let committees = state.api.get_committees().await.map_err(internal)?;
    Ok(Json(committees))
}

async fn events(State(state): State<AppState>) -> Result<impl IntoResponse, StatusCode> {
    let events = state.api.get_events().await.map_err(internal)?;
    Ok(Json(events))
}

async fn college_achievements(
    State(state): State<AppState>,
) -> Result<impl IntoResponse, StatusCode> {
    let achievements = state
        .api
        .get_college_achievements()
        .await
        .map_err(internal)?;
    Ok(Json(achievements))
}

// -- Feedback --

async fn feedback_targets(State(state): State<AppState>) -> Result<impl IntoResponse, StatusCode> {
    let targets = state.api.get_feedback_targets().await.map_err(internal)?;
    Ok(Json(targets))
}

async fn submit_feedback(
    State(state): State<AppState>,
    Json(req): Json<FeedbackRequest>,
) -> Result<impl IntoResponse, StatusCode> {
    let outcome = state.api.submit_feedback(req).await.map_err(internal)?;
    Ok(created(outcome.success, outcome))
}

// -- Chat --

async fn chat_data(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
) -> Result<impl IntoResponse, StatusCode> {
    let data = state.api.get_chat_data(&user_id).await.map_err(internal)?;
    Ok(Json(data))
}

async fn channel_messages(
    State(state): State<AppState>,
    Path(channel_id): Path<String>,
) -> Result<impl IntoResponse, StatusCode> {
    let messages = state
        .api
        .get_messages_for_channel(&channel_id)
        .await
        .map_err(internal)?;
    Ok(Json(messages))
}

async fn send_message(
    State(state): State<AppState>,
    Json(req): Json<SendMessageRequest>,
) -> Result<impl IntoResponse, StatusCode> {
    let outcome = state.api.send_message(req).await.map_err(internal)?;
    Ok(created(outcome.success, outcome))
}

// -- Sick leave --

async fn submit_sick_leave(
    State(state): State<AppState>,
    Json(req): Json<SickLeaveRequest>,
) -> Result<impl IntoResponse, StatusCode> {
    let outcome = state.api.submit_sick_leave(req).await.map_err(internal)?;
    Ok(created(outcome.success, outcome))
}

async fn student_sick_leaves(
    State(state): State<AppState>,
    Path(student_id): Path<String>,
) -> Result<impl IntoResponse, StatusCode> {
    let leaves = state
        .api
        .get_sick_leaves_for_student(&student_id)
        .await
        .map_err(internal)?;
    Ok(Json(leaves))
}
