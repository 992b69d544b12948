use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use serde::Deserialize;
use serde_json::{json, Value};
use tracing::{info, warn};

use crate::services::activity_directory::{DirectoryError, SharedDirectory};

/// Both roster mutations take the student email as a query parameter; a
/// missing or malformed value is rejected by the extractor before the
/// directory is touched.
#[derive(Debug, Deserialize)]
pub struct RosterQuery {
    pub email: String,
}

pub async fn list_activities_handler(State(directory): State<SharedDirectory>) -> Json<Value> {
    let directory = directory.read().await;
    Json(json!(directory.list()))
}

pub async fn signup_handler(
    Path(activity_name): Path<String>,
    Query(query): Query<RosterQuery>,
    State(directory): State<SharedDirectory>,
) -> Result<Json<Value>, (StatusCode, Json<Value>)> {
    let mut directory = directory.write().await;
    match directory.signup(&activity_name, &query.email) {
        Ok(()) => {
            info!(activity = %activity_name, email = %query.email, "signup accepted");
            Ok(Json(json!({
                "message": format!("Signed up {} for {}", query.email, activity_name)
            })))
        }
        Err(e) => {
            warn!(activity = %activity_name, email = %query.email, "signup rejected: {e}");
            Err(error_response(e))
        }
    }
}

pub async fn unregister_handler(
    Path(activity_name): Path<String>,
    Query(query): Query<RosterQuery>,
    State(directory): State<SharedDirectory>,
) -> Result<Json<Value>, (StatusCode, Json<Value>)> {
    let mut directory = directory.write().await;
    match directory.unregister(&activity_name, &query.email) {
        Ok(()) => {
            info!(activity = %activity_name, email = %query.email, "unregister accepted");
            Ok(Json(json!({
                "message": format!("Unregistered {} from {}", query.email, activity_name)
            })))
        }
        Err(e) => {
            warn!(activity = %activity_name, email = %query.email, "unregister rejected: {e}");
            Err(error_response(e))
        }
    }
}

fn error_response(err: DirectoryError) -> (StatusCode, Json<Value>) {
    let status = match err {
        DirectoryError::ActivityNotFound => StatusCode::NOT_FOUND,
        DirectoryError::AlreadySignedUp | DirectoryError::NotSignedUp => StatusCode::BAD_REQUEST,
    };
    (status, Json(json!({ "detail": err.to_string() })))
}
