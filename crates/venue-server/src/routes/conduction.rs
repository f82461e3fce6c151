use axum::extract::{Query, State};
use axum::Json;
use chrono::NaiveDate;
use serde::Deserialize;
use venue_core::conduction::{self, ConductionPayload};
use venue_core::model::ReservationSnapshot;

use crate::error::AppError;
use crate::state::AppState;

#[derive(Deserialize)]
pub struct DayParams {
    establishment_id: i64,
    flow_date: NaiveDate,
}

/// GET /api/conduction: ids already conduced at a venue on a given day.
pub async fn list_confirmed(
    State(app): State<AppState>,
    Query(params): Query<DayParams>,
) -> Result<Json<serde_json::Value>, AppError> {
    let ids = app
        .tracker
        .list_confirmed(params.establishment_id, params.flow_date)
        .await?;
    Ok(Json(serde_json::json!({ "conduced_ids": ids })))
}

#[derive(Deserialize)]
pub struct ConfirmBody {
    establishment_id: i64,
    flow_date: NaiveDate,
    queue_item_id: String,
    #[serde(default)]
    guest_list_id: Option<i64>,
    #[serde(default)]
    reservation_id: Option<i64>,
}

/// POST /api/conduction: mark a queue item as conduced.
///
/// Returns the full payload that was sent upstream.
pub async fn confirm(
    State(app): State<AppState>,
    Json(body): Json<ConfirmBody>,
) -> Result<Json<ConductionPayload>, AppError> {
    let payload = ConductionPayload::for_item(
        body.establishment_id,
        body.flow_date,
        body.queue_item_id,
        body.guest_list_id,
        body.reservation_id,
    );
    app.tracker.confirm(&payload).await?;
    Ok(Json(payload))
}

#[derive(Deserialize)]
pub struct QueueBody {
    establishment_id: i64,
    flow_date: NaiveDate,
    #[serde(default)]
    snapshot: ReservationSnapshot,
}

/// POST /api/conduction/queue: the escort queue for a snapshot, with each
/// item marked conduced or not.
pub async fn queue(
    State(app): State<AppState>,
    Json(body): Json<QueueBody>,
) -> Result<Json<serde_json::Value>, AppError> {
    let confirmed = app
        .tracker
        .list_confirmed(body.establishment_id, body.flow_date)
        .await?;
    let items = conduction::build_queue(&body.snapshot, &confirmed);
    let pending = conduction::pending(&items).count();
    Ok(Json(serde_json::json!({
        "establishment_id": body.establishment_id,
        "flow_date": body.flow_date,
        "items": items,
        "pending": pending,
    })))
}
