use axum::extract::State;
use axum::Json;
use serde::Deserialize;
use venue_core::vip::GuestStatus;

use crate::state::AppState;

#[derive(Deserialize)]
pub struct VipCheckBody {
    operator: String,
    name: String,
    #[serde(default)]
    requested_status: Option<GuestStatus>,
}

/// POST /api/vip/check: whether a guest is on the operator's VIP list and
/// which status their check-in should be recorded with.
pub async fn check_vip(
    State(app): State<AppState>,
    Json(body): Json<VipCheckBody>,
) -> Json<serde_json::Value> {
    let vip = app.vip.is_vip(&body.operator, &body.name);
    let requested = body.requested_status.unwrap_or(GuestStatus::Regular);
    let status = app.vip.resolve_status(&body.operator, &body.name, requested);
    Json(serde_json::json!({
        "operator": body.operator,
        "name": body.name,
        "vip": vip,
        "status": status,
    }))
}
