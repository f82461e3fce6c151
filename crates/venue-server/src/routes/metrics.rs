use axum::Json;
use venue_core::metrics::{self, AttendanceSummary};
use venue_core::model::{AttendanceSnapshot, ReservationSnapshot};
use venue_core::reconcile;

/// POST /api/metrics/reservations: reconcile one reservation domain.
pub async fn reservation_metrics(Json(snapshot): Json<ReservationSnapshot>) -> Json<serde_json::Value> {
    let (source, metric) = reconcile::reconcile(&snapshot);
    Json(serde_json::json!({
        "total": metric.total,
        "checkins": metric.checkins,
        "num_reservas": metric.num_reservas,
        "source": source,
    }))
}

/// POST /api/metrics/summary: per-domain subtotals and grand total.
pub async fn summary(Json(snapshot): Json<AttendanceSnapshot>) -> Json<AttendanceSummary> {
    Json(metrics::summarize(&snapshot))
}
