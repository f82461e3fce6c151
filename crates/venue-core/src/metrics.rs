use crate::model::{AttendanceSnapshot, LoungeEntry, PromoterEntry};
use crate::reconcile::{self, BaseSource, ReservationMetric};
use serde::{Deserialize, Serialize};

/// Promoter status meaning the guest has arrived. Compared case-sensitively;
/// it is a controlled value from the source system, not free text.
pub const PROMOTER_CHECKED_IN: &str = "Check-in";

// ---------------------------------------------------------------------------
// Metric
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Metric {
    pub total: u64,
    pub checkins: u64,
}

impl Metric {
    /// Expected but not yet arrived.
    pub fn pending(&self) -> u64 {
        self.total.saturating_sub(self.checkins)
    }
}

impl From<ReservationMetric> for Metric {
    fn from(m: ReservationMetric) -> Self {
        Metric {
            total: m.total,
            checkins: m.checkins,
        }
    }
}

impl std::ops::Add for Metric {
    type Output = Metric;

    fn add(self, rhs: Metric) -> Metric {
        Metric {
            total: self.total.saturating_add(rhs.total),
            checkins: self.checkins.saturating_add(rhs.checkins),
        }
    }
}

// ---------------------------------------------------------------------------
// Domain reducers
// ---------------------------------------------------------------------------

pub fn promoter_metrics(entries: &[PromoterEntry]) -> Metric {
    Metric {
        total: entries.len() as u64,
        checkins: entries
            .iter()
            .filter(|e| e.status == PROMOTER_CHECKED_IN)
            .count() as u64,
    }
}

pub fn lounge_metrics(entries: &[LoungeEntry]) -> Metric {
    entries.iter().fold(Metric::default(), |acc, e| Metric {
        total: acc.total.saturating_add(e.capacity),
        checkins: acc.checkins.saturating_add(e.checked_in_count),
    })
}

/// Sum of all three domains. Lounge entries are taken raw and reduced here so
/// this can never disagree with [`lounge_metrics`].
pub fn grand_total(
    reservation: &ReservationMetric,
    promoter: &Metric,
    lounge_entries: &[LoungeEntry],
) -> Metric {
    Metric::from(*reservation) + *promoter + lounge_metrics(lounge_entries)
}

// ---------------------------------------------------------------------------
// AttendanceSummary
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttendanceSummary {
    pub reservations: ReservationMetric,
    pub reservation_source: BaseSource,
    pub promoters: Metric,
    pub lounges: Metric,
    pub total: Metric,
}

/// Reduce a full snapshot into per-domain subtotals and the grand total.
pub fn summarize(snapshot: &AttendanceSnapshot) -> AttendanceSummary {
    let (reservation_source, reservations) = reconcile::reconcile(&snapshot.reservations);
    let promoters = promoter_metrics(&snapshot.promoter_entries);
    let lounges = lounge_metrics(&snapshot.lounge_entries);
    let total = grand_total(&reservations, &promoters, &snapshot.lounge_entries);

    AttendanceSummary {
        reservations,
        reservation_source,
        promoters,
        lounges,
        total,
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
