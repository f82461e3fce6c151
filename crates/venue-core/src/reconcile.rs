//! Reservation-domain attendance reconciliation.
//!
//! Three sources describe the guests behind guest-list-backed reservations:
//! an explicit flat array, per-list loaded arrays and the cached per-list
//! aggregates. They overlap, so they are tried in that order and the first
//! populated one supplies the base count. When the loaded arrays win, lists
//! that were never loaded fall back to their cache entry; a list is still
//! read from one source only. Owners and unlisted reservations are never part
//! of any source and are added on top, whichever source won.

use crate::model::{GuestEntry, ReservationSnapshot};
use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// BaseSource
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BaseSource {
    ExplicitGuests,
    LoadedLists,
    StatusCache,
}

impl BaseSource {
    pub fn as_str(self) -> &'static str {
        match self {
            BaseSource::ExplicitGuests => "explicit_guests",
            BaseSource::LoadedLists => "loaded_lists",
            BaseSource::StatusCache => "status_cache",
        }
    }
}

// ---------------------------------------------------------------------------
// ReservationMetric
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReservationMetric {
    /// People expected.
    pub total: u64,
    /// People arrived.
    pub checkins: u64,
    /// Reservation records across both domains, regardless of check-in.
    pub num_reservas: u64,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
struct Tally {
    total: u64,
    checkins: u64,
}

impl Tally {
    fn of_guests<'a>(guests: impl IntoIterator<Item = &'a GuestEntry>) -> Self {
        guests.into_iter().fold(Tally::default(), |acc, g| Tally {
            total: acc.total.saturating_add(1),
            checkins: acc.checkins.saturating_add(u64::from(g.checked_in)),
        })
    }

    fn merge(&mut self, other: Tally) {
        self.total = self.total.saturating_add(other.total);
        self.checkins = self.checkins.saturating_add(other.checkins);
    }

    fn add(&mut self, present: bool) {
        self.total = self.total.saturating_add(1);
        self.checkins = self.checkins.saturating_add(u64::from(present));
    }
}

// ---------------------------------------------------------------------------
// Base source selection
// ---------------------------------------------------------------------------

fn explicit_guests(snap: &ReservationSnapshot) -> Option<Tally> {
    if snap.restaurant_guests.is_empty() {
        return None;
    }
    Some(Tally::of_guests(&snap.restaurant_guests))
}

fn cached(snap: &ReservationSnapshot, list_id: i64) -> Tally {
    match snap.status_cache.get(&list_id) {
        Some(status) if status.total_guests > 0 => Tally {
            total: status.total_guests,
            checkins: status.guests_checked_in,
        },
        _ => Tally::default(),
    }
}

/// Loaded arrays count as-is; domain lists that were never loaded still
/// report through their cache entry so they are not dropped.
fn loaded_lists(snap: &ReservationSnapshot) -> Option<Tally> {
    let mut tally = Tally::of_guests(snap.loaded_guests.values().flatten());
    if tally.total == 0 {
        return None;
    }
    for list in &snap.guest_lists {
        let is_loaded = snap
            .loaded_guests
            .get(&list.id)
            .is_some_and(|guests| !guests.is_empty());
        if !is_loaded {
            tally.merge(cached(snap, list.id));
        }
    }
    Some(tally)
}

fn status_cache(snap: &ReservationSnapshot) -> Tally {
    let mut tally = Tally::default();
    for list in &snap.guest_lists {
        tally.merge(cached(snap, list.id));
    }
    tally
}

/// Pick the first populated source, in priority order.
fn base_count(snap: &ReservationSnapshot) -> (BaseSource, Tally) {
    if let Some(t) = explicit_guests(snap) {
        return (BaseSource::ExplicitGuests, t);
    }
    if let Some(t) = loaded_lists(snap) {
        return (BaseSource::LoadedLists, t);
    }
    (BaseSource::StatusCache, status_cache(snap))
}

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

/// Reconcile one venue's reservation domain into a single head count.
pub fn reservation_metric(snap: &ReservationSnapshot) -> ReservationMetric {
    reconcile(snap).1
}

/// Like [`reservation_metric`], also reporting which source supplied the
/// base count.
pub fn reconcile(snap: &ReservationSnapshot) -> (BaseSource, ReservationMetric) {
    let (source, mut tally) = base_count(snap);

    for list in &snap.guest_lists {
        tally.add(snap.owner_checked_in(list));
    }

    for reservation in snap.unlisted_reservations() {
        tally.add(reservation.checked_in);
    }

    let num_reservas =
        (snap.table_reservations.len() + snap.restaurant_reservations.len()) as u64;

    tracing::debug!(
        source = source.as_str(),
        total = tally.total,
        checkins = tally.checkins,
        num_reservas,
        "reconciled reservation domain"
    );

    (
        source,
        ReservationMetric {
            total: tally.total,
            checkins: tally.checkins,
            num_reservas,
        },
    )
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
