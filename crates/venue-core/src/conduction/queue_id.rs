use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

// ---------------------------------------------------------------------------
// EntityType
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntityType {
    Owner,
    Guest,
    ReservationOwner,
}

impl EntityType {
    pub fn as_str(self) -> &'static str {
        match self {
            EntityType::Owner => "owner",
            EntityType::Guest => "guest",
            EntityType::ReservationOwner => "reservation_owner",
        }
    }
}

impl fmt::Display for EntityType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// QueueKey
// ---------------------------------------------------------------------------

/// An escortable entity. `Display` produces the composite queue id:
/// `owner-<list>`, `guest-<list>-<guest>` or `reservation-<id>`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum QueueKey {
    Owner { guest_list_id: i64 },
    Guest { guest_list_id: i64, guest_id: i64 },
    Reservation { reservation_id: i64 },
}

impl QueueKey {
    pub fn entity_type(self) -> EntityType {
        match self {
            QueueKey::Owner { .. } => EntityType::Owner,
            QueueKey::Guest { .. } => EntityType::Guest,
            QueueKey::Reservation { .. } => EntityType::ReservationOwner,
        }
    }

    pub fn entity_id(self) -> i64 {
        match self {
            QueueKey::Owner { guest_list_id } => guest_list_id,
            QueueKey::Guest { guest_id, .. } => guest_id,
            QueueKey::Reservation { reservation_id } => reservation_id,
        }
    }
}

impl fmt::Display for QueueKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            QueueKey::Owner { guest_list_id } => write!(f, "owner-{guest_list_id}"),
            QueueKey::Guest {
                guest_list_id,
                guest_id,
            } => write!(f, "guest-{guest_list_id}-{guest_id}"),
            QueueKey::Reservation { reservation_id } => write!(f, "reservation-{reservation_id}"),
        }
    }
}

// ---------------------------------------------------------------------------
// QueueRef
// ---------------------------------------------------------------------------

/// What a composite queue id decodes to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueueRef {
    pub entity_type: EntityType,
    pub entity_id: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub guest_list_id: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reservation_id: Option<i64>,
}

fn segment(s: Option<&str>) -> Option<i64> {
    s.and_then(|s| s.parse::<i64>().ok())
}

impl QueueRef {
    /// Decode a composite queue id. Never fails: unknown shapes are treated
    /// as a reservation owner and non-numeric segments give entity id 0.
    pub fn parse(id: &str) -> Self {
        if let Some(rest) = id.strip_prefix("owner-") {
            let list = segment(Some(rest));
            return QueueRef {
                entity_type: EntityType::Owner,
                entity_id: list.unwrap_or(0),
                guest_list_id: list,
                reservation_id: None,
            };
        }
        if id.starts_with("guest-") {
            let mut parts = id.split('-').skip(1);
            let list = segment(parts.next());
            let guest = segment(parts.next());
            return QueueRef {
                entity_type: EntityType::Guest,
                entity_id: guest.unwrap_or(0),
                guest_list_id: list,
                reservation_id: None,
            };
        }
        if let Some(rest) = id.strip_prefix("reservation-") {
            let reservation = segment(Some(rest));
            return QueueRef {
                entity_type: EntityType::ReservationOwner,
                entity_id: reservation.unwrap_or(0),
                guest_list_id: None,
                reservation_id: reservation,
            };
        }
        QueueRef {
            entity_type: EntityType::ReservationOwner,
            entity_id: 0,
            guest_list_id: None,
            reservation_id: None,
        }
    }

    /// Explicitly supplied ids take precedence over the ones derived from
    /// the composite id.
    pub fn with_explicit(mut self, guest_list_id: Option<i64>, reservation_id: Option<i64>) -> Self {
        if guest_list_id.is_some() {
            self.guest_list_id = guest_list_id;
        }
        if reservation_id.is_some() {
            self.reservation_id = reservation_id;
        }
        self
    }
}

impl From<QueueKey> for QueueRef {
    fn from(key: QueueKey) -> Self {
        let (guest_list_id, reservation_id) = match key {
            QueueKey::Owner { guest_list_id } | QueueKey::Guest { guest_list_id, .. } => {
                (Some(guest_list_id), None)
            }
            QueueKey::Reservation { reservation_id } => (None, Some(reservation_id)),
        };
        QueueRef {
            entity_type: key.entity_type(),
            entity_id: key.entity_id(),
            guest_list_id,
            reservation_id,
        }
    }
}

// ---------------------------------------------------------------------------
// ConductionPayload
// ---------------------------------------------------------------------------

/// Body of `POST /conduction`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConductionPayload {
    pub establishment_id: i64,
    /// Serialized as `YYYY-MM-DD`.
    pub flow_date: NaiveDate,
    pub queue_item_id: String,
    pub entity_type: EntityType,
    pub entity_id: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub guest_list_id: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reservation_id: Option<i64>,
}

impl ConductionPayload {
    /// Build the full payload for a queue id, deriving entity fields from the
    /// id and filling in `guest_list_id` / `reservation_id` defaults only
    /// where the caller did not supply them.
    pub fn for_item(
        establishment_id: i64,
        flow_date: NaiveDate,
        queue_item_id: impl Into<String>,
        guest_list_id: Option<i64>,
        reservation_id: Option<i64>,
    ) -> Self {
        let queue_item_id = queue_item_id.into();
        let r = QueueRef::parse(&queue_item_id).with_explicit(guest_list_id, reservation_id);
        Self {
            establishment_id,
            flow_date,
            queue_item_id,
            entity_type: r.entity_type,
            entity_id: r.entity_id,
            guest_list_id: r.guest_list_id,
            reservation_id: r.reservation_id,
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
