//! Walk-to-table escort tracking.
//!
//! Every escortable entity gets a composite queue id (`queue_id`). The remote
//! venue-operations API records which ids have been conduced for a venue and
//! day (`client`); confirmation is terminal and idempotent on the server side.
//! `queue` builds the live queue from a reservation snapshot.

pub mod client;
pub mod queue;
pub mod queue_id;

pub use client::ConductionClient;
pub use queue::{build_queue, pending, QueueItem};
pub use queue_id::{ConductionPayload, EntityType, QueueKey, QueueRef};
