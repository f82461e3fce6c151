pub mod conduction;
pub mod config;
pub mod error;
pub mod lenient;
pub mod metrics;
pub mod model;
pub mod paths;
pub mod reconcile;
pub mod vip;

pub use error::{Result, VenueError};
