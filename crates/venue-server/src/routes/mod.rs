pub mod conduction;
pub mod metrics;
pub mod vip;
