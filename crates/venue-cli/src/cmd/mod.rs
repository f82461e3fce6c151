pub mod conduction;
pub mod config;
pub mod init;
pub mod metrics;
pub mod serve;
pub mod vip;
