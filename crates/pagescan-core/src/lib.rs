pub mod config;
pub mod logging;

pub mod batch;
pub mod fetch;
pub mod input;
pub mod links;
pub mod report;
pub mod units;
