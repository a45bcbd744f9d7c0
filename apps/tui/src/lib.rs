// Library surface shared by the binary and the integration tests
pub mod aggregate;
pub mod app;
pub mod cache;
pub mod chart;
pub mod cli;
pub mod config;
pub mod db;
pub mod domain;
pub mod event;
pub mod fetch;
pub mod logging;
pub mod page;
pub mod pipeline;
pub mod selection;
pub mod terminal;
pub mod ui;

pub use domain::{AggregateMap, Count, DistrictAggregate, DistrictCatalog, DistrictKey, RawRecord};
