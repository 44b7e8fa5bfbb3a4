pub mod cli;
pub mod config;
pub mod error;
pub mod estimate;
pub mod evaluator;
pub mod graph;
pub mod models;
pub mod output;
pub mod store;
