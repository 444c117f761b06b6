pub mod accumulator;
pub mod cli;
pub mod config;
pub mod error;
pub mod record;
pub mod storage;
pub mod weight;
