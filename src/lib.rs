pub mod cells;
pub mod cli;
pub mod config;
pub mod error;
pub mod monthly;
pub mod pipeline;
pub mod reading;
pub mod sample;
pub mod topology;
