pub mod cli;
pub mod config;
pub mod flows;
pub mod utils;
