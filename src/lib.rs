pub mod cli;
pub mod config;
pub mod error;
pub mod matcher;
pub mod orchestrator;
pub mod run_log;
pub mod scanner;
pub mod transfer;
pub mod workbook;
