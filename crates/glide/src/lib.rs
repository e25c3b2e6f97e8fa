//! Scenario configuration and trace reporting for the `glide` command.

pub mod config;
pub mod report;
pub mod runner;
