pub mod cli;
pub mod component;
pub mod config;
pub mod demo;
pub mod dispatch;
pub mod error;
pub mod logging;
pub mod provider;
pub mod region;
pub mod state;
pub mod ui;
