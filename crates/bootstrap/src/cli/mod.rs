pub mod app;
pub mod config;
pub mod install;
pub mod link;
pub mod status;
