pub mod app;
pub mod app_dirs;
pub mod celebration;
pub mod challenge;
pub mod config;
pub mod logging;
pub mod runtime;
pub mod scoring;
pub mod session;
pub mod stats;
pub mod timer;
pub mod ui;
pub mod util;
