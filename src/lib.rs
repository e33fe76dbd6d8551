pub mod api;
pub mod config;
pub mod context;
pub mod courses;
pub mod logging;
pub mod navigation;
pub mod organizations;
pub mod session;
pub mod storage;
