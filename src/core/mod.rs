pub mod config;
pub mod constants;
pub mod export;
pub mod feature;
pub mod handlers;
pub mod session;
pub mod upload;
