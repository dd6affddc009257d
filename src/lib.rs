pub mod config;
pub mod i18n;
pub mod responses;
pub mod retry;
pub mod security;
pub mod server;
