//! HTTP transport for login and token refresh

pub mod app;
pub mod dto;
pub mod handlers;
pub mod routes;
pub mod telemetry;
