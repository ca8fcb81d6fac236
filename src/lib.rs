//! Choremonsta: a household chore tracker whose every API call passes a
//! bearer-token authorization gate (JWKS-backed RS256 verification plus a
//! per-operation permission check).

pub mod api;
pub mod app;
pub mod config;
pub mod error;
pub mod middleware;
pub mod repos;
pub mod services;
pub mod state;
