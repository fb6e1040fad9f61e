// fern_server/src/lib.rs

//! actix-web driver for the Fern registry, plus the routes this server defines.

pub mod config;
pub mod errors;
pub mod models;
pub mod routes;
pub mod services;
pub mod state;
pub mod web;
