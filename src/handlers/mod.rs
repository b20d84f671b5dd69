//! HTTP handlers for the Expenso API

pub mod expense;
pub mod resources;
