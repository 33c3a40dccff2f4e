//! Work log server library.
//!
//! This library provides the core functionality for the work log server,
//! including database operations, attachment presigning, and API services.

pub mod api;
pub mod config;
pub mod db;
pub mod entity;
pub mod error;
pub mod middleware;
pub mod migration;
pub mod models;
pub mod services;
