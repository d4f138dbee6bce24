//! Meal Train server library.
//!
//! This crate provides the server functionality as a library, allowing it
//! to be tested and reused (the CLI uses the db module for seeding).
//!
//! # Surfaces
//!
//! - Public JSON API: pickup locations, meal signups, token cancellation
//! - Scheduled trigger: day-before reminder sweep
//! - Admin surface: session-gated CRUD for couriers, pickup locations, and
//!   signups

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod config;
pub mod dates;
pub mod db;
pub mod error;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod services;
pub mod state;
