//! Command-line client for the DigitalOcean v1 API
//!
//! Lists, inspects, creates, destroys and power-cycles droplets, and manages
//! the SSH keys used to reach them.

pub mod api;
pub mod cli;
pub mod commands;
pub mod config;
