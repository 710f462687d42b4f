//! REST API module for spam-rs
//!
//! Exposes the classifier over HTTP

pub mod handlers;
pub mod server;

pub use server::ApiServer;
