//! Concierge library exports for testing

pub mod controller;
pub mod core;
pub mod tui;
pub mod webhook;

#[cfg(test)]
pub mod test_support;
