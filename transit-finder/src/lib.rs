//! Nearby transit finder.
//!
//! Given an address, finds the subway and bus stations around it, the
//! lines serving them, and keeps a map overlay in step as lines are shown
//! and hidden.

pub mod cache;
pub mod domain;
pub mod engine;
pub mod lines;
pub mod overlay;
pub mod provider;
pub mod stations;
pub mod web;
