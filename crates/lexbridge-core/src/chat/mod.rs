//! Chat request orchestration.

pub mod service;
