//! Networking modules.
//!
//! SYSTEM CONTEXT
//! ==============
//! `api` handles REST calls; the wire schema lives in the shared `wire` crate.

pub mod api;
