//! Page modules for route-level screens.
//!
//! ARCHITECTURE
//! ============
//! Each page owns route-scoped orchestration: fetching, session effects and
//! navigation.

pub mod dashboard;
pub mod login;
