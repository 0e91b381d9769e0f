//! Small browser-facing helpers shared by state and pages.

pub mod storage;
