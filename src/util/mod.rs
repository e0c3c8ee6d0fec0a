//! Shared utilities for the inspection engine.

pub mod frame_timing;
