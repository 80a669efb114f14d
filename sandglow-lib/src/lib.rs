//! # Sandglow Library
//!
//! This library provides the position-synchronized lighting engine for a polar
//! (theta/rho) drawing table. It includes modules for coordinate-to-color
//! mapping, update throttling, localized segment planning, strategy dispatch,
//! and reactive session state.

pub mod color;
pub mod constants;
pub mod cues;
pub mod device;
pub mod segments;
pub mod state;
pub mod sync;
pub mod throttle;
