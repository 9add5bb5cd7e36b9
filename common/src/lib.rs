//! Serializable types shared by the grid-labs engines.
//!
//! These mirror the dictionary form of a mine field game and the raster
//! exchange format used at the image codec boundary.

pub mod models;

pub use models::*;
