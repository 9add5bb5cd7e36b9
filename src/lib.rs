//! Grid engines for two lab exercises.
//!
//! - [`Field`]: an N-dimensional mine field with flood-fill digging,
//!   masked rendering and a dictionary form.
//! - [`Image`]: a grayscale pixel grid with correlation filters, Sobel
//!   edge energy and seam carving.
//!
//! ```rust
//! use grid_labs::{Field, GameState};
//!
//! let mut field = Field::new(vec![2, 4], [[0usize, 0], [1, 0], [1, 1]])?;
//! assert_eq!(field.dig(&[0, 3])?, 4);
//! assert_eq!(field.dig(&[0, 1])?, 1);
//! assert_eq!(field.state(), GameState::Victory);
//! # Ok::<(), grid_labs::Error>(())
//! ```

pub mod codec;
pub mod config;
pub mod data;
pub mod error;
pub mod logging;
pub mod logic;
pub mod model;

pub use codec::{ImageCodec, JsonRasterCodec};
pub use config::Limits;
pub use data::{Field, Image, Shape};
pub use error::{Error, Result};
pub use logic::{Kernel, Seam};

// Re-export common types for convenience
pub use grid_labs_common::{
    BOMB_SYMBOL, BoardCell, ColorMode, FieldParams, GameDict, GameState, Nested, RawImage,
};
