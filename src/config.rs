use std::env;

const DEFAULT_MAX_CELLS: usize = 1 << 24;
const DEFAULT_MAX_PIXELS: usize = 1 << 26;

/// Size limits applied when building boards and decoding rasters.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Limits {
    pub max_cells: usize,
    pub max_pixels: usize,
}

impl Default for Limits {
    fn default() -> Self {
        Self {
            max_cells: DEFAULT_MAX_CELLS,
            max_pixels: DEFAULT_MAX_PIXELS,
        }
    }
}

impl Limits {
    /// Reads `GRID_LABS_MAX_CELLS` and `GRID_LABS_MAX_PIXELS`, falling back to
    /// the defaults when unset or unparsable.
    pub fn from_env() -> Self {
        let max_cells: usize = env::var("GRID_LABS_MAX_CELLS")
            .unwrap_or_else(|_| DEFAULT_MAX_CELLS.to_string())
            .parse()
            .unwrap_or(DEFAULT_MAX_CELLS);

        let max_pixels: usize = env::var("GRID_LABS_MAX_PIXELS")
            .unwrap_or_else(|_| DEFAULT_MAX_PIXELS.to_string())
            .parse()
            .unwrap_or(DEFAULT_MAX_PIXELS);

        Self {
            max_cells,
            max_pixels,
        }
    }
}
