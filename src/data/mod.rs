use grid_labs_common::{BoardCell, GameState};

use crate::error::{Error, Result};

/// Row-major layout of an N-dimensional grid; the last axis varies fastest.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Shape {
    dimensions: Vec<usize>,
    strides: Vec<usize>,
    len: usize,
}

impl Shape {
    pub fn new(dimensions: Vec<usize>) -> Result<Self> {
        if dimensions.is_empty() || dimensions.contains(&0) {
            return Err(Error::InvalidDimensions(dimensions));
        }

        let Some(len) = dimensions
            .iter()
            .try_fold(1usize, |acc, &size| acc.checked_mul(size))
        else {
            return Err(Error::InvalidDimensions(dimensions));
        };

        let mut strides = vec![1; dimensions.len()];
        for axis in (0..dimensions.len() - 1).rev() {
            strides[axis] = strides[axis + 1] * dimensions[axis + 1];
        }

        Ok(Self {
            dimensions,
            strides,
            len,
        })
    }

    pub fn dimensions(&self) -> &[usize] {
        &self.dimensions
    }

    pub fn rank(&self) -> usize {
        self.dimensions.len()
    }

    /// Total number of cells.
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Flat index of `coord`, or `None` if it has the wrong arity or falls
    /// outside the grid.
    pub fn index(&self, coord: &[usize]) -> Option<usize> {
        if coord.len() != self.rank() {
            return None;
        }

        let mut index = 0;
        for ((&c, &size), &stride) in coord.iter().zip(&self.dimensions).zip(&self.strides) {
            if c >= size {
                return None;
            }
            index += c * stride;
        }
        Some(index)
    }

    pub fn checked_index(&self, coord: &[usize]) -> Result<usize> {
        self.index(coord).ok_or_else(|| Error::InvalidCoordinate {
            coord: coord.to_vec(),
            dimensions: self.dimensions.clone(),
        })
    }

    pub fn coord(&self, index: usize) -> Vec<usize> {
        self.dimensions
            .iter()
            .zip(&self.strides)
            .map(|(&size, &stride)| (index / stride) % size)
            .collect()
    }

    /// Flat indices of the Chebyshev-1 neighborhood of `index`, the cell
    /// itself included. Each axis range is clamped to the grid before the
    /// product is taken, so no index appears twice.
    pub fn neighbors(&self, index: usize) -> Vec<usize> {
        let mut out = vec![0];
        for (axis, c) in self.coord(index).into_iter().enumerate() {
            let low = c.saturating_sub(1);
            let high = (c + 1).min(self.dimensions[axis] - 1);
            let stride = self.strides[axis];
            out = out
                .iter()
                .flat_map(|&base| (low..=high).map(move |v| base + v * stride))
                .collect();
        }
        out
    }
}

/// N-dimensional mine field: board, visibility mask and game state, stored
/// flat in the order given by `shape`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Field {
    pub(crate) shape: Shape,
    pub(crate) board: Vec<BoardCell>,
    pub(crate) mask: Vec<bool>,
    pub(crate) state: GameState,
}

/// Single channel image with real-valued intensities, row-major.
#[derive(Clone, Debug, PartialEq)]
pub struct Image {
    pub(crate) width: usize,
    pub(crate) height: usize,
    pub(crate) pixels: Vec<f64>,
}
