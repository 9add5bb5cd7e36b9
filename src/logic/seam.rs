use std::collections::HashSet;

use tracing::{debug, instrument, trace};

use crate::{
    data::Image,
    error::{Error, Result},
};

/// Connected path of `(x, y)` pixels with exactly one pixel per row,
/// listed from the bottom row up.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Seam(Vec<(usize, usize)>);

impl Seam {
    pub fn new(coords: Vec<(usize, usize)>) -> Self {
        Self(coords)
    }

    pub fn coords(&self) -> &[(usize, usize)] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl Image {
    /// Column among `columns` of row `y` with the smallest value; the
    /// lowest column index wins ties.
    fn min_column(&self, y: usize, columns: impl Iterator<Item = usize>) -> usize {
        let row = &self.pixels[y * self.width..(y + 1) * self.width];
        let mut best: Option<(usize, f64)> = None;
        for x in columns {
            match best {
                Some((_, value)) if row[x] >= value => {}
                _ => best = Some((x, row[x])),
            }
        }
        best.map_or(0, |(x, _)| x)
    }

    /// Turns an energy map into a cumulative one, in place: every pixel
    /// below the first row adds the cheapest of its (up to) three parents.
    pub fn accumulate_energy(&mut self) {
        if self.width == 0 {
            return;
        }

        for y in 1..self.height {
            for x in 0..self.width {
                let parents = x.saturating_sub(1)..=(x + 1).min(self.width - 1);
                let parent = self.min_column(y - 1, parents);
                let cost = self.pixels[parent + (y - 1) * self.width];
                self.pixels[x + y * self.width] += cost;
            }
        }
    }

    pub fn cumulative_energy(&self) -> Image {
        let mut map = self.edges();
        map.accumulate_energy();
        map
    }

    /// Cheapest seam through a cumulative energy map, traced from the
    /// minimum of the bottom row upwards.
    pub fn min_seam(&self) -> Seam {
        if self.width == 0 || self.height == 0 {
            return Seam::default();
        }

        let bottom = self.height - 1;
        let mut x = self.min_column(bottom, 0..self.width);
        let mut path = Vec::with_capacity(self.height);
        path.push((x, bottom));

        for y in (0..bottom).rev() {
            let parents = x.saturating_sub(1)..=(x + 1).min(self.width - 1);
            x = self.min_column(y, parents);
            path.push((x, y));
        }

        Seam(path)
    }

    /// Removes the pixels of `seam` and narrows the image by one column.
    ///
    /// The seam must hold exactly one in-range pixel for every row.
    pub fn delete_seam(&mut self, seam: &Seam) -> Result<()> {
        if self.width <= 1 {
            return Err(Error::InvalidSeam("cannot remove the last column".to_string()));
        }
        if seam.len() != self.height {
            return Err(Error::InvalidSeam(format!(
                "{} pixels for {} rows",
                seam.len(),
                self.height
            )));
        }

        let mut rows = HashSet::with_capacity(self.height);
        let mut removed = HashSet::with_capacity(self.height);
        for &(x, y) in seam.coords() {
            if x >= self.width || y >= self.height {
                return Err(Error::InvalidSeam(format!(
                    "pixel ({x}, {y}) is outside the image"
                )));
            }
            if !rows.insert(y) {
                return Err(Error::InvalidSeam(format!("row {y} appears twice")));
            }
            removed.insert(x + y * self.width);
        }

        let mut index = 0;
        self.pixels.retain(|_| {
            let keep = !removed.contains(&index);
            index += 1;
            keep
        });
        self.width -= 1;
        Ok(())
    }

    /// Narrows the image by `n` columns, removing one minimum energy seam at
    /// a time.
    #[instrument(level = "debug", skip(self), fields(width = self.width, height = self.height))]
    pub fn seam_carving(&self, n: usize) -> Result<Image> {
        if n >= self.width {
            return Err(Error::TooManySeams {
                requested: n,
                width: self.width,
            });
        }

        let mut result = self.clone();
        for round in 0..n {
            let seam = result.cumulative_energy().min_seam();
            trace!(round, bottom = ?seam.coords().first(), "Removing seam");
            result.delete_seam(&seam)?;
        }

        debug!("Carved down to {} columns", result.width);
        Ok(result)
    }

    /// Column whose edge energy summed over every row is smallest.
    pub fn min_energy_column(&self) -> usize {
        let energy = self.edges();
        let mut best: Option<(usize, f64)> = None;
        for x in 0..self.width {
            let total: f64 = (0..self.height)
                .map(|y| energy.pixels[x + y * self.width])
                .sum();
            match best {
                Some((_, value)) if total >= value => {}
                _ => best = Some((x, total)),
            }
        }
        best.map_or(0, |(x, _)| x)
    }

    /// Narrows the image by `n` columns, dropping whole minimum energy
    /// columns.
    pub fn shrink(&self, n: usize) -> Result<Image> {
        if n >= self.width {
            return Err(Error::TooManySeams {
                requested: n,
                width: self.width,
            });
        }

        let mut result = self.clone();
        for _ in 0..n {
            let column = result.min_energy_column();
            let seam = Seam((0..result.height).rev().map(|y| (column, y)).collect());
            result.delete_seam(&seam)?;
        }
        Ok(result)
    }
}
