use crate::{
    data::Image,
    error::{Error, Result},
};

/// Square correlation kernel with an odd side length.
#[derive(Clone, Debug, PartialEq)]
pub struct Kernel {
    size: usize,
    weights: Vec<f64>,
}

impl Kernel {
    pub fn new(rows: Vec<Vec<f64>>) -> Result<Self> {
        let size = rows.len();
        if size % 2 == 0 {
            return Err(Error::InvalidKernel(format!(
                "side length {size} is not odd"
            )));
        }
        if let Some(row) = rows.iter().find(|row| row.len() != size) {
            return Err(Error::InvalidKernel(format!(
                "row of length {} in a kernel with {size} rows",
                row.len()
            )));
        }

        Ok(Self {
            size,
            weights: rows.into_iter().flatten().collect(),
        })
    }

    /// `n x n` box blur whose weights sum to `total`.
    pub fn box_blur(n: usize, total: f64) -> Result<Self> {
        let value = total / (n * n) as f64;
        Self::new(vec![vec![value; n]; n])
    }

    pub fn sobel_x() -> Self {
        Self {
            size: 3,
            weights: vec![-1.0, 0.0, 1.0, -2.0, 0.0, 2.0, -1.0, 0.0, 1.0],
        }
    }

    pub fn sobel_y() -> Self {
        Self {
            size: 3,
            weights: vec![-1.0, -2.0, -1.0, 0.0, 0.0, 0.0, 1.0, 2.0, 1.0],
        }
    }

    pub fn size(&self) -> usize {
        self.size
    }

    /// Weight at column `dx`, row `dy`.
    pub fn weight(&self, dx: usize, dy: usize) -> f64 {
        self.weights[dx + dy * self.size]
    }
}

impl Image {
    /// Pixel count of a `width x height` image, rejecting empty or
    /// overflowing sizes.
    pub(crate) fn area(width: usize, height: usize) -> Result<usize> {
        match width.checked_mul(height) {
            Some(area) if area > 0 => Ok(area),
            _ => Err(Error::InvalidDimensions(vec![width, height])),
        }
    }

    /// Blank (all zero) image.
    pub fn new(width: usize, height: usize) -> Result<Self> {
        Ok(Self {
            width,
            height,
            pixels: vec![0.0; Self::area(width, height)?],
        })
    }

    pub fn from_pixels(width: usize, height: usize, pixels: Vec<f64>) -> Result<Self> {
        let expected = Self::area(width, height)?;
        if pixels.len() != expected {
            return Err(Error::PixelCount {
                expected,
                actual: pixels.len(),
            });
        }
        Ok(Self {
            width,
            height,
            pixels,
        })
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn pixels(&self) -> &[f64] {
        &self.pixels
    }

    fn index(&self, x: usize, y: usize) -> Result<usize> {
        if x >= self.width || y >= self.height {
            return Err(Error::OutOfBounds {
                x,
                y,
                width: self.width,
                height: self.height,
            });
        }
        Ok(x + y * self.width)
    }

    pub fn get_pixel(&self, x: usize, y: usize) -> Result<f64> {
        Ok(self.pixels[self.index(x, y)?])
    }

    /// Pixel at `(x, y)` with each coordinate clamped into the image, so
    /// the border repeats outwards.
    pub fn get_pixel_clamped(&self, x: i64, y: i64) -> f64 {
        let x = x.clamp(0, self.width as i64 - 1) as usize;
        let y = y.clamp(0, self.height as i64 - 1) as usize;
        self.pixels[x + y * self.width]
    }

    pub fn set_pixel(&mut self, x: usize, y: usize, value: f64) -> Result<()> {
        let index = self.index(x, y)?;
        self.pixels[index] = value;
        Ok(())
    }

    pub fn apply_per_pixel<F: Fn(f64) -> f64>(&self, func: F) -> Self {
        Self {
            width: self.width,
            height: self.height,
            pixels: self.pixels.iter().map(|&c| func(c)).collect(),
        }
    }

    pub fn inverted(&self) -> Self {
        self.apply_per_pixel(|c| 255.0 - c)
    }

    /// Rounds every pixel to the nearest integer, halves to even, and
    /// saturates to `[0, 255]`.
    pub fn clip(&self) -> Self {
        self.apply_per_pixel(|c| c.round_ties_even().clamp(0.0, 255.0))
    }

    /// Correlation with `kernel` centered on every pixel. Out of range
    /// samples use clamped access; results are not clipped.
    pub fn correlate(&self, kernel: &Kernel) -> Self {
        let size = kernel.size();
        let shift = (size / 2) as i64;
        let mut result = Self {
            width: self.width,
            height: self.height,
            pixels: vec![0.0; self.pixels.len()],
        };

        for y in 0..self.height {
            for x in 0..self.width {
                let left = x as i64 - shift;
                let top = y as i64 - shift;
                let mut color = 0.0;
                for dy in 0..size {
                    for dx in 0..size {
                        color += self.get_pixel_clamped(left + dx as i64, top + dy as i64)
                            * kernel.weight(dx, dy);
                    }
                }
                result.pixels[x + y * self.width] = color;
            }
        }

        result
    }

    pub fn blurred(&self, n: usize) -> Result<Self> {
        Ok(self.correlate(&Kernel::box_blur(n, 1.0)?).clip())
    }

    /// Unsharp mask: twice the image minus its `n x n` box blur.
    pub fn sharpened(&self, n: usize) -> Result<Self> {
        let mut rows = vec![vec![-1.0 / (n * n) as f64; n]; n];
        let center = n / 2;
        if let Some(weight) = rows.get_mut(center).and_then(|row| row.get_mut(center)) {
            *weight += 2.0;
        }
        Ok(self.correlate(&Kernel::new(rows)?).clip())
    }

    /// Sobel edge magnitude, clipped.
    pub fn edges(&self) -> Self {
        let gx = self.correlate(&Kernel::sobel_x());
        let gy = self.correlate(&Kernel::sobel_y());
        let magnitude = gx
            .pixels
            .iter()
            .zip(&gy.pixels)
            .map(|(x, y)| (x * x + y * y).sqrt())
            .collect();

        Self {
            width: self.width,
            height: self.height,
            pixels: magnitude,
        }
        .clip()
    }
}
