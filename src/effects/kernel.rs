use crate::foundation::error::{PixmillError, PixmillResult};
use crate::foundation::math::next_odd;

/// Odd-length 1D convolution kernel.
///
/// Weights are stored raw; convolution divides by the sum of the weights that actually land
/// inside the image, so edges renormalize over fewer taps.
#[derive(Clone, Debug, PartialEq)]
pub struct Kernel1D {
    weights: Vec<f64>,
}

impl Kernel1D {
    /// Gaussian samples `exp(-x^2 / (2 stddev^2))` for `x` in `-r..=r`.
    ///
    /// `size` is raised to the next odd value. A zero, negative or non-finite `stddev` yields a
    /// unit impulse of the same length.
    pub fn gaussian(size: usize, stddev: f64) -> Self {
        let len = next_odd(size);
        let radius = (len / 2) as i64;

        if !stddev.is_finite() || stddev <= 0.0 {
            let mut weights = vec![0.0; len];
            weights[len / 2] = 1.0;
            return Self { weights };
        }

        let denom = 2.0 * stddev * stddev;
        let weights = (-radius..=radius)
            .map(|i| {
                let x = i as f64;
                (-x * x / denom).exp()
            })
            .collect();
        Self { weights }
    }

    /// Gaussian with `stddev = (size - 1) / 2`, computed on the odd size.
    pub fn gaussian_default(size: usize) -> Self {
        let len = next_odd(size);
        Self::gaussian(len, (len - 1) as f64 / 2.0)
    }

    /// Equal weights over the next odd `size`.
    pub fn box_filter(size: usize) -> Self {
        Self {
            weights: vec![1.0; next_odd(size)],
        }
    }

    /// Kernel from explicit weights. The length must be odd and every weight finite and >= 0.
    pub fn from_weights(weights: Vec<f64>) -> PixmillResult<Self> {
        if weights.len() % 2 == 0 {
            return Err(PixmillError::validation(format!(
                "kernel length must be odd, got {}",
                weights.len()
            )));
        }
        if weights.iter().any(|w| !w.is_finite() || *w < 0.0) {
            return Err(PixmillError::validation(
                "kernel weights must be finite and >= 0",
            ));
        }
        Ok(Self { weights })
    }

    pub fn weights(&self) -> &[f64] {
        &self.weights
    }

    pub fn len(&self) -> usize {
        self.weights.len()
    }

    pub fn is_empty(&self) -> bool {
        self.weights.is_empty()
    }

    /// Taps on each side of the centre.
    pub fn radius(&self) -> usize {
        self.weights.len() / 2
    }
}

#[cfg(test)]
#[path = "../../tests/unit/effects/kernel.rs"]
mod tests;
