//! Fixed-size per-wavelength arrays with explicit element-wise arithmetic.

use std::fmt;
use std::ops::{Add, AddAssign, Index, IndexMut, Mul, MulAssign, Sub};

use crate::WAVELENGTH_COUNT;

/// One value per wavelength sample, ordered from shortest to longest wavelength.
///
/// Used both for radiance spectra produced by the integrator and for the
/// per-wavelength coefficient vectors (solar spectrum, scattering, absorption).
#[derive(Clone, Copy, PartialEq)]
pub struct Spectrum([f64; WAVELENGTH_COUNT]);

impl Spectrum {
    /// All samples zero.
    pub const ZERO: Spectrum = Spectrum([0.0; WAVELENGTH_COUNT]);

    /// Wrap an existing array.
    pub fn new(values: [f64; WAVELENGTH_COUNT]) -> Self {
        Self(values)
    }

    /// Every sample set to `value`.
    pub fn splat(value: f64) -> Self {
        Self([value; WAVELENGTH_COUNT])
    }

    /// Build a spectrum by evaluating `f` at each sample index.
    pub fn from_fn(f: impl FnMut(usize) -> f64) -> Self {
        Self(std::array::from_fn(f))
    }

    /// Apply `f` to every sample.
    pub fn map(self, mut f: impl FnMut(f64) -> f64) -> Self {
        let mut out = self.0;
        for v in &mut out {
            *v = f(*v);
        }
        Self(out)
    }

    /// Element-wise `exp(-x)`, turning optical depth into transmittance.
    pub fn transmittance(self) -> Self {
        self.map(|tau| (-tau).exp())
    }

    /// Sum of element-wise products.
    pub fn dot(&self, other: &Spectrum) -> f64 {
        self.0.iter().zip(other.0.iter()).map(|(a, b)| a * b).sum()
    }

    /// Sum of all samples.
    pub fn sum(&self) -> f64 {
        self.0.iter().sum()
    }

    /// Euclidean norm over samples.
    pub fn norm(&self) -> f64 {
        self.dot(self).sqrt()
    }

    /// Largest sample value.
    pub fn max(&self) -> f64 {
        self.0.iter().copied().fold(f64::NEG_INFINITY, f64::max)
    }

    /// Whether every sample is finite.
    pub fn is_finite(&self) -> bool {
        self.0.iter().all(|v| v.is_finite())
    }

    pub fn as_array(&self) -> &[f64; WAVELENGTH_COUNT] {
        &self.0
    }

    pub fn iter(&self) -> std::slice::Iter<'_, f64> {
        self.0.iter()
    }
}

impl Default for Spectrum {
    fn default() -> Self {
        Self::ZERO
    }
}

impl fmt::Debug for Spectrum {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.0.iter()).finish()
    }
}

impl Index<usize> for Spectrum {
    type Output = f64;

    fn index(&self, index: usize) -> &f64 {
        &self.0[index]
    }
}

impl IndexMut<usize> for Spectrum {
    fn index_mut(&mut self, index: usize) -> &mut f64 {
        &mut self.0[index]
    }
}

impl Add for Spectrum {
    type Output = Spectrum;

    fn add(mut self, rhs: Spectrum) -> Spectrum {
        self += rhs;
        self
    }
}

impl AddAssign for Spectrum {
    fn add_assign(&mut self, rhs: Spectrum) {
        for (a, b) in self.0.iter_mut().zip(rhs.0.iter()) {
            *a += b;
        }
    }
}

impl Sub for Spectrum {
    type Output = Spectrum;

    fn sub(mut self, rhs: Spectrum) -> Spectrum {
        for (a, b) in self.0.iter_mut().zip(rhs.0.iter()) {
            *a -= b;
        }
        self
    }
}

impl Mul for Spectrum {
    type Output = Spectrum;

    fn mul(mut self, rhs: Spectrum) -> Spectrum {
        for (a, b) in self.0.iter_mut().zip(rhs.0.iter()) {
            *a *= b;
        }
        self
    }
}

impl Mul<f64> for Spectrum {
    type Output = Spectrum;

    fn mul(mut self, rhs: f64) -> Spectrum {
        self *= rhs;
        self
    }
}

impl Mul<Spectrum> for f64 {
    type Output = Spectrum;

    fn mul(self, rhs: Spectrum) -> Spectrum {
        rhs * self
    }
}

impl MulAssign<f64> for Spectrum {
    fn mul_assign(&mut self, rhs: f64) {
        for a in &mut self.0 {
            *a *= rhs;
        }
    }
}

impl<'a> IntoIterator for &'a Spectrum {
    type Item = &'a f64;
    type IntoIter = std::slice::Iter<'a, f64>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}
