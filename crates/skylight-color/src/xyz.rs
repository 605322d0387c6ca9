//! Spectrum to CIE XYZ tristimulus conversion.

use std::path::Path;

use skylight_spectrum::{LookupTable, Spectrum, TableError, WAVELENGTH_STEP_M};

/// Maximum luminous efficacy in lm/W.
pub const LUMINOUS_EFFICACY: f64 = 683.0;

/// CIE XYZ tristimulus values.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Xyz {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Xyz {
    pub fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    /// Scale all three components.
    pub fn scaled(self, factor: f64) -> Self {
        Self::new(self.x * factor, self.y * factor, self.z * factor)
    }
}

/// The three color-matching functions sampled on the wavelength grid.
#[derive(Clone, Debug, PartialEq)]
pub struct ColorMatching {
    pub x_bar: Spectrum,
    pub y_bar: Spectrum,
    pub z_bar: Spectrum,
}

impl ColorMatching {
    /// Use the first three value columns of `table` as x̄, ȳ, z̄.
    ///
    /// # Panics
    ///
    /// Panics if the table has fewer than three value columns.
    pub fn from_table(table: &LookupTable) -> Self {
        Self {
            x_bar: table.column(0),
            y_bar: table.column(1),
            z_bar: table.column(2),
        }
    }

    /// The bundled CIE 1931 2° observer.
    pub fn cie_1931() -> Self {
        Self::from_table(&LookupTable::builtin_cmf())
    }

    /// Load a color-matching table from a text file.
    pub fn load(path: &Path) -> Result<Self, TableError> {
        Ok(Self::from_table(&LookupTable::load(path, 3)?))
    }

    /// Integrate `spectrum` against the matching functions.
    ///
    /// Each channel is `Σ spectrum[k] · cmf[k] · Δλ · 683`, with Δλ in meters.
    pub fn spectrum_to_xyz(&self, spectrum: &Spectrum) -> Xyz {
        let scale = WAVELENGTH_STEP_M * LUMINOUS_EFFICACY;
        Xyz::new(
            spectrum.dot(&self.x_bar) * scale,
            spectrum.dot(&self.y_bar) * scale,
            spectrum.dot(&self.z_bar) * scale,
        )
    }
}
