//! The cell body.

use serde::{Deserialize, Serialize};

use crate::error::MorphologyError;
use crate::types::Point;

/// Cell body, modelled as a sphere; radial distances are measured from its centre.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Soma {
    center: [f64; 3],
    radius: f64,
    /// Contour samples, when the reader provided them.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    outline: Vec<Point>,
}

impl Soma {
    pub fn new(center: [f64; 3], radius: f64) -> Result<Self, MorphologyError> {
        let soma = Self { center, radius, outline: Vec::new() };
        soma.validate()?;
        Ok(soma)
    }

    /// Soma from contour samples.
    ///
    /// The centre is the mean of the samples. With a single sample its own
    /// radius is used; otherwise the radius is the mean distance from the
    /// centre to the samples.
    pub fn from_outline(outline: Vec<Point>) -> Result<Self, MorphologyError> {
        let n = outline.len();
        if n == 0 {
            return Err(MorphologyError::EmptyOutline);
        }
        let inv_n = 1.0 / n as f64;
        let mut center = [0.0; 3];
        for p in &outline {
            center[0] += p.x * inv_n;
            center[1] += p.y * inv_n;
            center[2] += p.z * inv_n;
        }
        let radius = if n == 1 {
            outline[0].radius
        } else {
            outline
                .iter()
                .map(|p| {
                    let dx = p.x - center[0];
                    let dy = p.y - center[1];
                    let dz = p.z - center[2];
                    (dx * dx + dy * dy + dz * dz).sqrt()
                })
                .sum::<f64>()
                * inv_n
        };
        let soma = Self { center, radius, outline };
        soma.validate()?;
        Ok(soma)
    }

    pub fn center(&self) -> [f64; 3] {
        self.center
    }

    pub fn radius(&self) -> f64 {
        self.radius
    }

    pub fn outline(&self) -> &[Point] {
        &self.outline
    }

    /// Surface of the equivalent sphere, $4 \pi r^2$.
    pub fn surface_area(&self) -> f64 {
        4.0 * std::f64::consts::PI * self.radius * self.radius
    }

    /// A copy with the centre and outline passed through `f`.
    pub fn map_points<F>(&self, mut f: F) -> Soma
    where
        F: FnMut(&Point) -> Point,
    {
        let c = f(&Point::new(self.center[0], self.center[1], self.center[2], self.radius));
        Soma {
            center: c.xyz(),
            radius: self.radius,
            outline: self.outline.iter().map(&mut f).collect(),
        }
    }

    pub(crate) fn validate(&self) -> Result<(), MorphologyError> {
        if !self.center.iter().all(|c| c.is_finite()) {
            return Err(MorphologyError::InvalidSoma("centre is not finite".into()));
        }
        if !self.radius.is_finite() || self.radius < 0.0 {
            return Err(MorphologyError::InvalidSoma(format!(
                "radius {} must be finite and non-negative",
                self.radius
            )));
        }
        if let Some(i) = self.outline.iter().position(|p| !p.is_valid()) {
            return Err(MorphologyError::InvalidSoma(format!("outline point {} is invalid", i)));
        }
        Ok(())
    }
}

impl Default for Soma {
    fn default() -> Self {
        Self { center: [0.0; 3], radius: 0.0, outline: Vec::new() }
    }
}
