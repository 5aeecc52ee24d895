//! Row/column size definitions.
//!
//! Grammar (surrounding whitespace ignored):
//!
//! ```text
//! auto...      -> Auto   (case-insensitive prefix)
//! <number>*    -> Stars  (empty number means weight 1, nothing may follow)
//! <number>     -> Pixels
//! ```
//!
//! Unparsable, negative or non-finite numbers are rejected.

use std::str::FromStr;

use crate::error::DimensionError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnitKind {
    /// Fixed length.
    Pixels,
    /// Share of the space left after pixel and auto tracks.
    Stars,
    /// Sized to the content of the track.
    Auto,
}

/// One parsed row or column.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DimensionDefinition {
    kind: UnitKind,
    value: f32,
    resolved: f32,
}

impl DimensionDefinition {
    pub fn pixels(length: f32) -> Self {
        Self {
            kind: UnitKind::Pixels,
            value: length,
            resolved: length,
        }
    }

    pub fn stars(weight: f32) -> Self {
        Self {
            kind: UnitKind::Stars,
            value: weight,
            resolved: 0.0,
        }
    }

    pub fn auto() -> Self {
        Self {
            kind: UnitKind::Auto,
            value: 0.0,
            resolved: 0.0,
        }
    }

    pub fn parse(spec: &str) -> Result<Self, DimensionError> {
        let trimmed = spec.trim();

        if trimmed
            .get(..4)
            .is_some_and(|prefix| prefix.eq_ignore_ascii_case("auto"))
        {
            return Ok(Self::auto());
        }

        if let Some((weight, rest)) = trimmed.split_once('*') {
            if !rest.trim().is_empty() {
                return Err(DimensionError::InvalidWeight(spec.to_string()));
            }
            let weight = weight.trim();
            if weight.is_empty() {
                return Ok(Self::stars(1.0));
            }
            let value = weight
                .parse::<f32>()
                .map_err(|_| DimensionError::InvalidWeight(spec.to_string()))?;
            return Ok(Self::stars(check_range(value, spec)?));
        }

        let length = trimmed
            .parse::<f32>()
            .map_err(|_| DimensionError::InvalidLength(spec.to_string()))?;
        Ok(Self::pixels(check_range(length, spec)?))
    }

    pub fn kind(&self) -> UnitKind {
        self.kind
    }

    /// Weight for stars, length for pixels, 0 for auto.
    pub fn value(&self) -> f32 {
        self.value
    }

    /// Absolute length after sizing.
    pub fn resolved_pixels(&self) -> f32 {
        self.resolved
    }

    pub(crate) fn resolve(&mut self, pixels: f32) {
        self.resolved = pixels;
    }
}

fn check_range(value: f32, spec: &str) -> Result<f32, DimensionError> {
    if value.is_finite() && value >= 0.0 {
        Ok(value)
    } else {
        Err(DimensionError::OutOfRange(spec.to_string()))
    }
}

impl FromStr for DimensionDefinition {
    type Err = DimensionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}
