//! # Aspect-Preserving Dimension Scaling
//!
//! Computes target dimensions for an image that must fit a maximum width or
//! height. Only the arithmetic lives here; resampling is done by the caller.
//! Results may be fractional and are rounded by whoever resamples.

use serde::Deserialize;

use crate::error::{Result, RojoError};

/// Image dimensions in dots
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct Dimensions {
    pub width: f64,
    pub height: f64,
}

impl Dimensions {
    pub const fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    /// Parse `{"width": .., "height": ..}`. A missing or non-positive field
    /// is malformed input.
    pub fn from_json(json: &str) -> Result<Self> {
        let dims: Self = serde_json::from_str(json)
            .map_err(|e| RojoError::MalformedInput(format!("dimensions: {}", e)))?;
        dims.validate()?;
        Ok(dims)
    }

    /// Round to whole pixels, never below 1x1.
    pub fn to_pixels(self) -> (u32, u32) {
        let round = |v: f64| v.round().clamp(1.0, u32::MAX as f64) as u32;
        (round(self.width), round(self.height))
    }

    fn validate(&self) -> Result<()> {
        if self.width.is_finite() && self.height.is_finite() && self.width > 0.0 && self.height > 0.0
        {
            Ok(())
        } else {
            Err(RojoError::MalformedInput(format!(
                "dimensions must be positive, got {}x{}",
                self.width, self.height
            )))
        }
    }
}

fn validate_target(target: f64, axis: &str) -> Result<()> {
    if target.is_finite() && target >= 0.0 {
        Ok(())
    } else {
        Err(RojoError::MalformedInput(format!("invalid target {}: {}", axis, target)))
    }
}

/// Scale so the width becomes `width`, keeping the aspect ratio.
///
/// ```
/// use rojo::render::scale::{Dimensions, scale_to_width};
///
/// let scaled = scale_to_width(Dimensions::new(100.0, 50.0), 40.0).unwrap();
/// assert_eq!(scaled, Dimensions::new(40.0, 20.0));
/// ```
pub fn scale_to_width(original: Dimensions, width: f64) -> Result<Dimensions> {
    original.validate()?;
    validate_target(width, "width")?;
    Ok(Dimensions {
        width,
        height: original.height * (width / original.width),
    })
}

/// Scale so the height becomes `height`, keeping the aspect ratio.
pub fn scale_to_height(original: Dimensions, height: f64) -> Result<Dimensions> {
    original.validate()?;
    validate_target(height, "height")?;
    Ok(Dimensions {
        width: original.width * (height / original.height),
        height,
    })
}
