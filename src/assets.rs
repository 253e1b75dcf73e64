//! Codec boundary: decoded images come in, pixel matrices come out.
//!
//! All byte-level format parsing is the `image` crate's problem.

use std::path::Path;

use anyhow::{Context, Result};

use crate::raster::{Matrix, Pixel};

/// Decode an image file into an owned RGBA matrix.
pub fn decode(path: &Path) -> Result<Matrix<Pixel>> {
    let decoded = image::open(path)
        .with_context(|| format!("decoding {}", path.display()))?
        .to_rgba8();
    let (width, height) = decoded.dimensions();
    let pixels = decoded
        .pixels()
        .map(|p| Pixel::rgba(p.0[0], p.0[1], p.0[2], p.0[3]))
        .collect();
    Matrix::from_raw(width, height, pixels).context("decoded image dimensions disagree with data")
}
