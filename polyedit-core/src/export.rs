//! Exporting points in image pixel coordinates.
//!
//! Editor coordinates are relative to the centre of the displayed image;
//! exported points are relative to its top-left corner and rounded to whole
//! pixels.

use itertools::Itertools;
use num_traits::ToPrimitive;

/// Shift every coordinate by half the image size on its axis and round half up.
///
/// A coordinate with no pixel value (NaN, infinite, or outside the `i64`
/// range) exports as `None`, which serializes as JSON `null`.
pub fn export_points(points: &[f64], image_width: f64, image_height: f64) -> Vec<Option<i64>> {
    let offset = [image_width / 2., image_height / 2.];
    points
        .iter()
        .enumerate()
        .map(|(i, v)| (v + offset[i % 2] + 0.5).floor().to_i64())
        .collect()
}

/// `[x, y]` pairs of the exported points, for consumers that want structure.
pub fn export_pairs(points: &[f64], image_width: f64, image_height: f64) -> Vec<[Option<i64>; 2]> {
    export_points(points, image_width, image_height)
        .into_iter()
        .tuples()
        .map(|(x, y)| [x, y])
        .collect()
}
