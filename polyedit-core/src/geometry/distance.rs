//! Point and point-to-segment distances.
//!
//! Everything here is pure and generic over the float type. Comparisons inside
//! the editor only ever need an ordering, so the squared forms are the primary
//! API and [`distance_to_segment`] is a convenience on top.

use num_traits::Float;

use super::r2::R2;

/// Squared Euclidean distance between two points.
pub fn squared_distance<D: Float>(a: &R2<D>, b: &R2<D>) -> D {
    (*a - *b).norm2()
}

/// Parameter `t` of the point on segment `v-w` closest to `p`, clamped to `[0, 1]`.
///
/// A zero-length segment has no direction to project onto; it yields `0`, i.e. `v`.
pub fn segment_projection<D: Float>(p: &R2<D>, v: &R2<D>, w: &R2<D>) -> D {
    let l2 = squared_distance(v, w);
    if l2 == D::zero() {
        return D::zero();
    }
    let t = (*p - *v).dot(&(*w - *v)) / l2;
    t.min(D::one()).max(D::zero())
}

/// Point on segment `v-w` closest to `p`.
pub fn closest_point_on_segment<D: Float>(p: &R2<D>, v: &R2<D>, w: &R2<D>) -> R2<D> {
    let t = segment_projection(p, v, w);
    *v + (*w - *v) * t
}

/// Squared distance from `p` to the segment `v-w`.
///
/// Collapses to [`squared_distance`]`(p, v)` when `v == w`.
pub fn squared_distance_to_segment<D: Float>(p: &R2<D>, v: &R2<D>, w: &R2<D>) -> D {
    if squared_distance(v, w) == D::zero() {
        return squared_distance(p, v);
    }
    squared_distance(p, &closest_point_on_segment(p, v, w))
}

/// Distance from `p` to the segment `v-w`.
pub fn distance_to_segment<D: Float>(p: &R2<D>, v: &R2<D>, w: &R2<D>) -> D {
    squared_distance_to_segment(p, v, w).sqrt()
}
