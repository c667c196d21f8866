//! The polygon editing model.
//!
//! A polygon is stored as one flat coordinate sequence `x0, y0, x1, y1, …` in
//! the order a closed path visits its vertices. A vertex is addressed by its
//! *offset*: the position of its x-coordinate in that sequence (0, 2, 4, …).
//!
//! Offsets are positional. Inserting or removing a vertex shifts the offsets of
//! every vertex after it, so an offset handed out by any function here is only
//! meaningful until the next structural mutation. Per-vertex handles kept by a
//! rendering layer must be rebuilt after every insert/remove.
//!
//! The free functions operate directly on a `Vec<f64>`/`&[f64]` owned by the
//! caller; [`Polygon`] wraps the same operations around a sequence whose even
//! length it guarantees.

mod codec;

pub use codec::*;

use std::fmt::{self, Display};

use itertools::Itertools;
use log::debug;
use ordered_float::OrderedFloat;
use serde::{Deserialize, Serialize};
use tsify::declare;

use crate::{
    error::{EditError, Result},
    geometry::{distance::squared_distance_to_segment, r2::R2},
};

/// Flat coordinate sequence, as exchanged with JS hosts.
#[declare]
pub type Points = Vec<f64>;

/// Check that `index` is the offset of a vertex in `points`.
pub fn check_index(points: &[f64], index: usize) -> Result<()> {
    if index % 2 != 0 || index + 1 >= points.len() {
        return Err(EditError::InvalidIndex { index, len: points.len() });
    }
    Ok(())
}

/// Vertices of `points`, in polygon order. A trailing unpaired entry is ignored.
pub fn vertices(points: &[f64]) -> impl Iterator<Item = R2<f64>> + '_ {
    points.iter().copied().tuples::<(f64, f64)>().map(R2::from)
}

/// Edges of the closed path through `points`, as `(start offset, start, end)`.
///
/// The last edge wraps from the last vertex back to the first. A single vertex
/// yields one zero-length edge; an empty sequence yields none.
pub fn edges(points: &[f64]) -> impl Iterator<Item = (usize, R2<f64>, R2<f64>)> + '_ {
    let n = points.len() / 2;
    (0..n).map(move |k| {
        let i = 2 * k;
        let j = 2 * ((k + 1) % n);
        (i, R2::new(points[i], points[i + 1]), R2::new(points[j], points[j + 1]))
    })
}

/// Offset of the start of the edge nearest to `(x, y)`.
///
/// Every edge (including the wrap-around edge) is measured once with
/// [`squared_distance_to_segment`], in increasing offset order; on ties the
/// first edge wins. With fewer than two vertices there is no real edge and the
/// result is `0`.
pub fn find_nearest_edge_start(points: &[f64], x: f64, y: f64) -> usize {
    if points.len() < 4 {
        return 0;
    }
    let p = R2::new(x, y);
    edges(points)
        .map(|(i, v, w)| (i, squared_distance_to_segment(&p, &v, &w)))
        // `min_by_key` keeps the first of equal minima
        .min_by_key(|(_, d)| OrderedFloat(*d))
        .map(|(i, _)| i)
        .unwrap_or(0)
}

/// Insert a vertex at `(x, y)`, returning the offset it was inserted at.
///
/// With two or more vertices the new one goes right after the start of the
/// nearest edge, splitting that edge. Otherwise it is appended.
pub fn insert_vertex(points: &mut Vec<f64>, x: f64, y: f64) -> usize {
    let index = if points.len() > 2 {
        find_nearest_edge_start(points, x, y) + 2
    } else {
        points.len()
    };
    points.splice(index..index, [x, y]);
    debug!("inserted ({}, {}) at offset {} (len {})", x, y, index, points.len());
    index
}

/// Remove the vertex at offset `index`.
pub fn remove_vertex(points: &mut Vec<f64>, index: usize) -> Result<()> {
    check_index(points, index)?;
    points.drain(index..index + 2);
    debug!("removed vertex at offset {} (len {})", index, points.len());
    Ok(())
}

/// Overwrite the vertex at offset `index` with `(x, y)`.
pub fn move_vertex(points: &mut [f64], index: usize, x: f64, y: f64) -> Result<()> {
    check_index(points, index)?;
    points[index] = x;
    points[index + 1] = y;
    Ok(())
}

/// Reset to the empty sequence.
pub fn clear(points: &mut Vec<f64>) {
    points.clear();
}

/// An editable closed polygon over a flat coordinate sequence.
///
/// The sequence always has even length. Its contents can be changed in place
/// through [`Polygon::points_mut`], but its length only through the editing
/// operations.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Vec<f64>", into = "Vec<f64>")]
pub struct Polygon {
    points: Vec<f64>,
}

impl TryFrom<Vec<f64>> for Polygon {
    type Error = EditError;
    fn try_from(points: Vec<f64>) -> Result<Self> {
        if points.len() % 2 != 0 {
            return Err(EditError::Parse(format!(
                "odd number of coordinates ({})",
                points.len()
            )));
        }
        Ok(Polygon { points })
    }
}

impl From<Polygon> for Vec<f64> {
    fn from(polygon: Polygon) -> Self {
        polygon.points
    }
}

impl FromIterator<R2<f64>> for Polygon {
    fn from_iter<I: IntoIterator<Item = R2<f64>>>(iter: I) -> Self {
        let points = iter.into_iter().flat_map(|p| [p.x, p.y]).collect();
        Polygon { points }
    }
}

impl Polygon {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn points(&self) -> &[f64] {
        &self.points
    }

    /// Mutable view of the coordinates; the length cannot change through it.
    pub fn points_mut(&mut self) -> &mut [f64] {
        &mut self.points
    }

    /// Length of the flat sequence (twice the vertex count).
    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn num_vertices(&self) -> usize {
        self.points.len() / 2
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn vertex(&self, index: usize) -> Result<R2<f64>> {
        check_index(&self.points, index)?;
        Ok(R2::new(self.points[index], self.points[index + 1]))
    }

    pub fn vertices(&self) -> impl Iterator<Item = R2<f64>> + '_ {
        vertices(&self.points)
    }

    /// Offsets of all vertices; what a rendering layer keys its handles by.
    pub fn offsets(&self) -> impl Iterator<Item = usize> {
        (0..self.points.len()).step_by(2)
    }

    pub fn edges(&self) -> impl Iterator<Item = (usize, R2<f64>, R2<f64>)> + '_ {
        edges(&self.points)
    }

    pub fn nearest_edge_start(&self, x: f64, y: f64) -> usize {
        find_nearest_edge_start(&self.points, x, y)
    }

    pub fn insert_vertex(&mut self, x: f64, y: f64) -> usize {
        insert_vertex(&mut self.points, x, y)
    }

    pub fn remove_vertex(&mut self, index: usize) -> Result<()> {
        remove_vertex(&mut self.points, index)
    }

    pub fn move_vertex(&mut self, index: usize, x: f64, y: f64) -> Result<()> {
        move_vertex(&mut self.points, index, x, y)
    }

    pub fn serialize(&self) -> String {
        serialize(&self.points)
    }

    /// Replace all points with those parsed from `text`.
    ///
    /// On error the polygon is left as it was.
    pub fn restore(&mut self, text: &str) -> Result<()> {
        let points = deserialize(text)?;
        debug!("restored {} vertices", points.len() / 2);
        self.points = points;
        Ok(())
    }

    pub fn clear(&mut self) {
        clear(&mut self.points)
    }
}

impl Display for Polygon {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let verts: Vec<String> = self
            .vertices()
            .map(|v| format!("({:.3}, {:.3})", v.x, v.y))
            .collect();
        write!(f, "Polygon[{}]", verts.join(", "))
    }
}

#[cfg(test)]
mod tests;
