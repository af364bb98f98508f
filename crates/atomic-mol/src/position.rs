//! Cartesian positions
//!
//! Positions are `lin_alg` double-precision vectors. Addition, subtraction,
//! scaling, `dot`, `cross` and `to_normalized` come from `lin_alg`; this module
//! adds the distance helpers the viewer's measurement tools need.
//!
//! Equality is exact component-wise comparison. Compare parsed coordinates
//! with [`approx_eq`] instead of `==` after any floating-point round trip.

pub use lin_alg::f64::Vec3 as Position;

/// Euclidean distance between two points
#[inline]
pub fn distance(a: Position, b: Position) -> f64 {
    (a - b).magnitude()
}

/// Component-wise comparison within an absolute tolerance
#[inline]
pub fn approx_eq(a: Position, b: Position, tolerance: f64) -> bool {
    (a.x - b.x).abs() <= tolerance && (a.y - b.y).abs() <= tolerance && (a.z - b.z).abs() <= tolerance
}
