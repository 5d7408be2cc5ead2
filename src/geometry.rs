//! Coordinate capability for geometry-bearing tables.
//!
//! GTFS stores latitude and longitude as separate flat-file columns, while
//! spatial loaders usually hand over a single point-geometry column. The
//! [`Coordinates`] trait is the seam between the two: anything that can name
//! a horizontal and a vertical coordinate can back-fill `stop_lat` /
//! `stop_lon` during canonicalization.

use serde::{Deserialize, Serialize};

/// Exposes a point's axes. Horizontal is east-west (longitude / x),
/// vertical is north-south (latitude / y). Non-finite coordinates are
/// reported as `None` so they never fill a missing cell.
pub trait Coordinates {
    fn horizontal(&self) -> Option<f64>;
    fn vertical(&self) -> Option<f64>;
}

/// A plain 2-D point in (x, y) = (lon, lat) axis order.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

impl Coordinates for Point {
    fn horizontal(&self) -> Option<f64> {
        self.x.is_finite().then_some(self.x)
    }

    fn vertical(&self) -> Option<f64> {
        self.y.is_finite().then_some(self.y)
    }
}
