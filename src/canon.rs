//! Frame-level canonicalization.
//!
//! [`canonicalize()`] is the crate's entry point: it takes an immutable
//! [`Frame`] of heterogeneous cells and produces a [`CanonicalFrame`] where
//! every cell is a GTFS-compliant string. The transform is pure and holds no
//! state between calls, so independent frames can be canonicalized from
//! multiple threads without coordination.
//!
//! When the input carries a `geometry` column, point coordinates back-fill
//! missing `stop_lat` / `stop_lon` entries first, and the geometry column is
//! dropped from the output.

use crate::{
    frame::Frame,
    geometry::Coordinates,
    rules::{format_cell, rule_for},
    value::Value,
};

const GEOMETRY_COLUMN: &str = "geometry";
const STOP_LAT_COLUMN: &str = "stop_lat";
const STOP_LON_COLUMN: &str = "stop_lon";

/// A fully formatted table: same column order and row order as its source,
/// minus a dropped geometry column, every cell a string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CanonicalFrame {
    columns: Vec<(String, Vec<String>)>,
}

impl CanonicalFrame {
    pub fn headers(&self) -> Vec<&str> {
        self.columns.iter().map(|(name, _)| name.as_str()).collect()
    }

    pub fn column(&self, name: &str) -> Option<&[String]> {
        self.columns
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, cells)| cells.as_slice())
    }

    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    pub fn row_count(&self) -> usize {
        self.columns.first().map_or(0, |(_, cells)| cells.len())
    }

    /// Row-wise view, `None` when `index` is out of range.
    pub fn row(&self, index: usize) -> Option<Vec<&str>> {
        if index >= self.row_count() {
            return None;
        }
        Some(
            self.columns
                .iter()
                .map(|(_, cells)| cells[index].as_str())
                .collect(),
        )
    }

    /// Iterates all rows in order, for serialization.
    pub fn rows(&self) -> impl Iterator<Item = Vec<&str>> {
        (0..self.row_count()).filter_map(|index| self.row(index))
    }
}

/// Converts every cell of `frame` to its canonical GTFS string form,
/// selecting one rule per column by name.
pub fn canonicalize(frame: &Frame) -> CanonicalFrame {
    let overrides = coordinate_overrides(frame);
    let columns = frame
        .columns()
        .iter()
        .filter(|column| column.name() != GEOMETRY_COLUMN)
        .map(|column| {
            let rule = rule_for(column.name());
            let filled = overrides.for_column(column.name());
            let cells = column
                .cells()
                .iter()
                .enumerate()
                .map(|(row, cell)| match filled.and_then(|f| f[row].as_ref()) {
                    Some(value) => format_cell(rule, Some(value)),
                    None => format_cell(rule, cell.as_ref()),
                })
                .collect();
            (column.name().to_string(), cells)
        })
        .collect();
    CanonicalFrame { columns }
}

#[derive(Default)]
struct CoordinateOverrides {
    lat: Option<Vec<Option<Value>>>,
    lon: Option<Vec<Option<Value>>>,
}

impl CoordinateOverrides {
    fn for_column(&self, name: &str) -> Option<&Vec<Option<Value>>> {
        match name {
            STOP_LAT_COLUMN => self.lat.as_ref(),
            STOP_LON_COLUMN => self.lon.as_ref(),
            _ => None,
        }
    }
}

/// Decomposes a geometry column into latitude/longitude fills. Only rows
/// whose stop_lat / stop_lon cells are missing receive a value; existing
/// entries win. Requires both coordinate columns to be present, matching
/// the loader contract for stop tables.
fn coordinate_overrides(frame: &Frame) -> CoordinateOverrides {
    let Some(geometry) = frame.column(GEOMETRY_COLUMN) else {
        return CoordinateOverrides::default();
    };
    let (Some(lat_column), Some(lon_column)) =
        (frame.column(STOP_LAT_COLUMN), frame.column(STOP_LON_COLUMN))
    else {
        return CoordinateOverrides::default();
    };

    let fill = |existing: &[Option<Value>], pick: fn(&Value) -> Option<f64>| {
        existing
            .iter()
            .zip(geometry.cells())
            .map(|(cell, geom)| {
                let missing = cell.as_ref().is_none_or(Value::is_missing);
                if !missing {
                    return None;
                }
                geom.as_ref().and_then(pick).map(Value::Float)
            })
            .collect()
    };

    CoordinateOverrides {
        lat: Some(fill(lat_column.cells(), |v| match v {
            Value::Point(p) => p.vertical(),
            _ => None,
        })),
        lon: Some(fill(lon_column.cells(), |v| match v {
            Value::Point(p) => p.horizontal(),
            _ => None,
        })),
    }
}
