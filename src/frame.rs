//! Column-major table of raw cells.
//!
//! A [`Frame`] is the canonicalizer's input: an ordered list of named
//! columns whose cells are `Option<Value>`. Construction validates the
//! structure once (unique names, equal lengths); after that the frame is
//! immutable and every per-cell problem downstream resolves to a fallback
//! string rather than an error.

use itertools::Itertools;
use thiserror::Error;

use crate::value::Value;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum FrameError {
    #[error("Duplicate column name '{0}'")]
    DuplicateColumn(String),
    #[error("Column '{column}' has {actual} row(s), expected {expected}")]
    RaggedColumn {
        column: String,
        expected: usize,
        actual: usize,
    },
}

#[derive(Debug, Clone, PartialEq)]
pub struct Column {
    name: String,
    cells: Vec<Option<Value>>,
}

impl Column {
    pub fn new(name: impl Into<String>, cells: Vec<Option<Value>>) -> Self {
        Self {
            name: name.into(),
            cells,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn cells(&self) -> &[Option<Value>] {
        &self.cells
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Frame {
    columns: Vec<Column>,
}

impl Frame {
    pub fn new(columns: Vec<Column>) -> Result<Self, FrameError> {
        if let Some(name) = columns
            .iter()
            .map(Column::name)
            .duplicates()
            .next()
        {
            return Err(FrameError::DuplicateColumn(name.to_string()));
        }
        let expected = columns.first().map_or(0, Column::len);
        for column in &columns {
            if column.len() != expected {
                return Err(FrameError::RaggedColumn {
                    column: column.name().to_string(),
                    expected,
                    actual: column.len(),
                });
            }
        }
        Ok(Self { columns })
    }

    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    pub fn column(&self, name: &str) -> Option<&Column> {
        self.columns.iter().find(|c| c.name() == name)
    }

    pub fn has_column(&self, name: &str) -> bool {
        self.column(name).is_some()
    }

    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    pub fn row_count(&self) -> usize {
        self.columns.first().map_or(0, Column::len)
    }
}
