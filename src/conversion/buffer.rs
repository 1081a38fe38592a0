use serde::Serialize;

use crate::engine::MAX_VERTICES;
use crate::errors::{ConversionError, GraphError, GraphResult};
use crate::fault_injection::{self, FaultPoint};
use crate::value::AttrValue;

/// Integer buffer. Only `Int` values are accepted; floats are never truncated.
pub fn int_buffer(values: &[AttrValue]) -> Result<Vec<i64>, ConversionError> {
    values
        .iter()
        .enumerate()
        .map(|(index, value)| match value {
            AttrValue::Int(i) => Ok(*i),
            other => Err(ConversionError::WrongType {
                expected: "int",
                found: other.type_name(),
                index,
            }),
        })
        .collect()
}

/// Index buffer: integers that must also be non-negative.
pub fn index_buffer(values: &[AttrValue]) -> Result<Vec<usize>, ConversionError> {
    int_buffer(values)?
        .into_iter()
        .enumerate()
        .map(|(index, value)| {
            usize::try_from(value).map_err(|_| ConversionError::NegativeIndex { value, index })
        })
        .collect()
}

pub fn float_buffer(values: &[AttrValue]) -> Result<Vec<f64>, ConversionError> {
    values
        .iter()
        .enumerate()
        .map(|(index, value)| {
            value.as_float().ok_or(ConversionError::WrongType {
                expected: "number",
                found: value.type_name(),
                index,
            })
        })
        .collect()
}

pub fn ints_to_values(values: &[i64]) -> Vec<AttrValue> {
    values.iter().map(|&v| AttrValue::Int(v)).collect()
}

pub fn floats_to_values(values: &[f64]) -> Vec<AttrValue> {
    values.iter().map(|&v| AttrValue::Float(v)).collect()
}

/// Host-side count argument; negative counts never reach the engine.
pub fn count_arg(value: i64, what: &str) -> GraphResult<usize> {
    usize::try_from(value)
        .map_err(|_| GraphError::validation(format!("{what} must be non-negative, got {value}")))
}

/// Vertex count argument, bounded by [`MAX_VERTICES`].
pub fn vertex_count_arg(value: i64) -> GraphResult<usize> {
    let count = count_arg(value, "vertex count")?;
    check_vertex_bound(count)?;
    Ok(count)
}

pub(crate) fn check_vertex_bound(count: usize) -> GraphResult<()> {
    if count > MAX_VERTICES {
        return Err(GraphError::validation(format!(
            "vertex count {count} exceeds the limit of {MAX_VERTICES}"
        )));
    }
    Ok(())
}

/// Reserves a scratch buffer for one engine call.
pub(crate) fn scratch<T>(len: usize) -> GraphResult<Vec<T>> {
    fault_injection::check_fault(FaultPoint::HostAllocate)
        .map_err(|failure| GraphError::memory(failure.message))?;
    let mut buffer = Vec::new();
    buffer
        .try_reserve_exact(len)
        .map_err(|e| GraphError::memory(e.to_string()))?;
    Ok(buffer)
}

/// Row-major matrix with explicit dimensions.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Matrix<T> {
    rows: usize,
    cols: usize,
    data: Vec<T>,
}

impl<T> Matrix<T> {
    pub(crate) fn from_parts(rows: usize, cols: usize, data: Vec<T>) -> Self {
        debug_assert_eq!(rows * cols, data.len());
        Self { rows, cols, data }
    }

    /// Every row must have the length of the first.
    pub fn from_rows(rows: Vec<Vec<T>>) -> Result<Self, ConversionError> {
        let cols = rows.first().map_or(0, Vec::len);
        let row_count = rows.len();
        let mut data = Vec::with_capacity(row_count * cols);
        for (row, values) in rows.into_iter().enumerate() {
            if values.len() != cols {
                return Err(ConversionError::RaggedMatrix {
                    row,
                    expected: cols,
                    found: values.len(),
                });
            }
            data.extend(values);
        }
        Ok(Self {
            rows: row_count,
            cols,
            data,
        })
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn is_square(&self) -> bool {
        self.rows == self.cols
    }

    pub fn data(&self) -> &[T] {
        &self.data
    }

    pub fn get(&self, row: usize, col: usize) -> Option<&T> {
        if row < self.rows && col < self.cols {
            self.data.get(row * self.cols + col)
        } else {
            None
        }
    }

    pub fn row(&self, row: usize) -> Option<&[T]> {
        (row < self.rows).then(|| &self.data[row * self.cols..(row + 1) * self.cols])
    }
}

impl<T: Clone> Matrix<T> {
    pub fn to_rows(&self) -> Vec<Vec<T>> {
        if self.cols == 0 {
            return vec![Vec::new(); self.rows];
        }
        self.data.chunks(self.cols).map(<[T]>::to_vec).collect()
    }
}

fn matrix_from_host<T>(
    value: &AttrValue,
    convert: fn(&[AttrValue]) -> Result<Vec<T>, ConversionError>,
) -> Result<Matrix<T>, ConversionError> {
    let rows = value.as_list().ok_or_else(|| {
        ConversionError::TypeMismatch(format!(
            "expected a list of rows, found {}",
            value.type_name()
        ))
    })?;
    let rows = rows
        .iter()
        .map(|row| match row {
            AttrValue::List(items) => convert(items),
            other => Err(ConversionError::TypeMismatch(format!(
                "matrix row must be a list, found {}",
                other.type_name()
            ))),
        })
        .collect::<Result<Vec<_>, _>>()?;
    Matrix::from_rows(rows)
}

impl Matrix<f64> {
    pub fn from_host(value: &AttrValue) -> Result<Self, ConversionError> {
        matrix_from_host(value, float_buffer)
    }

    pub fn to_host(&self) -> AttrValue {
        AttrValue::List(
            self.to_rows()
                .into_iter()
                .map(|row| AttrValue::List(floats_to_values(&row)))
                .collect(),
        )
    }
}

impl Matrix<i64> {
    pub fn from_host(value: &AttrValue) -> Result<Self, ConversionError> {
        matrix_from_host(value, int_buffer)
    }

    pub fn to_host(&self) -> AttrValue {
        AttrValue::List(
            self.to_rows()
                .into_iter()
                .map(|row| AttrValue::List(ints_to_values(&row)))
                .collect(),
        )
    }
}

/// Ordered list of `(source, target)` vertex pairs.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct EdgeList {
    pairs: Vec<(usize, usize)>,
}

impl EdgeList {
    pub fn new(pairs: Vec<(usize, usize)>) -> Self {
        Self { pairs }
    }

    /// Pairs a flat endpoint list: `[a, b, c, d]` becomes `(a, b), (c, d)`.
    pub fn from_flat(flat: &[i64]) -> Result<Self, ConversionError> {
        if flat.len() % 2 != 0 {
            return Err(ConversionError::OddPairList { len: flat.len() });
        }
        let mut pairs = Vec::with_capacity(flat.len() / 2);
        for (i, chunk) in flat.chunks_exact(2).enumerate() {
            let endpoint = |offset: usize| {
                usize::try_from(chunk[offset]).map_err(|_| ConversionError::NegativeIndex {
                    value: chunk[offset],
                    index: i * 2 + offset,
                })
            };
            pairs.push((endpoint(0)?, endpoint(1)?));
        }
        Ok(Self { pairs })
    }

    /// Accepts a list of two-element lists or a flat list of integers.
    pub fn from_host(value: &AttrValue) -> Result<Self, ConversionError> {
        let items = value.as_list().ok_or_else(|| {
            ConversionError::TypeMismatch(format!(
                "expected a list of edges, found {}",
                value.type_name()
            ))
        })?;
        if items.iter().all(|item| matches!(item, AttrValue::Int(_))) {
            return Self::from_flat(&int_buffer(items)?);
        }
        let mut flat = Vec::with_capacity(items.len() * 2);
        for (index, item) in items.iter().enumerate() {
            match item {
                AttrValue::List(pair) if pair.len() == 2 => flat.extend(int_buffer(pair)?),
                other => {
                    return Err(ConversionError::WrongType {
                        expected: "pair of vertex ids",
                        found: other.type_name(),
                        index,
                    });
                }
            }
        }
        Self::from_flat(&flat)
    }

    pub fn pairs(&self) -> &[(usize, usize)] {
        &self.pairs
    }

    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    pub fn max_vertex(&self) -> Option<usize> {
        self.pairs.iter().map(|&(a, b)| a.max(b)).max()
    }

    /// Flat native buffer.
    pub fn to_flat(&self) -> GraphResult<Vec<usize>> {
        let mut flat = scratch(self.pairs.len() * 2)?;
        for &(a, b) in &self.pairs {
            flat.push(a);
            flat.push(b);
        }
        Ok(flat)
    }

    pub fn to_host(&self) -> AttrValue {
        AttrValue::List(
            self.pairs
                .iter()
                .map(|&(a, b)| AttrValue::List(vec![AttrValue::Int(a as i64), AttrValue::Int(b as i64)]))
                .collect(),
        )
    }

    pub fn into_pairs(self) -> Vec<(usize, usize)> {
        self.pairs
    }
}

impl From<Vec<(usize, usize)>> for EdgeList {
    fn from(pairs: Vec<(usize, usize)>) -> Self {
        Self { pairs }
    }
}

impl From<&[(usize, usize)]> for EdgeList {
    fn from(pairs: &[(usize, usize)]) -> Self {
        Self {
            pairs: pairs.to_vec(),
        }
    }
}

impl<const N: usize> From<[(usize, usize); N]> for EdgeList {
    fn from(pairs: [(usize, usize); N]) -> Self {
        Self {
            pairs: pairs.to_vec(),
        }
    }
}
