use crate::errors::{ConversionError, GraphError, GraphResult};
use crate::value::AttrValue;

/// Vertex or edge selection as the host passed it.
///
/// A `Single` selection makes queries answer with a scalar; `Many` always
/// answers with a list, even when it holds one index.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum Selector {
    #[default]
    All,
    Single(usize),
    Many(Vec<usize>),
}

impl Selector {
    /// `Null` selects everything, an integer one element, a list of integers many.
    pub fn from_host(value: &AttrValue) -> Result<Self, ConversionError> {
        match value {
            AttrValue::Null => Ok(Selector::All),
            AttrValue::Int(i) => Ok(Selector::Single(non_negative(*i, 0)?)),
            AttrValue::List(items) => items
                .iter()
                .enumerate()
                .map(|(index, item)| match item {
                    AttrValue::Int(i) => non_negative(*i, index),
                    other => Err(ConversionError::WrongType {
                        expected: "int",
                        found: other.type_name(),
                        index,
                    }),
                })
                .collect::<Result<Vec<_>, _>>()
                .map(Selector::Many),
            other => Err(ConversionError::TypeMismatch(format!(
                "expected null, an integer or a list of integers, found {}",
                other.type_name()
            ))),
        }
    }

    /// Checks every index against `count` and fixes the reply shape.
    pub fn resolve(&self, count: usize, what: &str) -> GraphResult<ResolvedSelector> {
        let check = |index: usize| {
            if index < count {
                Ok(index)
            } else {
                Err(GraphError::validation(format!(
                    "{what} index {index} out of range (count {count})"
                )))
            }
        };
        match self {
            Selector::All => Ok(ResolvedSelector {
                indices: (0..count).collect(),
                return_single: false,
            }),
            Selector::Single(index) => Ok(ResolvedSelector {
                indices: vec![check(*index)?],
                return_single: true,
            }),
            Selector::Many(indices) => Ok(ResolvedSelector {
                indices: indices
                    .iter()
                    .map(|&index| check(index))
                    .collect::<GraphResult<_>>()?,
                return_single: false,
            }),
        }
    }
}

fn non_negative(value: i64, index: usize) -> Result<usize, ConversionError> {
    usize::try_from(value).map_err(|_| ConversionError::NegativeIndex { value, index })
}

impl From<usize> for Selector {
    fn from(index: usize) -> Self {
        Selector::Single(index)
    }
}

impl From<Vec<usize>> for Selector {
    fn from(indices: Vec<usize>) -> Self {
        Selector::Many(indices)
    }
}

impl From<&[usize]> for Selector {
    fn from(indices: &[usize]) -> Self {
        Selector::Many(indices.to_vec())
    }
}

impl<const N: usize> From<[usize; N]> for Selector {
    fn from(indices: [usize; N]) -> Self {
        Selector::Many(indices.to_vec())
    }
}

impl From<std::ops::Range<usize>> for Selector {
    fn from(range: std::ops::Range<usize>) -> Self {
        Selector::Many(range.collect())
    }
}

/// Validated selection ready to hand to the engine.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ResolvedSelector {
    indices: Vec<usize>,
    return_single: bool,
}

impl ResolvedSelector {
    pub fn indices(&self) -> &[usize] {
        &self.indices
    }

    pub fn len(&self) -> usize {
        self.indices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }

    pub fn returns_single(&self) -> bool {
        self.return_single
    }

    /// Shapes per-index results the way the selection was given.
    pub fn reply<T>(&self, mut values: Vec<T>) -> Reply<T> {
        if self.return_single && values.len() == 1 {
            if let Some(value) = values.pop() {
                return Reply::Single(value);
            }
        }
        Reply::Many(values)
    }
}

/// Scalar-or-list answer to a selector-driven query.
#[derive(Clone, Debug, PartialEq)]
pub enum Reply<T> {
    Single(T),
    Many(Vec<T>),
}

impl<T> Reply<T> {
    pub fn is_single(&self) -> bool {
        matches!(self, Reply::Single(_))
    }

    pub fn single(self) -> Option<T> {
        match self {
            Reply::Single(value) => Some(value),
            Reply::Many(_) => None,
        }
    }

    pub fn into_vec(self) -> Vec<T> {
        match self {
            Reply::Single(value) => vec![value],
            Reply::Many(values) => values,
        }
    }

    pub fn map<U, F: FnMut(T) -> U>(self, mut f: F) -> Reply<U> {
        match self {
            Reply::Single(value) => Reply::Single(f(value)),
            Reply::Many(values) => Reply::Many(values.into_iter().map(f).collect()),
        }
    }
}

impl<T: Into<AttrValue>> Reply<T> {
    /// Host form: the bare value or a list.
    pub fn into_host(self) -> AttrValue {
        match self {
            Reply::Single(value) => value.into(),
            Reply::Many(values) => AttrValue::List(values.into_iter().map(Into::into).collect()),
        }
    }
}
