use std::{io, path::PathBuf};

use thiserror::Error;

use crate::attributes::AttrScope;
use crate::engine::ErrorCode;

/// Coarse classification of engine failures.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EngineErrorKind {
    OutOfMemory,
    InvalidArgument,
    Generic,
}

/// Error category a host surfaces to its callers.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ErrorClass {
    Validation,
    Conversion,
    Engine,
    Resource,
    Memory,
    KeyNotFound,
    StaleView,
}

#[derive(Clone, Debug, PartialEq, Error)]
pub enum ConversionError {
    #[error("expected {expected} at position {index}, found {found}")]
    WrongType {
        expected: &'static str,
        found: &'static str,
        index: usize,
    },
    #[error("edge list must contain an even number of endpoints, got {len}")]
    OddPairList { len: usize },
    #[error("negative index {value} at position {index}")]
    NegativeIndex { value: i64, index: usize },
    #[error("matrix row {row} has {found} columns, expected {expected}")]
    RaggedMatrix {
        row: usize,
        expected: usize,
        found: usize,
    },
    #[error("type mismatch: {0}")]
    TypeMismatch(String),
}

#[derive(Debug, Error)]
pub enum GraphError {
    #[error("invalid argument: {0}")]
    Validation(String),
    #[error("conversion error: {0}")]
    Conversion(#[from] ConversionError),
    #[error("engine error ({code}): {message}")]
    Engine {
        kind: EngineErrorKind,
        code: ErrorCode,
        message: String,
    },
    #[error("cannot access {}: {source}", .path.display())]
    Resource {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("out of memory: {0}")]
    Memory(String),
    #[error("{scope} attribute not found: {key}")]
    KeyNotFound { scope: AttrScope, key: String },
    #[error("stale sequence view: {0}")]
    StaleView(String),
}

pub type GraphResult<T> = Result<T, GraphError>;

impl GraphError {
    pub fn validation<T: Into<String>>(msg: T) -> Self {
        GraphError::Validation(msg.into())
    }

    pub fn type_mismatch<T: Into<String>>(msg: T) -> Self {
        GraphError::Conversion(ConversionError::TypeMismatch(msg.into()))
    }

    pub fn memory<T: Into<String>>(msg: T) -> Self {
        GraphError::Memory(msg.into())
    }

    pub fn resource<P: Into<PathBuf>>(path: P, source: io::Error) -> Self {
        GraphError::Resource {
            path: path.into(),
            source,
        }
    }

    pub fn key_not_found<T: Into<String>>(scope: AttrScope, key: T) -> Self {
        GraphError::KeyNotFound {
            scope,
            key: key.into(),
        }
    }

    pub fn stale_view<T: Into<String>>(msg: T) -> Self {
        GraphError::StaleView(msg.into())
    }

    pub fn class(&self) -> ErrorClass {
        match self {
            GraphError::Validation(_) => ErrorClass::Validation,
            GraphError::Conversion(_) => ErrorClass::Conversion,
            GraphError::Engine { .. } => ErrorClass::Engine,
            GraphError::Resource { .. } => ErrorClass::Resource,
            GraphError::Memory(_) => ErrorClass::Memory,
            GraphError::KeyNotFound { .. } => ErrorClass::KeyNotFound,
            GraphError::StaleView(_) => ErrorClass::StaleView,
        }
    }

    pub fn engine_kind(&self) -> Option<EngineErrorKind> {
        match self {
            GraphError::Engine { kind, .. } => Some(*kind),
            _ => None,
        }
    }
}
