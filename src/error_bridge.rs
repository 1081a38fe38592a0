//! Translation of engine failures into [`GraphError`].
//!
//! Engine calls hand back their failure directly, so there is no shared error
//! slot to read or clear. The bridge only classifies and logs.

use std::{io, path::Path};

use tracing::warn;

use crate::engine::{EngineFailure, EngineResult, ErrorCode};
use crate::errors::{EngineErrorKind, GraphError, GraphResult};

pub fn kind_of(code: ErrorCode) -> EngineErrorKind {
    match code {
        ErrorCode::NoMemory => EngineErrorKind::OutOfMemory,
        ErrorCode::InvalidValue
        | ErrorCode::InvalidVertex
        | ErrorCode::InvalidEdge
        | ErrorCode::InvalidMode => EngineErrorKind::InvalidArgument,
        ErrorCode::Failure
        | ErrorCode::ParseError
        | ErrorCode::FileError
        | ErrorCode::Unimplemented => EngineErrorKind::Generic,
    }
}

pub fn translate(failure: EngineFailure) -> GraphError {
    warn!(code = %failure.code, message = %failure.message, "engine call failed");
    match kind_of(failure.code) {
        EngineErrorKind::OutOfMemory => GraphError::Memory(failure.message),
        kind => GraphError::Engine {
            kind,
            code: failure.code,
            message: failure.message,
        },
    }
}

/// Converts an engine result at the call site.
pub fn check<T>(result: EngineResult<T>) -> GraphResult<T> {
    result.map_err(translate)
}

/// OS-level failures opening a file never reach the engine.
pub fn resource_error(path: &Path, source: io::Error) -> GraphError {
    warn!(path = %path.display(), error = %source, "file access failed");
    GraphError::resource(path, source)
}

impl From<EngineFailure> for GraphError {
    fn from(failure: EngineFailure) -> Self {
        translate(failure)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::ErrorClass;

    #[test]
    fn no_memory_becomes_memory_error() {
        let err = translate(EngineFailure::new(ErrorCode::NoMemory, "alloc"));
        assert_eq!(err.class(), ErrorClass::Memory);
    }

    #[test]
    fn invalid_vertex_is_invalid_argument() {
        let err = translate(EngineFailure::invalid_vertex(9, 3));
        assert_eq!(err.engine_kind(), Some(EngineErrorKind::InvalidArgument));
        assert!(err.to_string().contains("vertex 9 out of range"));
    }

    #[test]
    fn parse_error_is_generic() {
        let err = translate(EngineFailure::parse(3, "bad token"));
        assert_eq!(err.engine_kind(), Some(EngineErrorKind::Generic));
    }
}
