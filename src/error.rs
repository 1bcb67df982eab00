use thiserror::Error;

/// Top-level error type for the seamline drafting kernel.
#[derive(Debug, Error)]
pub enum SeamlineError {
    #[error(transparent)]
    Point(#[from] PointError),

    #[error(transparent)]
    Path(#[from] PathError),

    #[error(transparent)]
    Geometry(#[from] GeometryError),
}

/// Errors related to the named-point table.
#[derive(Debug, Error)]
pub enum PointError {
    #[error("unknown point: {0}")]
    UnknownPoint(String),

    #[error("point handle is no longer valid")]
    Expired,
}

/// Errors related to paths and the path mini-language.
#[derive(Debug, Error)]
pub enum PathError {
    #[error("unknown path: {0}")]
    UnknownPath(String),

    #[error("invalid path: {0}")]
    InvalidPath(String),

    #[error("cannot parse path string: {0}")]
    Parse(String),
}

/// Errors related to geometric computations.
#[derive(Debug, Error)]
pub enum GeometryError {
    #[error("distance {requested} exceeds curve length {length}")]
    OutOfRange { requested: f64, length: f64 },

    #[error("degenerate geometry: {0}")]
    Degenerate(String),
}

/// Convenience type alias for results using [`SeamlineError`].
pub type Result<T> = std::result::Result<T, SeamlineError>;
