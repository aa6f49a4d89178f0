use thiserror::Error;

/// Layout engine errors
#[derive(Error, Debug)]
pub enum LayoutError {
    #[error("Invalid recurrence rule: {0}")]
    InvalidRule(String),

    #[error("Field path conflict at '{0}': intermediate value is not an object")]
    PathConflict(String),

    #[error("Unknown timezone: {0}")]
    UnknownTimezone(String),

    #[error("View '{0}' has no grid")]
    NotAGridView(kairos_core::types::ViewType),

    #[error("Invalid view geometry: {0}")]
    InvalidGeometry(String),

    #[error(transparent)]
    CoreError(#[from] kairos_core::error::CoreError),
}

pub type LayoutResult<T> = std::result::Result<T, LayoutError>;
