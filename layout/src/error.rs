//! Layout errors and the stable error-code contract.

use crate::component::ComponentId;

/// Stable machine-readable code for an error, surfaced to API clients.
pub trait ErrorCode {
    fn error_code(&self) -> &'static str;
}

/// Contract violations on canvas and palette mutations.
///
/// A drop gesture always carries indices computed by the host from the
/// rendered lists, so these indicate a host bug rather than user error.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LayoutError {
    #[error("canvas index {index} out of range for length {len}")]
    IndexOutOfRange { index: usize, len: usize },
    #[error("palette template {index} out of range for {len} templates")]
    TemplateOutOfRange { index: usize, len: usize },
    #[error("component already on canvas: {0}")]
    DuplicateId(ComponentId),
}

impl ErrorCode for LayoutError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::IndexOutOfRange { .. } => "E_INDEX_OUT_OF_RANGE",
            Self::TemplateOutOfRange { .. } => "E_TEMPLATE_OUT_OF_RANGE",
            Self::DuplicateId(_) => "E_DUPLICATE_ID",
        }
    }
}
