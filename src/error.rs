/* Error taxonomy for the IR loader and type resolver. */

use thiserror::Error;

#[derive(Debug, Error)]
pub enum IrError {
    #[error("failed to read IR file: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse IR document: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("declarations_order references {category} '{name}', which is not present in its collection")]
    UnresolvedDeclarationOrderRef { category: String, name: String },
}

#[derive(Debug, Error)]
pub enum ResolveError {
    #[error("structured type reference is missing 'type_name'")]
    MissingTypeName,
}

#[derive(Debug, Error)]
#[error("target '{target:?}' is accepted but has no backing generator in this tool")]
pub struct TargetNotImplemented {
    pub target: crate::Target,
}
