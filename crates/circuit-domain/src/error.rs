use thiserror::Error;

/// Errores del dominio de partes y grafos.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
    #[error("{0}")]
    ValidationError(String),

    #[error("node '{node}': unrecognized {attribute} '{value}'")]
    UnknownAttribute {
        node: String,
        attribute: &'static str,
        value: String,
    },

    #[error("duplicate node id '{0}'")]
    DuplicateNode(String),

    #[error("edge '{edge}' references missing node '{node}'")]
    DanglingEdge { edge: String, node: String },
}
