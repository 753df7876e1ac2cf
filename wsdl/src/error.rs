use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("Error parsing XML input: {0}")]
    XmlParseError(#[from] quick_xml::Error),

    #[error("Document has no root element")]
    MissingRoot,

    #[error("Element <{0}> is never closed")]
    UnclosedElement(String),

    #[error("Element <{0}> follows the root element")]
    MultipleRoots(String),

    #[error("Character data outside the root element")]
    TextOutsideRoot,
}

/// A declaration that was skipped or recorded with empty defaults because a
/// required attribute was missing. Never fatal.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Diagnostic {
    #[error("complexType without a name in schema {schema:?}, recorded with an empty name")]
    UnnamedComplexType { schema: String },

    #[error("simpleType without a name in schema {schema:?}, recorded with an empty name")]
    UnnamedSimpleType { schema: String },

    #[error("element without a name in type {ty:?}, recorded as an unnamed property")]
    UnnamedProperty { ty: String },

    #[error("operation without a name in portType {port_type:?}, skipped")]
    UnnamedOperation { port_type: String },

    #[error("operation without a name in binding {binding:?}, skipped")]
    UnnamedBindingOperation { binding: String },

    #[error("operation {name:?} in portType {port_type:?} repeats an earlier operation, skipped")]
    DuplicateOperation { name: String, port_type: String },

    #[error("operation {operation:?} has no input message")]
    MissingInput { operation: String },

    #[error("port {port:?} has no soap:address, endpoint left empty")]
    MissingAddress { port: String },
}
