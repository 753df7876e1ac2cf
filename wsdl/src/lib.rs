mod parser;
mod xml;

pub mod error;
pub mod resolve;
pub mod types;

pub use parser::auth::{is_auth_header_name, matching_rule, AuthHeaderRule, AUTH_HEADER_RULES};

/// Parses a WSDL 1.1 document held in memory.
///
/// Only malformed XML is an error. Declarations missing required attributes
/// are skipped or recorded with empty values; use [`parse_with_diagnostics`]
/// to find out which.
pub fn parse<S: AsRef<str>>(document: S) -> Result<types::ServiceDefinition, error::Error> {
    parse_with_diagnostics(document).map(|(definition, _)| definition)
}

pub fn parse_with_diagnostics<S: AsRef<str>>(
    document: S,
) -> Result<(types::ServiceDefinition, Vec<error::Diagnostic>), error::Error> {
    parser::parse(document.as_ref())
}
