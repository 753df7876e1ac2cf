use std::collections::BTreeMap;
use tracing::trace;

use crate::{
    error::Diagnostic,
    types::BindingRecord,
    xml::{Element, SOAP, WSDL},
};

/// Overloaded operations share a name, so the input name is the key when the
/// binding gives one.
pub(super) fn operation_key(operation: &Element) -> Option<&str> {
    let name = operation.non_empty_attr("name")?;

    Some(
        operation
            .child(WSDL, "input")
            .and_then(|input| input.non_empty_attr("name"))
            .unwrap_or(name),
    )
}

/// Operation key to SOAP action for every operation of `bindings` that
/// declares a non-empty action. Later declarations win.
pub(super) fn soap_action_map<'a, I>(bindings: I) -> BTreeMap<String, String>
where
    I: IntoIterator<Item = &'a Element>,
{
    let mut actions = BTreeMap::new();

    for operation in bindings
        .into_iter()
        .flat_map(|binding| binding.children(WSDL, "operation"))
    {
        let key = match operation_key(operation) {
            Some(key) => key,
            None => continue,
        };

        let action = operation
            .child(SOAP, "operation")
            .and_then(|soap| soap.non_empty_attr("soapAction"));

        if let Some(action) = action {
            actions.insert(key.to_owned(), action.to_owned());
        }
    }

    actions
}

pub fn extract(root: &Element, diagnostics: &mut Vec<Diagnostic>) -> Vec<BindingRecord> {
    root.children(WSDL, "binding")
        .map(|binding| {
            let name = binding.attr("name").unwrap_or_default().to_owned();

            for operation in binding.children(WSDL, "operation") {
                if operation.non_empty_attr("name").is_none() {
                    diagnostics.push(Diagnostic::UnnamedBindingOperation {
                        binding: name.clone(),
                    });
                }
            }

            let transport = binding
                .child(SOAP, "binding")
                .and_then(|soap| soap.attr("transport"))
                .unwrap_or_default()
                .to_owned();

            let operations = soap_action_map(std::iter::once(binding));
            trace!(%name, operations = operations.len(), "found binding");

            BindingRecord {
                name,
                ty: binding.attr("type").unwrap_or_default().to_owned(),
                transport,
                operations,
            }
        })
        .collect()
}
