use std::collections::{BTreeMap, BTreeSet};
use tracing::trace;

use super::{auth, bindings};
use crate::{
    error::Diagnostic,
    types::{AuthHeaderRef, MessageRef, OperationRecord},
    xml::{local_name, Element, SOAP, WSDL},
};

/// Action used when no binding declares one: the target namespace with one
/// trailing slash removed, then `/operation`.
fn fallback_action(target_namespace: &str, operation: &str) -> String {
    if target_namespace.is_empty() {
        return String::new();
    }

    let namespace = target_namespace
        .strip_suffix('/')
        .unwrap_or(target_namespace);
    format!("{}/{}", namespace, operation)
}

fn message_ref(message: Option<&Element>, default_name: String) -> MessageRef {
    MessageRef {
        name: message
            .and_then(|message| message.non_empty_attr("name"))
            .map(ToOwned::to_owned)
            .unwrap_or(default_name),
        element: message
            .and_then(|message| message.attr("message"))
            .unwrap_or_default()
            .to_owned(),
    }
}

/// The header of the first binding operation for `name` (and, when both
/// sides name their input, for the same input) that refers to a candidate.
fn auth_header(
    bindings: &[&Element],
    candidates: &BTreeMap<String, AuthHeaderRef>,
    name: &str,
    input_name: Option<&str>,
) -> Option<AuthHeaderRef> {
    bindings
        .iter()
        .copied()
        .flat_map(|binding| binding.children(WSDL, "operation"))
        .filter(|operation| operation.attr("name") == Some(name))
        .filter_map(|operation| operation.child(WSDL, "input"))
        .filter(|input| match (input.non_empty_attr("name"), input_name) {
            (Some(bound), Some(declared)) => bound == declared,
            _ => true,
        })
        .flat_map(|input| input.children(SOAP, "header"))
        .filter_map(|header| header.attr("message"))
        .find_map(|message| candidates.get(local_name(message)))
        .cloned()
}

pub fn extract(
    root: &Element,
    target_namespace: &str,
    diagnostics: &mut Vec<Diagnostic>,
) -> Vec<OperationRecord> {
    let binding_elements: Vec<&Element> = root.children(WSDL, "binding").collect();
    let actions = bindings::soap_action_map(binding_elements.iter().copied());
    let candidates = auth::candidates(root);

    let mut operations = Vec::new();
    let mut seen = BTreeSet::new();

    for port_type in root.children(WSDL, "portType") {
        for operation in port_type.children(WSDL, "operation") {
            let name = match operation.non_empty_attr("name") {
                Some(name) => name,
                None => {
                    diagnostics.push(Diagnostic::UnnamedOperation {
                        port_type: port_type.attr("name").unwrap_or_default().to_owned(),
                    });
                    continue;
                }
            };

            let input = operation.child(WSDL, "input");
            let output = operation.child(WSDL, "output");
            let input_name = input.and_then(|input| input.non_empty_attr("name"));
            let resolved = input_name.unwrap_or(name);

            if !seen.insert(resolved) {
                diagnostics.push(Diagnostic::DuplicateOperation {
                    name: resolved.to_owned(),
                    port_type: port_type.attr("name").unwrap_or_default().to_owned(),
                });
                continue;
            }

            if input.is_none() {
                diagnostics.push(Diagnostic::MissingInput {
                    operation: name.to_owned(),
                });
            }

            let soap_action = input_name
                .and_then(|input_name| actions.get(input_name))
                .or_else(|| actions.get(name))
                .cloned()
                .unwrap_or_else(|| fallback_action(target_namespace, resolved));

            let documentation = operation
                .child(WSDL, "documentation")
                .map(|documentation| documentation.text().to_owned())
                .unwrap_or_default();

            let auth_header = auth_header(&binding_elements, &candidates, name, input_name);

            trace!(
                name = resolved,
                %soap_action,
                auth_header = auth_header.is_some(),
                "found operation"
            );

            operations.push(OperationRecord {
                name: resolved.to_owned(),
                soap_action,
                documentation,
                input: message_ref(input, format!("{}Request", name)),
                output: message_ref(output, format!("{}Response", name)),
                auth_header,
            });
        }
    }

    operations
}
