use tracing::{debug, trace};

use super::{
    error::{self, Diagnostic},
    types::ServiceDefinition,
    xml::{self, Element},
};

pub mod auth;
mod bindings;
mod namespaces;
mod operations;
mod schema;
mod services;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum AssemblyState {
    Start,
    NamespacesRead,
    TypesRead,
    OperationsRead,
    BindingsRead,
    ServicesRead,
    Done,
}

/// Runs every extractor once, in order, over the same tree.
struct Assembler<'a> {
    root: &'a Element,
    state: AssemblyState,

    definition: ServiceDefinition,
    diagnostics: Vec<Diagnostic>,
}

impl<'a> Assembler<'a> {
    fn new(root: &'a Element) -> Self {
        Self {
            root,
            state: AssemblyState::Start,

            definition: ServiceDefinition {
                target_namespace: root.attr("targetNamespace").unwrap_or_default().to_owned(),
                ..Default::default()
            },
            diagnostics: Vec::new(),
        }
    }

    fn advance(&mut self) {
        let root = self.root;
        let diagnostics = &mut self.diagnostics;
        let definition = &mut self.definition;

        self.state = match self.state {
            AssemblyState::Start => {
                definition.namespaces = namespaces::extract(root);
                AssemblyState::NamespacesRead
            }

            AssemblyState::NamespacesRead => {
                definition.types = schema::extract(root, diagnostics);
                AssemblyState::TypesRead
            }

            AssemblyState::TypesRead => {
                definition.operations =
                    operations::extract(root, &definition.target_namespace, diagnostics);
                AssemblyState::OperationsRead
            }

            AssemblyState::OperationsRead => {
                definition.bindings = bindings::extract(root, diagnostics);
                AssemblyState::BindingsRead
            }

            AssemblyState::BindingsRead => {
                definition.services = services::extract(root, diagnostics);
                AssemblyState::ServicesRead
            }

            AssemblyState::ServicesRead | AssemblyState::Done => AssemblyState::Done,
        };

        trace!(state = ?self.state, "assembler advanced");
    }

    fn finish(mut self) -> (ServiceDefinition, Vec<Diagnostic>) {
        while self.state != AssemblyState::Done {
            self.advance();
        }

        debug!(
            target_namespace = %self.definition.target_namespace,
            types = self.definition.types.len(),
            operations = self.definition.operations.len(),
            bindings = self.definition.bindings.len(),
            services = self.definition.services.len(),
            diagnostics = self.diagnostics.len(),
            "finished parsing definition"
        );

        (self.definition, self.diagnostics)
    }
}

pub fn parse(document: &str) -> Result<(ServiceDefinition, Vec<Diagnostic>), error::Error> {
    let root = xml::parse_document(document)?;
    Ok(Assembler::new(&root).finish())
}
