use std::collections::BTreeMap;

/// Everything extracted from one WSDL document.
///
/// Built once by [`crate::parse`] and never modified afterwards; consumers
/// only get shared views of its contents.
#[derive(Default, Debug, Clone, PartialEq, Eq)]
pub struct ServiceDefinition {
    pub(crate) target_namespace: String,
    pub(crate) namespaces: BTreeMap<String, String>,
    pub(crate) types: Vec<TypeRecord>,
    pub(crate) operations: Vec<OperationRecord>,
    pub(crate) bindings: Vec<BindingRecord>,
    pub(crate) services: Vec<ServiceRecord>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TypeKind {
    Simple { base: Option<String> },
    Complex(ComplexType),
    Enum(EnumType),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ComplexType {
    properties: Vec<PropertyRecord>,
    base: Option<String>,
    array_item: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnumType {
    values: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeRecord {
    name: String,
    namespace: String,
    kind: TypeKind,
    element_form_qualified: bool,
    namespace_prefix: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PropertyRecord {
    pub name: String,
    pub ty: String,
    pub is_required: bool,
    pub is_collection: bool,
    pub documentation: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MessageRef {
    pub name: String,
    pub element: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthHeaderRef {
    pub name: String,
    pub element: String,
    pub type_name: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OperationRecord {
    pub name: String,
    pub soap_action: String,
    pub documentation: String,
    pub input: MessageRef,
    pub output: MessageRef,
    pub auth_header: Option<AuthHeaderRef>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BindingRecord {
    pub name: String,
    pub ty: String,
    pub transport: String,
    pub operations: BTreeMap<String, String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PortRecord {
    pub name: String,
    pub binding: String,
    pub location: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServiceRecord {
    pub name: String,
    pub ports: Vec<PortRecord>,
}

impl ServiceDefinition {
    pub fn target_namespace(&self) -> &str {
        &self.target_namespace
    }

    /// Prefix to URI declarations of the root element. The default namespace
    /// is stored under `""`.
    pub fn namespaces(&self) -> &BTreeMap<String, String> {
        &self.namespaces
    }

    pub fn types(&self) -> &[TypeRecord] {
        &self.types
    }

    pub fn operations(&self) -> &[OperationRecord] {
        &self.operations
    }

    pub fn bindings(&self) -> &[BindingRecord] {
        &self.bindings
    }

    pub fn services(&self) -> &[ServiceRecord] {
        &self.services
    }

    pub fn find_operation(&self, name: &str) -> Option<&OperationRecord> {
        self.operations.iter().find(|operation| operation.name == name)
    }
}

impl ComplexType {
    /// A complex type whose only member repeats without bound is a collection
    /// wrapper; the member's type becomes the item type.
    pub(crate) fn new(properties: Vec<PropertyRecord>, base: Option<String>) -> Self {
        let array_item = match properties.as_slice() {
            [only] if only.is_collection => Some(only.ty.clone()),
            _ => None,
        };

        Self {
            properties,
            base,
            array_item,
        }
    }

    pub fn properties(&self) -> &[PropertyRecord] {
        &self.properties
    }

    pub fn base(&self) -> Option<&str> {
        self.base.as_deref()
    }

    pub fn array_item(&self) -> Option<&str> {
        self.array_item.as_deref()
    }
}

impl EnumType {
    /// `None` when there are no values: such a type is a plain restriction.
    pub(crate) fn new(values: Vec<String>) -> Option<Self> {
        if values.is_empty() {
            None
        } else {
            Some(Self { values })
        }
    }

    pub fn values(&self) -> &[String] {
        &self.values
    }
}

impl TypeRecord {
    pub(crate) fn new(name: String, namespace: String, kind: TypeKind) -> Self {
        Self {
            name,
            namespace,
            kind,
            element_form_qualified: false,
            namespace_prefix: None,
        }
    }

    pub(crate) fn with_element_form(mut self, qualified: bool, prefix: Option<String>) -> Self {
        self.element_form_qualified = qualified;
        self.namespace_prefix = prefix;
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    pub fn kind(&self) -> &TypeKind {
        &self.kind
    }

    pub fn element_form_qualified(&self) -> bool {
        self.element_form_qualified
    }

    /// Short prefix suggested for serializing qualified elements, derived from
    /// the schema's target namespace host.
    pub fn namespace_prefix(&self) -> Option<&str> {
        self.namespace_prefix.as_deref()
    }

    pub fn properties(&self) -> &[PropertyRecord] {
        match &self.kind {
            TypeKind::Complex(complex) => complex.properties(),
            _ => &[],
        }
    }

    pub fn base_type(&self) -> Option<&str> {
        match &self.kind {
            TypeKind::Simple { base } => base.as_deref(),
            TypeKind::Complex(complex) => complex.base(),
            TypeKind::Enum(_) => None,
        }
    }

    pub fn is_array_type(&self) -> bool {
        self.array_item_type().is_some()
    }

    pub fn array_item_type(&self) -> Option<&str> {
        match &self.kind {
            TypeKind::Complex(complex) => complex.array_item(),
            _ => None,
        }
    }

    pub fn is_enum(&self) -> bool {
        matches!(self.kind, TypeKind::Enum(_))
    }

    pub fn enum_values(&self) -> &[String] {
        match &self.kind {
            TypeKind::Enum(values) => values.values(),
            _ => &[],
        }
    }
}

impl OperationRecord {
    pub fn auth_header(&self) -> Option<&AuthHeaderRef> {
        self.auth_header.as_ref()
    }
}
