use tracing::trace;
use url::Url;

use crate::{
    error::Diagnostic,
    types::{ComplexType, EnumType, PropertyRecord, TypeKind, TypeRecord},
    xml::{Element, WSDL, XSD},
};

/// Leading host labels that never make a useful prefix.
const CONVENTIONAL_SUBDOMAINS: [&str; 3] = ["www", "api", "services"];

struct SchemaContext {
    namespace: String,
    element_form_qualified: bool,
    namespace_prefix: Option<String>,
}

impl SchemaContext {
    fn new(schema: &Element) -> Self {
        let namespace = schema.attr("targetNamespace").unwrap_or_default().to_owned();
        let element_form_qualified = schema.attr("elementFormDefault") == Some("qualified");

        let namespace_prefix = if element_form_qualified {
            namespace_prefix_hint(&namespace)
        } else {
            None
        };

        Self {
            namespace,
            element_form_qualified,
            namespace_prefix,
        }
    }

    fn record(&self, name: String, kind: TypeKind) -> TypeRecord {
        TypeRecord::new(name, self.namespace.clone(), kind)
            .with_element_form(self.element_form_qualified, self.namespace_prefix.clone())
    }
}

/// `http://www.swbc.com/ns` becomes `swbc`, `http://example.org/` becomes
/// `example`. Anything without a host has no hint.
pub fn namespace_prefix_hint(namespace: &str) -> Option<String> {
    let url = Url::parse(namespace).ok()?;
    let labels: Vec<&str> = url.host_str()?.split('.').collect();

    let skip = labels.len() > 2 && CONVENTIONAL_SUBDOMAINS.contains(&labels[0]);
    let label = labels.get(usize::from(skip))?;

    if label.is_empty() {
        None
    } else {
        Some((*label).to_owned())
    }
}

fn property(element: &Element) -> PropertyRecord {
    let documentation = element
        .child(XSD, "annotation")
        .and_then(|annotation| annotation.child(XSD, "documentation"))
        .map(|documentation| documentation.text().to_owned())
        .filter(|text| !text.is_empty());

    PropertyRecord {
        name: element.attr("name").unwrap_or_default().to_owned(),
        ty: element.attr("type").unwrap_or_default().to_owned(),
        is_required: element.attr("minOccurs") != Some("0"),
        is_collection: element.attr("maxOccurs") == Some("unbounded"),
        documentation,
    }
}

fn complex_base(complex: &Element) -> Option<String> {
    ["complexContent", "simpleContent"]
        .iter()
        .filter_map(|content| complex.child(XSD, content))
        .flat_map(|content| {
            content
                .child(XSD, "extension")
                .into_iter()
                .chain(content.child(XSD, "restriction"))
        })
        .find_map(|derivation| derivation.attr("base"))
        .map(ToOwned::to_owned)
}

fn complex_type(
    complex: &Element,
    name: String,
    context: &SchemaContext,
    diagnostics: &mut Vec<Diagnostic>,
) -> TypeRecord {
    let properties: Vec<PropertyRecord> = complex
        .descendant(XSD, "sequence")
        .map(|sequence| sequence.children(XSD, "element").map(property).collect())
        .unwrap_or_default();

    if properties.iter().any(|property| property.name.is_empty()) {
        diagnostics.push(Diagnostic::UnnamedProperty { ty: name.clone() });
    }

    trace!(%name, properties = properties.len(), "found complex type");

    let kind = TypeKind::Complex(ComplexType::new(properties, complex_base(complex)));
    context.record(name, kind)
}

fn simple_type(simple: &Element, name: String, context: &SchemaContext) -> TypeRecord {
    let restriction = simple.child(XSD, "restriction");

    let values = restriction
        .map(|restriction| {
            restriction
                .children(XSD, "enumeration")
                .map(|facet| facet.attr("value").unwrap_or_default().to_owned())
                .collect()
        })
        .unwrap_or_default();

    let kind = match EnumType::new(values) {
        Some(values) => TypeKind::Enum(values),
        None => TypeKind::Simple {
            base: restriction
                .and_then(|restriction| restriction.attr("base"))
                .map(ToOwned::to_owned),
        },
    };

    trace!(%name, ?kind, "found simple type");
    context.record(name, kind)
}

pub fn extract(root: &Element, diagnostics: &mut Vec<Diagnostic>) -> Vec<TypeRecord> {
    let mut types = Vec::new();

    let section = match root.child(WSDL, "types") {
        Some(section) => section,
        None => return types,
    };

    for schema in section.children(XSD, "schema") {
        let context = SchemaContext::new(schema);

        for complex in schema.children(XSD, "complexType") {
            let name = complex.attr("name").unwrap_or_default().to_owned();
            if name.is_empty() {
                diagnostics.push(Diagnostic::UnnamedComplexType {
                    schema: context.namespace.clone(),
                });
            }

            types.push(complex_type(complex, name, &context, diagnostics));
        }

        for simple in schema.children(XSD, "simpleType") {
            let name = simple.attr("name").unwrap_or_default().to_owned();
            if name.is_empty() {
                diagnostics.push(Diagnostic::UnnamedSimpleType {
                    schema: context.namespace.clone(),
                });
            }

            types.push(simple_type(simple, name, &context));
        }

        for element in schema.children(XSD, "element") {
            if let Some(complex) = element.child(XSD, "complexType") {
                let name = element
                    .attr("name")
                    .or_else(|| complex.attr("name"))
                    .unwrap_or_default()
                    .to_owned();

                types.push(complex_type(complex, name, &context, diagnostics));
            }
        }
    }

    types
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::xml::parse_document;
    use pretty_assertions::assert_eq;

    fn types_of(schema_body: &str) -> (Vec<TypeRecord>, Vec<Diagnostic>) {
        let document = format!(
            r#"<definitions xmlns="http://schemas.xmlsoap.org/wsdl/"
                            xmlns:xsd="http://www.w3.org/2001/XMLSchema">
                <types>
                    <xsd:schema targetNamespace="http://www.example.com/Svc/" elementFormDefault="qualified">
                        {}
                    </xsd:schema>
                </types>
            </definitions>"#,
            schema_body
        );

        let root = parse_document(&document).unwrap();
        let mut diagnostics = Vec::new();
        let types = extract(&root, &mut diagnostics);
        (types, diagnostics)
    }

    #[test]
    fn prefix_hint_skips_conventional_subdomains() {
        assert_eq!(namespace_prefix_hint("http://www.swbc.com/"), Some("swbc".into()));
        assert_eq!(namespace_prefix_hint("https://api.acme.io/v2"), Some("acme".into()));
        assert_eq!(namespace_prefix_hint("http://services.corp.net/x"), Some("corp".into()));
        assert_eq!(namespace_prefix_hint("http://example.org/Svc/"), Some("example".into()));
        assert_eq!(namespace_prefix_hint("http://www.org/"), Some("www".into()));
    }

    #[test]
    fn prefix_hint_is_absent_without_a_host() {
        assert_eq!(namespace_prefix_hint("urn:example:svc"), None);
        assert_eq!(namespace_prefix_hint("not a uri"), None);
        assert_eq!(namespace_prefix_hint(""), None);
    }

    #[test]
    fn reads_properties_with_occurrence_flags() {
        let (types, diagnostics) = types_of(
            r#"<xsd:complexType name="User">
                <xsd:sequence>
                    <xsd:element name="id" type="xsd:int"/>
                    <xsd:element name="nick" type="xsd:string" minOccurs="0">
                        <xsd:annotation><xsd:documentation>Display name</xsd:documentation></xsd:annotation>
                    </xsd:element>
                    <xsd:element name="roles" type="xsd:string" minOccurs="0" maxOccurs="unbounded"/>
                </xsd:sequence>
            </xsd:complexType>"#,
        );

        assert!(diagnostics.is_empty());
        let user = &types[0];
        assert_eq!(user.name(), "User");
        assert_eq!(user.namespace(), "http://www.example.com/Svc/");
        assert!(user.element_form_qualified());
        assert_eq!(user.namespace_prefix(), Some("example"));
        assert!(!user.is_array_type());

        let flags: Vec<_> = user
            .properties()
            .iter()
            .map(|p| (p.name.as_str(), p.ty.as_str(), p.is_required, p.is_collection))
            .collect();
        assert_eq!(
            flags,
            vec![
                ("id", "xsd:int", true, false),
                ("nick", "xsd:string", false, false),
                ("roles", "xsd:string", false, true),
            ]
        );
        assert_eq!(user.properties()[1].documentation.as_deref(), Some("Display name"));
    }

    #[test]
    fn single_unbounded_sequence_is_an_array() {
        let (types, _) = types_of(
            r#"<xsd:complexType name="UserArray">
                <xsd:sequence>
                    <xsd:element name="user" type="tns:User" maxOccurs="unbounded"/>
                </xsd:sequence>
            </xsd:complexType>"#,
        );

        assert!(types[0].is_array_type());
        assert_eq!(types[0].array_item_type(), Some("tns:User"));
    }

    #[test]
    fn enumerations_keep_document_order() {
        let (types, _) = types_of(
            r#"<xsd:simpleType name="Status">
                <xsd:restriction base="xsd:string">
                    <xsd:enumeration value="Pending"/>
                    <xsd:enumeration value="Active"/>
                    <xsd:enumeration value="Closed"/>
                </xsd:restriction>
            </xsd:simpleType>
            <xsd:simpleType name="Code">
                <xsd:restriction base="xsd:string"/>
            </xsd:simpleType>"#,
        );

        assert!(types[0].is_enum());
        assert_eq!(types[0].enum_values(), ["Pending", "Active", "Closed"]);

        assert!(!types[1].is_enum());
        assert_eq!(types[1].kind(), &TypeKind::Simple { base: Some("xsd:string".into()) });
    }

    #[test]
    fn unnamed_type_does_not_hide_its_siblings() {
        let (types, diagnostics) = types_of(
            r#"<xsd:complexType>
                <xsd:sequence><xsd:element name="name" type="xsd:string"/></xsd:sequence>
            </xsd:complexType>
            <xsd:complexType name="ValidType">
                <xsd:sequence><xsd:element name="value" type="xsd:string"/></xsd:sequence>
            </xsd:complexType>"#,
        );

        let names: Vec<_> = types.iter().map(TypeRecord::name).collect();
        assert_eq!(names, vec!["", "ValidType"]);
        assert_eq!(
            diagnostics,
            vec![Diagnostic::UnnamedComplexType {
                schema: "http://www.example.com/Svc/".into()
            }]
        );
    }

    #[test]
    fn elements_with_inline_types_are_named_after_the_element() {
        let (types, _) = types_of(
            r#"<xsd:element name="GetUserRequest">
                <xsd:complexType>
                    <xsd:sequence><xsd:element name="userId" type="xsd:int"/></xsd:sequence>
                </xsd:complexType>
            </xsd:element>
            <xsd:element name="Plain" type="xsd:string"/>"#,
        );

        assert_eq!(types.len(), 1);
        assert_eq!(types[0].name(), "GetUserRequest");
        assert_eq!(types[0].properties()[0].name, "userId");
    }

    #[test]
    fn extension_base_is_recorded() {
        let (types, _) = types_of(
            r#"<xsd:complexType name="Admin">
                <xsd:complexContent>
                    <xsd:extension base="tns:User">
                        <xsd:sequence><xsd:element name="level" type="xsd:int"/></xsd:sequence>
                    </xsd:extension>
                </xsd:complexContent>
            </xsd:complexType>"#,
        );

        assert_eq!(types[0].base_type(), Some("tns:User"));
        assert_eq!(types[0].properties()[0].name, "level");
    }

    #[test]
    fn unqualified_schema_has_no_prefix_hint() {
        let root = parse_document(
            r#"<definitions xmlns="http://schemas.xmlsoap.org/wsdl/">
                <types>
                    <schema xmlns="http://www.w3.org/2001/XMLSchema" targetNamespace="http://example.org/">
                        <complexType name="T"/>
                    </schema>
                </types>
            </definitions>"#,
        )
        .unwrap();

        let types = extract(&root, &mut Vec::new());
        assert!(!types[0].element_form_qualified());
        assert_eq!(types[0].namespace_prefix(), None);
        assert!(types[0].properties().is_empty());
    }
}
