use std::io::{self, Write};

use soapgen_wsdl::{
    resolve::ResolvedType,
    types::{
        BindingRecord, OperationRecord, PropertyRecord, ServiceDefinition, ServiceRecord,
        TypeKind, TypeRecord,
    },
};

pub trait Summary {
    fn summarize<W: Write>(&self, definition: &ServiceDefinition, out: &mut W) -> io::Result<()>;
}

fn summarize_all<W: Write>(
    all: &[impl Summary],
    definition: &ServiceDefinition,
    out: &mut W,
) -> io::Result<()> {
    for item in all {
        item.summarize(definition, out)?;
    }

    Ok(())
}

fn describe_reference(definition: &ServiceDefinition, reference: &str) -> String {
    match definition.resolve_type(reference) {
        ResolvedType::Primitive(primitive) => primitive.rust_type().to_owned(),
        ResolvedType::Defined(ty) => ty.name().to_owned(),
        ResolvedType::Unresolved(name) => format!("{} (external)", name),
    }
}

impl Summary for ServiceDefinition {
    fn summarize<W: Write>(&self, definition: &ServiceDefinition, out: &mut W) -> io::Result<()> {
        writeln!(out, "target namespace: {}", self.target_namespace())?;

        writeln!(out, "\ntypes ({}):", self.types().len())?;
        summarize_all(self.types(), definition, out)?;

        writeln!(out, "\noperations ({}):", self.operations().len())?;
        summarize_all(self.operations(), definition, out)?;

        writeln!(out, "\nbindings ({}):", self.bindings().len())?;
        summarize_all(self.bindings(), definition, out)?;

        writeln!(out, "\nservices ({}):", self.services().len())?;
        summarize_all(self.services(), definition, out)
    }
}

impl Summary for TypeRecord {
    fn summarize<W: Write>(&self, definition: &ServiceDefinition, out: &mut W) -> io::Result<()> {
        match self.kind() {
            TypeKind::Simple { base } => writeln!(
                out,
                "  {} = {}",
                self.name(),
                base.as_deref()
                    .map(|base| describe_reference(definition, base))
                    .unwrap_or_else(|| "String".to_owned())
            ),

            TypeKind::Enum(values) => {
                writeln!(out, "  enum {} {{ {} }}", self.name(), values.values().join(", "))
            }

            TypeKind::Complex(complex) => {
                if let Some(item) = complex.array_item() {
                    return writeln!(
                        out,
                        "  {} = Vec<{}>",
                        self.name(),
                        describe_reference(definition, item)
                    );
                }

                match complex.base() {
                    Some(base) => writeln!(out, "  struct {} : {}", self.name(), base)?,
                    None => writeln!(out, "  struct {}", self.name())?,
                }

                summarize_all(complex.properties(), definition, out)
            }
        }
    }
}

impl Summary for PropertyRecord {
    fn summarize<W: Write>(&self, definition: &ServiceDefinition, out: &mut W) -> io::Result<()> {
        let mut ty = describe_reference(definition, &self.ty);

        if self.is_collection {
            ty = format!("Vec<{}>", ty);
        } else if !self.is_required {
            ty = format!("Option<{}>", ty);
        }

        writeln!(out, "    {}: {}", self.name, ty)
    }
}

impl Summary for OperationRecord {
    fn summarize<W: Write>(&self, _: &ServiceDefinition, out: &mut W) -> io::Result<()> {
        writeln!(
            out,
            "  {}({}) -> {}",
            self.name, self.input.element, self.output.element
        )?;
        writeln!(out, "    action: {}", self.soap_action)?;

        if let Some(header) = self.auth_header() {
            writeln!(out, "    auth header: {} ({})", header.type_name, header.name)?;
        }

        Ok(())
    }
}

impl Summary for BindingRecord {
    fn summarize<W: Write>(&self, _: &ServiceDefinition, out: &mut W) -> io::Result<()> {
        writeln!(out, "  {} for {} over {}", self.name, self.ty, self.transport)?;

        for (operation, action) in &self.operations {
            writeln!(out, "    {} => {}", operation, action)?;
        }

        Ok(())
    }
}

impl Summary for ServiceRecord {
    fn summarize<W: Write>(&self, _: &ServiceDefinition, out: &mut W) -> io::Result<()> {
        writeln!(out, "  {}", self.name)?;

        for port in &self.ports {
            writeln!(out, "    {} via {} at {}", port.name, port.binding, port.location)?;
        }

        Ok(())
    }
}

pub fn write_summary<W: Write>(definition: &ServiceDefinition, out: &mut W) -> io::Result<()> {
    definition.summarize(definition, out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const DOCUMENT: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<definitions xmlns="http://schemas.xmlsoap.org/wsdl/"
             xmlns:soap="http://schemas.xmlsoap.org/wsdl/soap/"
             xmlns:tns="http://example.org/Svc/"
             xmlns:xsd="http://www.w3.org/2001/XMLSchema"
             targetNamespace="http://example.org/Svc/">
    <types>
        <xsd:schema targetNamespace="http://example.org/Svc/" elementFormDefault="qualified">
            <xsd:complexType name="Item">
                <xsd:sequence>
                    <xsd:element name="id" type="xsd:int"/>
                    <xsd:element name="label" type="xsd:string" minOccurs="0"/>
                </xsd:sequence>
            </xsd:complexType>
            <xsd:complexType name="Items">
                <xsd:sequence>
                    <xsd:element name="item" type="tns:Item" maxOccurs="unbounded"/>
                </xsd:sequence>
            </xsd:complexType>
            <xsd:simpleType name="Mode">
                <xsd:restriction base="xsd:string">
                    <xsd:enumeration value="Fast"/>
                    <xsd:enumeration value="Safe"/>
                </xsd:restriction>
            </xsd:simpleType>
        </xsd:schema>
    </types>
    <message name="SessionHeader"><part name="h" element="tns:Session"/></message>
    <portType name="P">
        <operation name="List">
            <input message="tns:ListIn"/>
            <output message="tns:ListOut"/>
        </operation>
    </portType>
    <binding name="B" type="tns:P">
        <soap:binding transport="http://schemas.xmlsoap.org/soap/http"/>
        <operation name="List">
            <soap:operation soapAction="urn:List"/>
            <input><soap:header message="tns:SessionHeader" part="h" use="literal"/></input>
        </operation>
    </binding>
    <service name="Svc">
        <port name="SvcPort" binding="tns:B">
            <soap:address location="http://example.org/svc"/>
        </port>
    </service>
</definitions>"#;

    #[test]
    fn summarizes_every_section() {
        let definition = soapgen_wsdl::parse(DOCUMENT).unwrap();
        let mut out = Vec::new();
        write_summary(&definition, &mut out).unwrap();

        assert_eq!(
            String::from_utf8(out).unwrap(),
            "target namespace: http://example.org/Svc/

types (3):
  struct Item
    id: i32
    label: Option<String>
  Items = Vec<Item>
  enum Mode { Fast, Safe }

operations (1):
  List(tns:ListIn) -> tns:ListOut
    action: urn:List
    auth header: Session (SessionHeader)

bindings (1):
  B for tns:P over http://schemas.xmlsoap.org/soap/http
    List => urn:List

services (1):
  Svc
    SvcPort via tns:B at http://example.org/svc
"
        );
    }
}
