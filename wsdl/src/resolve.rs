//! Mapping of referenced type names onto XSD built-ins or parsed types.

use super::{
    types::{ServiceDefinition, TypeRecord},
    xml::{split_namespaced_name, XSD},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum XsdPrimitive {
    String,
    Boolean,
    Byte,
    Short,
    Int,
    Long,
    Integer,
    UnsignedByte,
    UnsignedShort,
    UnsignedInt,
    UnsignedLong,
    Decimal,
    Float,
    Double,
    DateTime,
    Date,
    Time,
    Duration,
    Base64Binary,
    HexBinary,
    AnyUri,
    QName,
    AnyType,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResolvedType<'a> {
    Primitive(XsdPrimitive),
    Defined(&'a TypeRecord),
    /// Not declared in the document; consumers treat it as an external type.
    Unresolved(String),
}

impl XsdPrimitive {
    pub fn from_name(name: &str) -> Option<Self> {
        Some(match name {
            "string" | "normalizedString" | "token" | "NCName" | "Name" | "language" | "ID"
            | "IDREF" => Self::String,
            "boolean" => Self::Boolean,
            "byte" => Self::Byte,
            "short" => Self::Short,
            "int" => Self::Int,
            "long" => Self::Long,
            "integer" | "positiveInteger" | "negativeInteger" | "nonNegativeInteger"
            | "nonPositiveInteger" => Self::Integer,
            "unsignedByte" => Self::UnsignedByte,
            "unsignedShort" => Self::UnsignedShort,
            "unsignedInt" => Self::UnsignedInt,
            "unsignedLong" => Self::UnsignedLong,
            "decimal" => Self::Decimal,
            "float" => Self::Float,
            "double" => Self::Double,
            "dateTime" => Self::DateTime,
            "date" => Self::Date,
            "time" => Self::Time,
            "duration" => Self::Duration,
            "base64Binary" => Self::Base64Binary,
            "hexBinary" => Self::HexBinary,
            "anyURI" => Self::AnyUri,
            "QName" => Self::QName,
            "anyType" | "anySimpleType" => Self::AnyType,
            _ => return None,
        })
    }

    /// Conventional Rust spelling for code emitters.
    pub fn rust_type(self) -> &'static str {
        match self {
            Self::String | Self::Decimal | Self::Integer | Self::Duration => "String",
            Self::DateTime | Self::Date | Self::Time => "String",
            Self::AnyUri | Self::QName | Self::AnyType => "String",
            Self::Boolean => "bool",
            Self::Byte => "i8",
            Self::Short => "i16",
            Self::Int => "i32",
            Self::Long => "i64",
            Self::UnsignedByte => "u8",
            Self::UnsignedShort => "u16",
            Self::UnsignedInt => "u32",
            Self::UnsignedLong => "u64",
            Self::Float => "f32",
            Self::Double => "f64",
            Self::Base64Binary | Self::HexBinary => "Vec<u8>",
        }
    }
}

impl ServiceDefinition {
    /// Looks a type up by local name, ignoring any prefix on `name`.
    pub fn find_type(&self, name: &str) -> Option<&TypeRecord> {
        let (_, local) = split_namespaced_name(name);
        self.types().iter().find(|ty| ty.name() == local)
    }

    /// Resolves a property or message reference such as `tns:User` or
    /// `xsd:int`.
    ///
    /// A prefix bound to the XML Schema namespace always means a built-in. Any
    /// other reference is matched against the parsed types, preferring the one
    /// declared in the namespace the prefix is bound to, and only then against
    /// the built-ins (schemas often declare their own prefixes, which are not
    /// visible at the root).
    pub fn resolve_type<'a>(&'a self, reference: &str) -> ResolvedType<'a> {
        let (prefix, local) = split_namespaced_name(reference);
        let bound = self.namespaces().get(prefix.unwrap_or_default());

        if bound.map(String::as_str) == Some(XSD) {
            return match XsdPrimitive::from_name(local) {
                Some(primitive) => ResolvedType::Primitive(primitive),
                None => ResolvedType::Unresolved(local.to_owned()),
            };
        }

        let mut candidates = self.types().iter().filter(|ty| ty.name() == local);
        let defined = match bound {
            Some(namespace) => candidates
                .clone()
                .find(|ty| ty.namespace() == namespace.as_str())
                .or_else(|| candidates.next()),
            None => candidates.next(),
        };

        if let Some(defined) = defined {
            return ResolvedType::Defined(defined);
        }

        match XsdPrimitive::from_name(local) {
            Some(primitive) => ResolvedType::Primitive(primitive),
            None => ResolvedType::Unresolved(local.to_owned()),
        }
    }
}
