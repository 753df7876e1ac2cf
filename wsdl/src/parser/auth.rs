use std::collections::BTreeMap;

use crate::{
    types::AuthHeaderRef,
    xml::{local_name, Element, WSDL},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthHeaderRule {
    EndsWith(&'static str),
    Contains(&'static str),
}

/// Naming rules for credential-carrying header messages, checked in order.
/// Matching is case-sensitive.
pub const AUTH_HEADER_RULES: [AuthHeaderRule; 3] = [
    AuthHeaderRule::EndsWith("AuthHeader"),
    AuthHeaderRule::EndsWith("Header"),
    AuthHeaderRule::Contains("Auth"),
];

impl AuthHeaderRule {
    pub fn matches(self, name: &str) -> bool {
        match self {
            Self::EndsWith(suffix) => name.ends_with(suffix),
            Self::Contains(needle) => name.contains(needle),
        }
    }
}

/// The first rule `name` satisfies, if any.
pub fn matching_rule(name: &str) -> Option<AuthHeaderRule> {
    AUTH_HEADER_RULES.iter().copied().find(|rule| rule.matches(name))
}

pub fn is_auth_header_name(name: &str) -> bool {
    matching_rule(name).is_some()
}

/// Header-like messages keyed by message name.
pub(super) fn candidates(root: &Element) -> BTreeMap<String, AuthHeaderRef> {
    let mut candidates = BTreeMap::new();

    for message in root.children(WSDL, "message") {
        let name = match message.non_empty_attr("name") {
            Some(name) => name,
            None => continue,
        };

        let element = message
            .children(WSDL, "part")
            .find_map(|part| part.non_empty_attr("element"));
        let element_name = element.map(local_name);

        if !is_auth_header_name(name) && !element_name.map_or(false, is_auth_header_name) {
            continue;
        }

        candidates.insert(
            name.to_owned(),
            AuthHeaderRef {
                name: name.to_owned(),
                element: element.unwrap_or_default().to_owned(),
                type_name: element_name.unwrap_or(name).to_owned(),
            },
        );
    }

    candidates
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::xml::parse_document;
    use pretty_assertions::assert_eq;

    #[test]
    fn rules_are_checked_in_order() {
        assert_eq!(
            matching_rule("SWBCAuthHeader"),
            Some(AuthHeaderRule::EndsWith("AuthHeader"))
        );
        assert_eq!(
            matching_rule("SessionHeader"),
            Some(AuthHeaderRule::EndsWith("Header"))
        );
        assert_eq!(
            matching_rule("AuthenticationInfo"),
            Some(AuthHeaderRule::Contains("Auth"))
        );
        assert_eq!(matching_rule("GetUserRequest"), None);
    }

    #[test]
    fn matching_is_case_sensitive() {
        assert!(!is_auth_header_name("authtoken"));
        assert!(!is_auth_header_name("SOAPHEADER"));
        assert!(is_auth_header_name("OAuthToken"));
    }

    #[test]
    fn classifies_by_message_or_element_name() {
        let root = parse_document(
            r#"<definitions xmlns="http://schemas.xmlsoap.org/wsdl/">
                <message name="PostSinglePaymentSWBCAuthHeader">
                    <part name="SWBCAuthHeader" element="tns:SWBCAuthHeader"/>
                </message>
                <message name="Credentials">
                    <part name="body" element="tns:TokenHeader"/>
                </message>
                <message name="GetUserSoapIn">
                    <part name="parameters" element="tns:GetUser"/>
                </message>
                <message name="LegacyAuth"/>
            </definitions>"#,
        )
        .unwrap();

        let candidates = candidates(&root);
        assert_eq!(
            candidates.keys().map(String::as_str).collect::<Vec<_>>(),
            vec!["Credentials", "LegacyAuth", "PostSinglePaymentSWBCAuthHeader"]
        );

        let payment = &candidates["PostSinglePaymentSWBCAuthHeader"];
        assert_eq!(payment.element, "tns:SWBCAuthHeader");
        assert_eq!(payment.type_name, "SWBCAuthHeader");

        assert_eq!(candidates["Credentials"].type_name, "TokenHeader");
        assert_eq!(candidates["LegacyAuth"].element, "");
        assert_eq!(candidates["LegacyAuth"].type_name, "LegacyAuth");
    }
}
