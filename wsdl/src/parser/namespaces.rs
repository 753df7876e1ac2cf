use std::collections::BTreeMap;

use crate::xml::{split_namespaced_name, Element};

pub fn extract(root: &Element) -> BTreeMap<String, String> {
    root.attributes
        .iter()
        .filter_map(|(key, value)| match split_namespaced_name(key) {
            (None, "xmlns") => Some((String::new(), value.clone())),
            (Some("xmlns"), prefix) => Some((prefix.to_owned(), value.clone())),
            _ => None,
        })
        .collect()
}
