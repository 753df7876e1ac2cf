use tracing::trace;

use crate::{
    error::Diagnostic,
    types::{PortRecord, ServiceRecord},
    xml::{Element, SOAP, WSDL},
};

pub fn extract(root: &Element, diagnostics: &mut Vec<Diagnostic>) -> Vec<ServiceRecord> {
    let mut services = Vec::new();

    for service in root.children(WSDL, "service") {
        let mut ports = Vec::new();

        for port in service.children(WSDL, "port") {
            let name = port.attr("name").unwrap_or_default().to_owned();

            let location = match port.child(SOAP, "address") {
                Some(address) => address.attr("location").unwrap_or_default().to_owned(),
                None => {
                    diagnostics.push(Diagnostic::MissingAddress { port: name.clone() });
                    String::new()
                }
            };

            ports.push(PortRecord {
                name,
                binding: port.attr("binding").unwrap_or_default().to_owned(),
                location,
            });
        }

        let name = service.attr("name").unwrap_or_default().to_owned();
        trace!(%name, ports = ports.len(), "found service");

        services.push(ServiceRecord { name, ports });
    }

    services
}
