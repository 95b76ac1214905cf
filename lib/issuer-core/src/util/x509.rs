//! Issuer identity extraction from QTSP certificate chains.

use std::collections::HashMap;
use std::sync::LazyLock;

use regex::Regex;
use thiserror::Error;
use x509_parser::der_parser::oid;
use x509_parser::prelude::*;

use crate::util::hash::decode_base64;

static ORG_ID_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"organizationIdentifier\s*=\s*([\w\-]+)").expect("valid regex")
});

#[derive(Debug, Error)]
pub enum CertificateError {
    #[error("organizationIdentifier not found in the certificate chain")]
    OrganizationIdentifierNotFound,
    #[error("certificate entry is not valid base64: {0}")]
    InvalidEncoding(String),
}

/// Recovers the eIDAS organizationIdentifier from a chain of base64 DER
/// certificates, leaf first. Each entry is first matched textually against
/// `organizationIdentifier=<token>`; failing that, the DER bytes are parsed
/// as X.509 and the subject RDN with OID 2.5.4.97 is read. The first entry
/// yielding a non-empty identifier wins.
pub fn organization_identifier_from_chain(
    certificates: &[String],
) -> Result<String, CertificateError> {
    for certificate in certificates {
        let der = decode_base64(certificate.trim())
            .map_err(|e| CertificateError::InvalidEncoding(e.to_string()))?;

        if let Some(identifier) = identifier_from_text(&der).or_else(|| identifier_from_der(&der)) {
            return Ok(identifier);
        }
    }
    Err(CertificateError::OrganizationIdentifierNotFound)
}

fn identifier_from_text(der: &[u8]) -> Option<String> {
    let text = String::from_utf8_lossy(der);
    ORG_ID_PATTERN
        .captures(&text)
        .map(|captures| captures[1].to_string())
        .filter(|identifier| !identifier.is_empty())
}

fn identifier_from_der(der: &[u8]) -> Option<String> {
    let (_, certificate) = parse_x509_certificate(der).ok()?;
    certificate
        .subject()
        .iter_attributes()
        .find(|attribute| *attribute.attr_type() == oid!(2.5.4.97))
        .and_then(|attribute| attribute.as_str().ok())
        .map(str::to_string)
        .filter(|identifier| !identifier.is_empty())
}

/// Splits an RFC 4514-style DN string into its attribute map, e.g.
/// `"CN=Seal,O=Org,C=ES"` into `{CN: Seal, O: Org, C: ES}`.
pub fn parse_dn_attributes(dn: &str) -> HashMap<String, String> {
    dn.split(',')
        .filter_map(|component| component.split_once('='))
        .map(|(key, value)| (key.trim().to_string(), value.trim().to_string()))
        .collect()
}
