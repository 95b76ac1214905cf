/// DID method prefix for issuers identified by an eIDAS organizationIdentifier.
pub const DID_ELSI: &str = "did:elsi:";

/// Signing identity with the full set of attributes recovered from either the
/// local signer configuration or the QTSP certificate chain.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct DetailedIssuer {
    pub id: String,
    pub organization_identifier: String,
    pub organization: Option<String>,
    pub country: Option<String>,
    pub common_name: Option<String>,
    pub serial_number: String,
}

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct SimpleIssuer {
    pub id: String,
}

impl From<DetailedIssuer> for SimpleIssuer {
    fn from(detailed: DetailedIssuer) -> Self {
        Self { id: detailed.id }
    }
}
