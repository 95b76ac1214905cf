/// Certificate and signing-key metadata recovered from the QTSP
/// `credentials/info` response. Read-only, built once per signing or
/// identity-resolution call.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct CertificateInfo {
    /// Base64 DER certificates, leaf first.
    pub certificates: Vec<String>,
    pub issuer_dn: String,
    pub subject_dn: String,
    pub serial_number: String,
    pub valid_from: String,
    pub valid_to: String,
    /// Signature algorithm OIDs supported by the signing key.
    pub key_algorithms: Vec<String>,
    pub key_length: Option<u32>,
}
