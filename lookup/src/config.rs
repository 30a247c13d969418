/// Parameters shared by the prover and the verifier of a lookup proof.
///
/// Both sides must use the same configuration: the domain separator is absorbed
/// into every Fiat-Shamir challenge.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlookupConfig {
    /// Bytes absorbed into every challenge of the protocol transcript.
    pub domain_separator: Vec<u8>,
    /// Whether the prover rejects queries missing from the table before committing.
    pub check_membership: bool,
}

impl Default for PlookupConfig {
    fn default() -> Self {
        Self {
            domain_separator: b"plookup".to_vec(),
            check_membership: true,
        }
    }
}

impl PlookupConfig {
    pub fn with_domain_separator(mut self, separator: impl Into<Vec<u8>>) -> Self {
        self.domain_separator = separator.into();
        self
    }

    pub fn with_membership_check(mut self, check: bool) -> Self {
        self.check_membership = check;
        self
    }
}
