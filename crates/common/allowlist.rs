//! Allowlist configuration: the ordered set of addresses the mint gate
//! admits, loaded from a JSON file and validated up front.

use std::{collections::HashSet, fs::File, io::BufReader, path::Path};

use serde::Deserialize;

use crate::merkle_tree::hash_leaf;
use crate::{Address, H256};

/// On-disk shape of an allowlist: `{ "addresses": ["0x…", …] }`.
#[derive(Debug, Deserialize)]
struct AllowlistFile {
    addresses: Vec<String>,
}

/// One admitted address, with the spelling used in the allowlist file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AllowlistEntry {
    /// Address exactly as written (minus surrounding whitespace); reports
    /// echo this back rather than a re-encoded form.
    pub text: String,
    pub address: Address,
}

/// A validated allowlist: ordered, non-empty, duplicate-free.
#[derive(Debug, Clone)]
pub struct Allowlist {
    entries: Vec<AllowlistEntry>,
}

#[derive(Debug, thiserror::Error)]
pub enum AllowlistError {
    #[error("Failed to open allowlist file: {0}")]
    File(#[from] std::io::Error),
    #[error("Failed to decode allowlist file: {0}")]
    Decode(#[from] serde_json::Error),
    #[error("Allowlist has no addresses")]
    Empty,
    #[error("Malformed address {0:?}: expected 40 hex digits with optional 0x prefix")]
    MalformedAddress(String),
    #[error("Duplicate address {0:?}")]
    DuplicateAddress(String),
}

impl Allowlist {
    /// Validate an ordered list of address strings.
    ///
    /// Duplicates are detected on the parsed bytes, so the same account
    /// written with different capitalization is still rejected: both
    /// spellings hash to the same leaf and would alias each other's proofs.
    pub fn from_addresses(
        addresses: impl IntoIterator<Item = String>,
    ) -> Result<Self, AllowlistError> {
        let mut entries = Vec::new();
        let mut seen = HashSet::new();
        for raw in addresses {
            let text = raw.trim().to_owned();
            let address =
                parse_address(&text).ok_or_else(|| AllowlistError::MalformedAddress(text.clone()))?;
            if !seen.insert(address) {
                return Err(AllowlistError::DuplicateAddress(text));
            }
            entries.push(AllowlistEntry { text, address });
        }
        if entries.is_empty() {
            return Err(AllowlistError::Empty);
        }
        Ok(Self { entries })
    }

    pub fn entries(&self) -> &[AllowlistEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Leaf digests in allowlist order.
    pub fn leaves(&self) -> Vec<H256> {
        self.entries
            .iter()
            .map(|entry| hash_leaf(&entry.address))
            .collect()
    }
}

impl TryFrom<&Path> for Allowlist {
    type Error = AllowlistError;

    fn try_from(path: &Path) -> Result<Self, Self::Error> {
        let file = File::open(path)?;
        let reader = BufReader::new(file);
        let decoded: AllowlistFile = serde_json::from_reader(reader)?;
        Self::from_addresses(decoded.addresses)
    }
}

fn parse_address(text: &str) -> Option<Address> {
    let digits = text.strip_prefix("0x").unwrap_or(text);
    if digits.len() != 40 {
        return None;
    }
    let mut bytes = [0u8; 20];
    hex::decode_to_slice(digits, &mut bytes).ok()?;
    Some(Address::from(bytes))
}

#[cfg(test)]
mod test {
    use super::*;
    use hex_literal::hex;

    fn owned(addresses: &[&str]) -> Vec<String> {
        addresses.iter().map(|a| a.to_string()).collect()
    }

    #[test]
    fn accepts_prefixed_and_bare_addresses() {
        let allowlist = Allowlist::from_addresses(owned(&[
            "0x617F2E2fD72FD9D5503197092aC168c91465E7f2",
            "4B20993Bc481177ec7E8f571ceCaE8A9e22C02db",
        ]))
        .expect("both spellings are valid");
        assert_eq!(allowlist.len(), 2);
        assert_eq!(
            allowlist.entries()[0].address,
            Address::from(hex!("617F2E2fD72FD9D5503197092aC168c91465E7f2"))
        );
        assert_eq!(
            allowlist.entries()[1].address,
            Address::from(hex!("4B20993Bc481177ec7E8f571ceCaE8A9e22C02db"))
        );
    }

    #[test]
    fn preserves_order_and_original_spelling() {
        let allowlist = Allowlist::from_addresses(owned(&[
            "  0xAb8483F64d9C6d1EcF9b849Ae677dD3315835cb2  ",
            "0x78731D3Ca6b7E34aC0F824c42a7cC18A495cabaB",
        ]))
        .expect("valid allowlist");
        assert_eq!(
            allowlist.entries()[0].text,
            "0xAb8483F64d9C6d1EcF9b849Ae677dD3315835cb2"
        );
        assert_eq!(
            allowlist.entries()[1].text,
            "0x78731D3Ca6b7E34aC0F824c42a7cC18A495cabaB"
        );
    }

    #[test]
    fn rejects_empty_allowlist() {
        assert!(matches!(
            Allowlist::from_addresses(Vec::new()),
            Err(AllowlistError::Empty)
        ));
    }

    #[test]
    fn rejects_wrong_length() {
        assert!(matches!(
            Allowlist::from_addresses(owned(&["0x1234"])),
            Err(AllowlistError::MalformedAddress(_))
        ));
    }

    #[test]
    fn rejects_invalid_hex() {
        assert!(matches!(
            Allowlist::from_addresses(owned(&["0xZZ731D3Ca6b7E34aC0F824c42a7cC18A495cabaB"])),
            Err(AllowlistError::MalformedAddress(_))
        ));
    }

    #[test]
    fn rejects_duplicates_regardless_of_capitalization() {
        let result = Allowlist::from_addresses(owned(&[
            "0x617F2E2fD72FD9D5503197092aC168c91465E7f2",
            "0x617f2e2fd72fd9d5503197092ac168c91465e7f2",
        ]));
        assert!(matches!(result, Err(AllowlistError::DuplicateAddress(_))));
    }

    #[test]
    fn leaves_follow_allowlist_order() {
        let allowlist = Allowlist::from_addresses(owned(&[
            "0x617F2E2fD72FD9D5503197092aC168c91465E7f2",
            "0x4B20993Bc481177ec7E8f571ceCaE8A9e22C02db",
        ]))
        .expect("valid allowlist");
        let leaves = allowlist.leaves();
        assert_eq!(leaves.len(), 2);
        assert_eq!(
            leaves[0],
            H256(hex!(
                "f6d82c545c22b72034803633d3dda2b28e89fb704f3c111355ac43e10612aedc"
            ))
        );
        assert_eq!(
            leaves[1],
            H256(hex!(
                "04a10bfd00977f54cc3450c9b25c9b3a502a089eba0097ba35fc33c4ea5fcb54"
            ))
        );
    }

    #[test]
    fn deserialize_allowlist_file() {
        let allowlist = Allowlist::try_from(Path::new("../../fixtures/allowlists/demo.json"))
            .expect("Failed to load allowlist fixture");
        assert_eq!(allowlist.len(), 4);
        assert_eq!(
            allowlist.entries()[0].text,
            "0x617F2E2fD72FD9D5503197092aC168c91465E7f2"
        );
    }

    #[test]
    fn missing_file_is_an_io_error() {
        let result = Allowlist::try_from(Path::new("../../fixtures/allowlists/absent.json"));
        assert!(matches!(result, Err(AllowlistError::File(_))));
    }
}
