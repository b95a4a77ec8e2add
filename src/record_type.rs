//! Sierra record type codes.
//!
//! A record type code is the single letter that prefixes a record key
//! (`b` for bibs, `i` for items, ...). Only a subset of the types can be
//! addressed through the REST API, where they appear under their plural
//! resource names ([`ApiRecordType`]).

use std::fmt;
use std::str::FromStr;

/// Every record type code Sierra knows about.
pub const RECORD_TYPE_CODES: [char; 13] = [
    'b', 'o', 'i', 'c', 'a', 'p', 'r', 'n', 'v', 'e', 'l', 't', 'j',
];

/// Record type codes the REST API can address.
pub const API_RECORD_TYPE_CODES: [char; 6] = ['a', 'b', 'n', 'i', 'o', 'p'];

/// Is `code` a record type code, optionally restricted to the API-compatible subset?
#[must_use]
pub fn is_valid_record_type_code(code: char, api_compatible_only: bool) -> bool {
    if api_compatible_only {
        API_RECORD_TYPE_CODES.contains(&code)
    } else {
        RECORD_TYPE_CODES.contains(&code)
    }
}

/// Regex character class matching every record type code, e.g. `[boic...]`.
pub(crate) fn record_type_code_class() -> String {
    let mut class = String::with_capacity(RECORD_TYPE_CODES.len() + 2);
    class.push('[');
    class.extend(RECORD_TYPE_CODES);
    class.push(']');
    class
}

/// Regex alternation matching every API record type name.
pub(crate) fn api_record_type_alternation() -> String {
    ApiRecordType::ALL
        .iter()
        .map(|t| t.as_str())
        .collect::<Vec<_>>()
        .join("|")
}

/// A record type as named by the REST API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ApiRecordType {
    /// `authorities` (`a`)
    Authorities,
    /// `bibs` (`b`)
    Bibs,
    /// `invoices` (`n`)
    Invoices,
    /// `items` (`i`)
    Items,
    /// `orders` (`o`)
    Orders,
    /// `patrons` (`p`)
    Patrons,
}

impl ApiRecordType {
    /// All API record types.
    pub const ALL: [ApiRecordType; 6] = [
        ApiRecordType::Authorities,
        ApiRecordType::Bibs,
        ApiRecordType::Invoices,
        ApiRecordType::Items,
        ApiRecordType::Orders,
        ApiRecordType::Patrons,
    ];

    /// The URL path segment.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            ApiRecordType::Authorities => "authorities",
            ApiRecordType::Bibs => "bibs",
            ApiRecordType::Invoices => "invoices",
            ApiRecordType::Items => "items",
            ApiRecordType::Orders => "orders",
            ApiRecordType::Patrons => "patrons",
        }
    }

    /// The single-letter record type code.
    #[must_use]
    pub fn record_type_code(self) -> char {
        match self {
            ApiRecordType::Authorities => 'a',
            ApiRecordType::Bibs => 'b',
            ApiRecordType::Invoices => 'n',
            ApiRecordType::Items => 'i',
            ApiRecordType::Orders => 'o',
            ApiRecordType::Patrons => 'p',
        }
    }

    /// Map a record type code to its API type, `None` if the API does not support it.
    #[must_use]
    pub fn from_record_type_code(code: char) -> Option<Self> {
        ApiRecordType::ALL
            .into_iter()
            .find(|t| t.record_type_code() == code)
    }
}

impl TryFrom<char> for ApiRecordType {
    type Error = String;

    fn try_from(code: char) -> Result<Self, Self::Error> {
        ApiRecordType::from_record_type_code(code)
            .ok_or_else(|| format!("The API does not support records of type {code}"))
    }
}

impl FromStr for ApiRecordType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ApiRecordType::ALL
            .into_iter()
            .find(|t| t.as_str() == s)
            .ok_or_else(|| format!("Cannot convert record type to a record type code: {s}"))
    }
}

impl fmt::Display for ApiRecordType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_api_subset_is_contained_in_full_alphabet() {
        for code in API_RECORD_TYPE_CODES {
            assert!(is_valid_record_type_code(code, false));
            assert!(is_valid_record_type_code(code, true));
            assert!(ApiRecordType::from_record_type_code(code).is_some());
        }
        for code in ['c', 'r', 'v', 'e', 'l', 't', 'j'] {
            assert!(is_valid_record_type_code(code, false));
            assert!(!is_valid_record_type_code(code, true));
        }
        assert!(!is_valid_record_type_code('z', false));
    }

    #[test]
    fn test_api_record_type_mapping() {
        assert_eq!("invoices".parse::<ApiRecordType>(), Ok(ApiRecordType::Invoices));
        assert_eq!(ApiRecordType::Invoices.record_type_code(), 'n');
        assert_eq!(ApiRecordType::try_from('p'), Ok(ApiRecordType::Patrons));
        assert_eq!(
            ApiRecordType::try_from('c'),
            Err("The API does not support records of type c".to_string())
        );
        assert!("bib".parse::<ApiRecordType>().is_err());
    }

    #[test]
    fn test_regex_fragments() {
        assert_eq!(record_type_code_class(), "[boicaprnveltj]");
        assert_eq!(
            api_record_type_alternation(),
            "authorities|bibs|invoices|items|orders|patrons"
        );
    }
}
