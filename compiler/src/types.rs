use serde::Serialize;
use std::fmt;
use std::str::FromStr;

use crate::error::RegistryError;

/// One `<element>` node of the schema document, as written by its author.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ElementDefinition {
    pub id:     String,
    pub name:   String,
    pub type_:  String,
    pub level:  i32,
    pub line:   usize,
    pub column: usize,
}

/// The compiled form of an [`ElementDefinition`].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RegistryEntry {
    pub target:     TargetType,
    pub identifier: String,
    pub id_bytes:   Vec<u8>,
    pub level:      i32,
    pub line:       usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum TargetType {
    BinaryElement,
    SignedIntegerElement,
    UnsignedIntegerElement,
    MasterElement,
    Utf8StringElement,
    StringElement,
    FloatElement,
    DateElement,
}

impl TargetType {
    /// Every target type, in the order the emitters import them.
    pub const ALL: [TargetType; 8] = [
        TargetType::BinaryElement,
        TargetType::SignedIntegerElement,
        TargetType::UnsignedIntegerElement,
        TargetType::MasterElement,
        TargetType::Utf8StringElement,
        TargetType::StringElement,
        TargetType::FloatElement,
        TargetType::DateElement,
    ];

    /// Name of the element type in the generated registry.
    pub fn type_name(self) -> &'static str {
        match self {
            TargetType::BinaryElement          => "BinaryElement",
            TargetType::SignedIntegerElement   => "SignedIntegerElement",
            TargetType::UnsignedIntegerElement => "UnsignedIntegerElement",
            TargetType::MasterElement          => "MasterElement",
            TargetType::Utf8StringElement      => "UTF8StringElement",
            TargetType::StringElement          => "StringElement",
            TargetType::FloatElement           => "FloatElement",
            TargetType::DateElement            => "DateElement",
        }
    }
}

impl FromStr for TargetType {
    type Err = RegistryError;

    fn from_str(keyword: &str) -> Result<Self, Self::Err> {
        match keyword {
            "binary"                        => Ok(TargetType::BinaryElement),
            "integer"                       => Ok(TargetType::SignedIntegerElement),
            "unsigned-integer" | "uinteger" => Ok(TargetType::UnsignedIntegerElement),
            "master"                        => Ok(TargetType::MasterElement),
            "utf-8-string" | "utf-8"        => Ok(TargetType::Utf8StringElement),
            "string"                        => Ok(TargetType::StringElement),
            "float"                         => Ok(TargetType::FloatElement),
            "date"                          => Ok(TargetType::DateElement),
            other                           => Err(RegistryError::UnknownType(other.to_string())),
        }
    }
}

impl fmt::Display for TargetType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.type_name())
    }
}

/// Looks up a schema type keyword. Unrecognized keywords are fatal for the run.
pub fn resolve_type(keyword: &str) -> Result<TargetType, RegistryError> {
    keyword.parse()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_every_keyword() {
        let table = [
            ("binary",           "BinaryElement"),
            ("integer",          "SignedIntegerElement"),
            ("unsigned-integer", "UnsignedIntegerElement"),
            ("master",           "MasterElement"),
            ("utf-8-string",     "UTF8StringElement"),
            ("string",           "StringElement"),
            ("float",            "FloatElement"),
            ("date",             "DateElement"),
        ];
        for (keyword, name) in table {
            assert_eq!(resolve_type(keyword).unwrap().type_name(), name, "keyword {}", keyword);
        }
    }

    #[test]
    fn test_resolve_matroska_table_keywords() {
        assert_eq!(resolve_type("uinteger").unwrap(), TargetType::UnsignedIntegerElement);
        assert_eq!(resolve_type("utf-8").unwrap(), TargetType::Utf8StringElement);
    }

    #[test]
    fn test_resolve_unknown_keyword() {
        let err = resolve_type("unknown-type").unwrap_err();
        assert!(
            matches!(&err, RegistryError::UnknownType(k) if k == "unknown-type"),
            "expected UnknownType but got {:?}",
            err
        );
        // Keywords are case sensitive.
        assert!(resolve_type("Master").is_err());
    }
}
