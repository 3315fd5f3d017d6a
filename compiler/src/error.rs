use thiserror::Error;

#[derive(Debug, Error)]
pub enum RegistryError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Parse error at line {line}, column {column}: {msg}")]
    SchemaParse {
        msg:    String,
        line:   usize,
        column: usize,
    },

    #[error("Element at line {line}, column {column} is missing required attribute \"{attribute}\"")]
    MissingAttribute {
        attribute: String,
        line:      usize,
        column:    usize,
    },

    #[error("Unknown element type \"{0}\"")]
    UnknownType(String),

    #[error("Malformed element id \"{id}\": {reason}")]
    MalformedId {
        id:     String,
        reason: String,
    },

    #[error("Invalid level \"{value}\" for element \"{name}\"")]
    InvalidLevel {
        name:  String,
        value: String,
    },

    #[error("Invalid identifier \"{0}\"")]
    InvalidIdentifier(String),

    #[error("Identifier \"{name}\" is declared twice (lines {first_line} and {second_line})")]
    DuplicateIdentifier {
        name:        String,
        first_line:  usize,
        second_line: usize,
    },

    #[error("Elements \"{first}\" and \"{second}\" share the binary id {id}")]
    DuplicateId {
        id:     String,
        first:  String,
        second: String,
    },
}
