use std::collections::HashMap;

use lazy_static::lazy_static;
use regex::Regex;

use crate::{
    error::RegistryError,
    id::format_id,
    traits::RegistryEmitter,
    types::RegistryEntry,
};

lazy_static! {
    static ref IDENTIFIER: Regex = Regex::new(r"^[A-Za-z_][A-Za-z0-9_]*$").unwrap();
}

/// Turns a schema element name into an identifier by replacing every `-` with `_`.
pub fn sanitize_name(name: &str) -> String {
    name.replace('-', "_")
}

pub fn validate_identifier(name: &str, emitter: &dyn RegistryEmitter) -> Result<(), RegistryError> {
    if !IDENTIFIER.is_match(name) || name == "_" || emitter.reserved_words().contains(&name) {
        return Err(RegistryError::InvalidIdentifier(name.to_string()));
    }
    Ok(())
}

/// Returns `Ok(())` if every entry can be declared side by side in one registry.
pub fn verify_entries(
    entries: &[RegistryEntry],
    emitter: &dyn RegistryEmitter,
    check_ids: bool,
) -> Result<(), RegistryError> {
    let mut names: HashMap<&str, usize> = HashMap::new();
    let mut ids: HashMap<&[u8], &str> = HashMap::new();

    for entry in entries {
        validate_identifier(&entry.identifier, emitter)?;

        if let Some(&first_line) = names.get(entry.identifier.as_str()) {
            return Err(RegistryError::DuplicateIdentifier {
                name:        entry.identifier.clone(),
                first_line,
                second_line: entry.line,
            });
        }
        names.insert(&entry.identifier, entry.line);

        if check_ids {
            if let Some(&first) = ids.get(entry.id_bytes.as_slice()) {
                return Err(RegistryError::DuplicateId {
                    id:     format_id(&entry.id_bytes),
                    first:  first.to_string(),
                    second: entry.identifier.clone(),
                });
            }
            ids.insert(&entry.id_bytes, &entry.identifier);
        }
    }

    Ok(())
}
