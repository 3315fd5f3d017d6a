use std::fs;
use std::path::Path;

use serde::Serialize;
use tracing::{debug, info};

use crate::{
    emit::{emit_registry, EmitOptions},
    error::RegistryError,
    id::{encode_id, format_id, IdDecoding},
    parser::parse_schema,
    tokenizer::tokenize_schema,
    types::{resolve_type, ElementDefinition, RegistryEntry},
    verifier::{sanitize_name, validate_identifier, verify_entries},
};

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct CompileOptions {
    pub id_decoding:         IdDecoding,
    /// Reject schemas where two elements decode to the same binary id.
    pub check_duplicate_ids: bool,
    pub emit:                EmitOptions,
}

/// Parse schema text into its element definitions, in document order.
/// A leading byte-order mark is skipped.
pub fn parse_definitions(text: &str) -> Result<Vec<ElementDefinition>, RegistryError> {
    let text = text.strip_prefix('\u{FEFF}').unwrap_or(text);
    let tokens = tokenize_schema(text)?;
    parse_schema(&tokens)
}

/// Read and parse the schema document at `path`.
pub fn load_definitions(path: &Path) -> Result<Vec<ElementDefinition>, RegistryError> {
    let text = fs::read_to_string(path)?;
    let definitions = parse_definitions(&text)?;
    debug!(path = %path.display(), count = definitions.len(), "schema loaded");
    Ok(definitions)
}

/// Map every definition to its registry entry, stopping at the first failure,
/// then check the entries can live together in one registry.
pub fn resolve_entries(
    definitions: &[ElementDefinition],
    options: &CompileOptions,
) -> Result<Vec<RegistryEntry>, RegistryError> {
    let mut entries = Vec::with_capacity(definitions.len());

    for def in definitions {
        let target = resolve_type(&def.type_)?;
        let identifier = sanitize_name(&def.name);
        let id_bytes = encode_id(&def.id, options.id_decoding)?;
        debug!(
            name = %identifier,
            target = %target,
            id = %format_id(&id_bytes),
            level = def.level,
            "resolved element"
        );

        entries.push(RegistryEntry {
            target,
            identifier,
            id_bytes,
            level: def.level,
            line: def.line,
        });
    }

    verify_entries(&entries, options.emit.target.emitter(), options.check_duplicate_ids)?;
    Ok(entries)
}

/// Compile schema text into registry source. Nothing is produced unless
/// every element resolves.
pub fn compile_registry(text: &str, options: &CompileOptions) -> Result<String, RegistryError> {
    validate_identifier(&options.emit.registry_name, options.emit.target.emitter())?;
    let definitions = parse_definitions(text)?;
    finish(&definitions, options)
}

pub fn compile_registry_file(path: &Path, options: &CompileOptions) -> Result<String, RegistryError> {
    validate_identifier(&options.emit.registry_name, options.emit.target.emitter())?;
    let definitions = load_definitions(path)?;
    finish(&definitions, options)
}

fn finish(definitions: &[ElementDefinition], options: &CompileOptions) -> Result<String, RegistryError> {
    let entries = resolve_entries(definitions, options)?;
    let text = emit_registry(&entries, &options.emit);
    info!(
        elements = entries.len(),
        target = %options.emit.target,
        id_decoding = ?options.id_decoding,
        "registry compiled"
    );
    Ok(text)
}
