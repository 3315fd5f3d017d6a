use std::fmt;
use std::str::FromStr;

use serde::Serialize;

use crate::{
    traits::RegistryEmitter,
    types::{RegistryEntry, TargetType},
    utils::quote,
};

pub const DEFAULT_REGISTRY_NAME: &str = "MatroskaDocTypes";

/// Strict and reserved keywords; none of them can name a constant.
const RUST_KEYWORDS: [&str; 52] = [
    "as", "break", "const", "continue", "crate", "else",
    "enum", "extern", "false", "fn", "for", "if", "impl",
    "in", "let", "loop", "match", "mod", "move", "mut",
    "pub", "ref", "return", "self", "Self", "static",
    "struct", "super", "trait", "true", "type", "unsafe",
    "use", "where", "while", "async", "await", "dyn",
    "abstract", "become", "box", "do", "final", "macro",
    "override", "priv", "typeof", "unsized", "virtual", "yield",
    "try", "gen",
];

const JAVA_KEYWORDS: [&str; 53] = [
    "abstract", "assert", "boolean", "break", "byte", "case", "catch",
    "char", "class", "const", "continue", "default", "do", "double",
    "else", "enum", "extends", "final", "finally", "float", "for",
    "goto", "if", "implements", "import", "instanceof", "int",
    "interface", "long", "native", "new", "package", "private",
    "protected", "public", "return", "short", "static", "strictfp",
    "super", "switch", "synchronized", "this", "throw", "throws",
    "transient", "try", "void", "volatile", "while", "true", "false",
    "null",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub enum Target {
    #[default]
    Rust,
    Java,
}

impl Target {
    pub fn emitter(self) -> &'static dyn RegistryEmitter {
        match self {
            Target::Rust => &RustEmitter,
            Target::Java => &JavaEmitter,
        }
    }
}

impl FromStr for Target {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "rust" => Ok(Target::Rust),
            "java" => Ok(Target::Java),
            other  => Err(format!("unknown target {} (expected \"rust\" or \"java\")", quote(other))),
        }
    }
}

impl fmt::Display for Target {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Target::Rust => f.write_str("rust"),
            Target::Java => f.write_str("java"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EmitOptions {
    pub target:        Target,
    pub registry_name: String,
}

impl Default for EmitOptions {
    fn default() -> Self {
        EmitOptions {
            target:        Target::Rust,
            registry_name: DEFAULT_REGISTRY_NAME.to_string(),
        }
    }
}

/// Builds the complete registry source in memory. Entries are never
/// reordered or merged.
pub fn emit_registry(entries: &[RegistryEntry], options: &EmitOptions) -> String {
    let emitter = options.target.emitter();
    let mut out = emitter.header(&options.registry_name);
    for entry in entries {
        out.push_str(&emitter.declaration(entry));
        out.push('\n');
    }
    out.push_str(&emitter.footer(&options.registry_name));
    out
}

/// Emits a Rust module: an `impl` block of `ProtoType` constants on a
/// registry struct that only the generated module can construct.
pub struct RustEmitter;

impl RegistryEmitter for RustEmitter {
    fn header(&self, registry: &str) -> String {
        let mut lines = vec![
            "//! EBML element registry.".to_string(),
            "//!".to_string(),
            "//! Generated from the schema element table. Do not edit by hand.".to_string(),
            "".to_string(),
            "#[allow(unused_imports)]".to_string(),
            "use ebml::element::{".to_string(),
        ];
        for target in TargetType::ALL {
            lines.push(format!("    {},", target.type_name()));
        }
        lines.push("};".to_string());
        lines.push("use ebml::ProtoType;".to_string());
        lines.push("".to_string());
        lines.push("#[allow(non_upper_case_globals)]".to_string());
        lines.push(format!("impl {} {{", registry));
        lines.join("\n") + "\n"
    }

    fn declaration(&self, entry: &RegistryEntry) -> String {
        let bytes: Vec<String> = entry.id_bytes.iter().map(|b| format!("0x{:02X}", b)).collect();
        format!(
            "    pub const {name}: ProtoType<{ty}> = ProtoType::new({literal}, &[{bytes}], {level});",
            name = entry.identifier,
            ty = entry.target.type_name(),
            literal = quote(&entry.identifier),
            bytes = bytes.join(", "),
            level = entry.level,
        )
    }

    fn footer(&self, registry: &str) -> String {
        format!(
            "}}\n\n/// Holder of the element prototypes; it cannot be constructed outside this module.\npub struct {} {{\n    _private: (),\n}}\n",
            registry
        )
    }

    fn reserved_words(&self) -> &'static [&'static str] {
        &RUST_KEYWORDS
    }
}

/// Emits the Java class layout consumed by the `org.ebml` reader library.
pub struct JavaEmitter;

impl RegistryEmitter for JavaEmitter {
    fn header(&self, registry: &str) -> String {
        let mut lines = vec![
            "package org.ebml.matroska;".to_string(),
            "/** Matroska spec generated element list document".to_string(),
            "    Do not manually edit this file.".to_string(),
            "*/".to_string(),
            "import org.ebml.ProtoType;".to_string(),
        ];
        for target in TargetType::ALL {
            lines.push(format!("import org.ebml.{};", target.type_name()));
        }
        lines.push("".to_string());
        lines.push(format!("public final class {}", registry));
        lines.push("{".to_string());
        lines.push("".to_string());
        lines.join("\n") + "\n"
    }

    fn declaration(&self, entry: &RegistryEntry) -> String {
        let bytes: Vec<String> = entry
            .id_bytes
            .iter()
            .map(|b| format!("(byte) 0x{:02X}", b))
            .collect();
        let ty = entry.target.type_name();
        format!(
            "  public static final ProtoType<{ty}> {name} = new ProtoType<>({ty}.class, {literal}, new byte[] {{{bytes} }}, {level});",
            ty = ty,
            name = entry.identifier,
            literal = quote(&entry.identifier),
            bytes = bytes.join(", "),
            level = entry.level,
        )
    }

    fn footer(&self, registry: &str) -> String {
        format!("\n  private {}()\n  {{\n  }}\n}}\n", registry)
    }

    fn reserved_words(&self) -> &'static [&'static str] {
        &JAVA_KEYWORDS
    }
}
