//! ebml-registry-compiler
//!
//! This crate implements:
//!  1) A tokenizer + parser for EBML schema documents (the Matroska element table),
//!  2) Type resolution and binary id decoding for each `<element>`,
//!  3) An identifier verifier (invalid names, reserved words, duplicates),
//!  4) Registry emission for Rust and Java (`emit_registry` → `String`),
//!  5) An all-or-nothing writer for the finished registry, and
//!  6) Error types (`RegistryError`).

pub mod error;
pub mod types;
pub mod utils;
pub mod tokenizer;
pub mod parser;
pub mod id;
pub mod verifier;
pub mod traits;
pub mod emit;
pub mod output;
pub mod compiler;

pub use compiler::{
    compile_registry, compile_registry_file, load_definitions, parse_definitions, resolve_entries,
    CompileOptions,
};
pub use emit::{emit_registry, EmitOptions, Target};
pub use id::{encode_id, IdDecoding};
pub use output::write_registry;
pub use types::resolve_type;
pub use verifier::sanitize_name;
