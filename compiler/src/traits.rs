use crate::types::RegistryEntry;

/// Renders registry source for one target language.
///
/// A registry is `header`, then one `declaration` line per entry in schema
/// order, then `footer`.
pub trait RegistryEmitter {
    fn header(&self, registry: &str) -> String;
    fn declaration(&self, entry: &RegistryEntry) -> String;
    fn footer(&self, registry: &str) -> String;

    /// Words that cannot be used as identifiers in the emitted source.
    fn reserved_words(&self) -> &'static [&'static str];
}
