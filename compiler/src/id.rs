use serde::Serialize;

use crate::error::RegistryError;

/// How the hex `id` attribute is turned into the emitted byte sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub enum IdDecoding {
    /// Omit the first byte group, as registries generated so far have always done.
    #[default]
    DropLeadingByte,
    /// Keep every byte of the id (`0x1A45DFA3` becomes `1A 45 DF A3`).
    Full,
}

/// Decodes `id` (optionally `0x`-prefixed) as two-digit hex byte groups.
pub fn encode_id(id: &str, decoding: IdDecoding) -> Result<Vec<u8>, RegistryError> {
    let malformed = |reason: &str| RegistryError::MalformedId {
        id:     id.to_string(),
        reason: reason.to_string(),
    };

    let digits = id
        .strip_prefix("0x")
        .or_else(|| id.strip_prefix("0X"))
        .unwrap_or(id);

    if digits.is_empty() {
        return Err(malformed("no hex digits"));
    }
    if let Some(bad) = digits.chars().find(|c| !c.is_ascii_hexdigit()) {
        return Err(malformed(&format!("{:?} is not a hex digit", bad)));
    }
    if digits.len() % 2 != 0 {
        return Err(malformed("odd number of hex digits"));
    }

    let skip = match decoding {
        IdDecoding::DropLeadingByte => 1,
        IdDecoding::Full            => 0,
    };

    digits
        .as_bytes()
        .chunks(2)
        .skip(skip)
        .map(|pair| {
            std::str::from_utf8(pair)
                .ok()
                .and_then(|s| u8::from_str_radix(s, 16).ok())
                .ok_or_else(|| malformed("invalid byte group"))
        })
        .collect()
}

/// Formats id bytes the way diagnostics print them, e.g. `0x45DFA3`.
pub fn format_id(bytes: &[u8]) -> String {
    let hex: String = bytes.iter().map(|b| format!("{:02X}", b)).collect();
    format!("0x{}", hex)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_drop_leading_byte() {
        assert_eq!(
            encode_id("0x1A45DFA3", IdDecoding::DropLeadingByte).unwrap(),
            vec![0x45, 0xDF, 0xA3]
        );
        assert_eq!(
            encode_id("1A45DFA3", IdDecoding::DropLeadingByte).unwrap(),
            vec![0x45, 0xDF, 0xA3]
        );
        assert!(encode_id("0xEC", IdDecoding::DropLeadingByte).unwrap().is_empty());
    }

    #[test]
    fn test_full_decoding() {
        assert_eq!(
            encode_id("0x1A45DFA3", IdDecoding::Full).unwrap(),
            vec![0x1A, 0x45, 0xDF, 0xA3]
        );
        assert_eq!(encode_id("0Xec", IdDecoding::Full).unwrap(), vec![0xEC]);
    }

    #[test]
    fn test_malformed_ids() {
        for id in ["", "0x", "0x1A4", "0x1G45", "0x1A45DFAZ", "0x 1A"] {
            for decoding in [IdDecoding::DropLeadingByte, IdDecoding::Full] {
                let err = encode_id(id, decoding).unwrap_err();
                assert!(
                    matches!(&err, RegistryError::MalformedId { id: got, .. } if got == id),
                    "{:?} should be malformed, got {:?}",
                    id,
                    err
                );
            }
        }
    }

    #[test]
    fn test_format_id() {
        assert_eq!(format_id(&[0x45, 0xDF, 0xA3]), "0x45DFA3");
        assert_eq!(format_id(&[]), "0x");
    }
}
