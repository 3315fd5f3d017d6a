use crate::{
    tokenizer::{Token, TokenKind},
    types::ElementDefinition,
    utils::{error, quote},
    error::RegistryError,
};
use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    static ref INTEGER: Regex = Regex::new(r"^[+-]?\d+$").unwrap();
}

/// Tag name of the nodes that declare elements.
pub const ELEMENT_TAG: &str = "element";

pub const REQUIRED_ATTRIBUTES: [&str; 4] = ["id", "name", "type", "level"];

/// Checks the token stream is a well-formed document and collects every
/// `<element>` node in document order, however deeply it is nested.
pub fn parse_schema(tokens: &[Token]) -> Result<Vec<ElementDefinition>, RegistryError> {
    let mut definitions = Vec::new();
    let mut open: Vec<&Token> = Vec::new();
    let mut root_seen = false;

    for tok in tokens {
        match &tok.kind {
            TokenKind::StartTag { name, self_closing, .. } => {
                if open.is_empty() {
                    if root_seen {
                        return Err(error(
                            &format!("Unexpected second root element {}", quote(name)),
                            tok.line,
                            tok.column,
                        ));
                    }
                    root_seen = true;
                }
                if name == ELEMENT_TAG {
                    definitions.push(parse_definition(tok)?);
                }
                if !self_closing {
                    open.push(tok);
                }
            }

            TokenKind::EndTag { name } => {
                let start = open.pop().ok_or_else(|| {
                    error(
                        &format!("Unexpected end tag {}", quote(name)),
                        tok.line,
                        tok.column,
                    )
                })?;
                if let TokenKind::StartTag { name: open_name, .. } = &start.kind {
                    if open_name != name {
                        return Err(error(
                            &format!(
                                "Expected end tag {} (opened at line {}) but found {}",
                                quote(open_name),
                                start.line,
                                quote(name)
                            ),
                            tok.line,
                            tok.column,
                        ));
                    }
                }
            }

            TokenKind::Text | TokenKind::CData => {
                if open.is_empty() && !tok.text.trim().is_empty() {
                    return Err(error(
                        &format!("Unexpected text {} outside the root element", quote(tok.text.trim())),
                        tok.line,
                        tok.column,
                    ));
                }
            }

            TokenKind::Declaration | TokenKind::Comment | TokenKind::Doctype => {}
        }
    }

    if let Some(unclosed) = open.last() {
        return Err(error(
            &format!("Unclosed tag {}", quote(unclosed.text.as_str())),
            unclosed.line,
            unclosed.column,
        ));
    }
    if !root_seen {
        return Err(error("Document has no root element", 1, 1));
    }

    Ok(definitions)
}

fn parse_definition(tok: &Token) -> Result<ElementDefinition, RegistryError> {
    let [id, name, type_, level] = REQUIRED_ATTRIBUTES.map(|attribute| {
        tok.attribute(attribute).ok_or_else(|| RegistryError::MissingAttribute {
            attribute: attribute.to_string(),
            line:      tok.line,
            column:    tok.column,
        })
    });
    let (id, name, type_, level) = (id?, name?, type_?, level?);

    Ok(ElementDefinition {
        id:     id.to_string(),
        name:   name.to_string(),
        type_:  type_.to_string(),
        level:  parse_level(name, level)?,
        line:   tok.line,
        column: tok.column,
    })
}

/// Levels are integers; `-1` marks global elements that may appear at any depth.
fn parse_level(name: &str, value: &str) -> Result<i32, RegistryError> {
    let invalid = || RegistryError::InvalidLevel {
        name:  name.to_string(),
        value: value.to_string(),
    };
    if !INTEGER.is_match(value) {
        return Err(invalid());
    }
    let level: i32 = value.parse().map_err(|_| invalid())?;
    if level < -1 {
        return Err(invalid());
    }
    Ok(level)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::compiler::parse_definitions;

    fn parse(text: &str) -> Result<Vec<ElementDefinition>, RegistryError> {
        parse_definitions(text)
    }

    #[test]
    fn test_parse_skips_byte_order_mark() {
        let input = "\u{FEFF}<?xml version=\"1.0\"?>\n<table><element name=\"EBML\" level=\"0\" id=\"0x1A45DFA3\" type=\"master\"/></table>";
        let defs = parse(input).unwrap();
        assert_eq!(defs.len(), 1);
        assert_eq!(defs[0].name, "EBML");
        assert_eq!((defs[0].line, defs[0].column), (2, 8));

        // Only a leading mark is skipped.
        let err = parse("<table/>\u{FEFF}").unwrap_err();
        assert!(matches!(err, RegistryError::SchemaParse { .. }), "got {:?}", err);
    }

    #[test]
    fn test_parse_doctype_with_internal_subset() {
        let input = "<?xml version=\"1.0\"?>\n<!DOCTYPE table [ <!ELEMENT table ANY> <!ATTLIST element id CDATA #REQUIRED> ]>\n<table><element name=\"Void\" level=\"-1\" id=\"0xEC\" type=\"binary\"/></table>\n";
        let defs = parse(input).unwrap();
        assert_eq!(defs.len(), 1);
        assert_eq!(defs[0].line, 3);
    }

    #[test]
    fn test_parse_flattens_nested_elements() {
        let input = r#"<?xml version="1.0" encoding="utf-8"?>
<table>
  <element name="EBML" level="0" id="0x1A45DFA3" type="master" mandatory="1">
    Set the EBML characteristics of the data to follow.
    <element name="EBMLVersion" level="1" id="0x4286" type="uinteger" default="1"/>
  </element>
  <group>
    <element name="Segment" level="0" id="0x18538067" type="master"></element>
  </group>
</table>
"#;
        let defs = parse(input).unwrap();
        let names: Vec<&str> = defs.iter().map(|d| d.name.as_str()).collect();
        assert_eq!(names, ["EBML", "EBMLVersion", "Segment"]);

        assert_eq!(defs[1].id, "0x4286");
        assert_eq!(defs[1].type_, "uinteger");
        assert_eq!(defs[1].level, 1);
        assert_eq!((defs[0].line, defs[0].column), (3, 3));
        assert_eq!(defs[2].line, 8);
    }

    #[test]
    fn test_parse_global_level() {
        let defs = parse(r#"<t><element name="Void" level="-1" id="0xEC" type="binary"/></t>"#).unwrap();
        assert_eq!(defs[0].level, -1);
    }

    #[test]
    fn test_parse_missing_attribute() {
        let err = parse(r#"<t><element name="Void" id="0xEC" type="binary"/></t>"#).unwrap_err();
        assert!(
            matches!(&err, RegistryError::MissingAttribute { attribute, line: 1, column: 4 } if attribute == "level"),
            "expected MissingAttribute but got {:?}",
            err
        );
    }

    #[test]
    fn test_parse_invalid_level() {
        for level in ["", "one", "1.5", "-2", "99999999999"] {
            let input = format!(r#"<t><element name="X" level="{}" id="0xEC" type="binary"/></t>"#, level);
            let err = parse(&input).unwrap_err();
            assert!(
                matches!(err, RegistryError::InvalidLevel { .. }),
                "level {:?} should be rejected, got {:?}",
                level,
                err
            );
        }
    }

    #[test]
    fn test_parse_rejects_malformed_documents() {
        for input in [
            "",
            "<a><b></a></b>",
            "<a>",
            "</a>",
            "<a/><b/>",
            "stray<a/>",
            "<a/>stray",
        ] {
            let err = parse(input).unwrap_err();
            assert!(
                matches!(err, RegistryError::SchemaParse { .. }),
                "{:?} should not parse, got {:?}",
                input,
                err
            );
        }
    }
}
