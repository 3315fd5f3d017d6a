use regex::Regex;
use lazy_static::lazy_static;
use crate::utils::{advance, error, quote};
use crate::error::RegistryError;

lazy_static! {
    pub static ref TOKEN_REGEX: Regex = Regex::new(
        r#"(<!--[\s\S]*?-->|<\?[\s\S]*?\?>|<!\[CDATA\[[\s\S]*?\]\]>|<![A-Za-z][^>\[]*(?:\[[\s\S]*?\]\s*)?>|</[^>]*>|<[A-Za-z_:][^>"']*(?:(?:"[^"]*"|'[^']*')[^>"']*)*>|[^<]+)"#
    ).unwrap();
    static ref START_TAG: Regex = Regex::new(r"^<([A-Za-z_:][-A-Za-z0-9_:.]*)([\s\S]*?)(/?)>$").unwrap();
    static ref END_TAG:   Regex = Regex::new(r"^</([A-Za-z_:][-A-Za-z0-9_:.]*)\s*>$").unwrap();
    static ref ATTRIBUTE: Regex = Regex::new(r#"^\s+([A-Za-z_:][-A-Za-z0-9_:.]*)\s*=\s*(?:"([^"]*)"|'([^']*)')"#).unwrap();
    static ref ENTITY:    Regex = Regex::new(r"&(#x[0-9A-Fa-f]+|#[0-9]+|[A-Za-z]+);").unwrap();
}

#[derive(Debug, Clone, PartialEq)]
pub struct Attribute {
    pub name:  String,
    pub value: String,
}

#[derive(Debug, Clone, PartialEq)]
pub enum TokenKind {
    /// `<?xml ...?>` and other processing instructions.
    Declaration,
    Comment,
    CData,
    Doctype,
    StartTag {
        name:         String,
        attributes:   Vec<Attribute>,
        self_closing: bool,
    },
    EndTag {
        name: String,
    },
    Text,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    pub kind:   TokenKind,
    pub text:   String,
    pub line:   usize,
    pub column: usize,
}

impl Token {
    pub fn attribute(&self, name: &str) -> Option<&str> {
        match &self.kind {
            TokenKind::StartTag { attributes, .. } => attributes
                .iter()
                .find(|a| a.name == name)
                .map(|a| a.value.as_str()),
            _ => None,
        }
    }
}

/// Splits a schema document into markup and character-data tokens.
pub fn tokenize_schema(text: &str) -> Result<Vec<Token>, RegistryError> {
    let mut tokens = Vec::new();
    let mut line = 1;
    let mut column = 1;
    let mut last_end = 0;

    for mat in TOKEN_REGEX.find_iter(text) {
        let start = mat.start();
        let part  = mat.as_str();

        if start > last_end {
            let unexpected = &text[last_end..start];
            return Err(error(
                &format!("Syntax error: {}", quote(unexpected)),
                line,
                column,
            ));
        }

        let kind = classify(part, line, column)?;
        tokens.push(Token {
            kind,
            text: part.to_string(),
            line,
            column,
        });

        advance(&mut line, &mut column, part);
        last_end = mat.end();
    }

    if last_end != text.len() {
        let unexpected = &text[last_end..];
        return Err(error(
            &format!("Syntax error: {}", quote(unexpected)),
            line,
            column,
        ));
    }

    Ok(tokens)
}

fn classify(part: &str, line: usize, column: usize) -> Result<TokenKind, RegistryError> {
    if part.starts_with("<!--") {
        Ok(TokenKind::Comment)
    } else if part.starts_with("<?") {
        Ok(TokenKind::Declaration)
    } else if part.starts_with("<![CDATA[") {
        Ok(TokenKind::CData)
    } else if part.starts_with("<!") {
        Ok(TokenKind::Doctype)
    } else if part.starts_with("</") {
        let caps = END_TAG
            .captures(part)
            .ok_or_else(|| error(&format!("Malformed end tag {}", quote(part)), line, column))?;
        Ok(TokenKind::EndTag { name: caps[1].to_string() })
    } else if part.starts_with('<') {
        let caps = START_TAG
            .captures(part)
            .ok_or_else(|| error(&format!("Malformed start tag {}", quote(part)), line, column))?;
        let attributes = parse_attributes(&caps[2], line, column)?;
        Ok(TokenKind::StartTag {
            name: caps[1].to_string(),
            attributes,
            self_closing: !caps[3].is_empty(),
        })
    } else {
        Ok(TokenKind::Text)
    }
}

fn parse_attributes(mut rest: &str, line: usize, column: usize) -> Result<Vec<Attribute>, RegistryError> {
    let mut attributes: Vec<Attribute> = Vec::new();

    while !rest.trim().is_empty() {
        let caps = ATTRIBUTE
            .captures(rest)
            .ok_or_else(|| error(&format!("Malformed attribute {}", quote(rest.trim())), line, column))?;
        let name = caps[1].to_string();
        let raw = caps.get(2).or_else(|| caps.get(3)).map_or("", |m| m.as_str());

        if attributes.iter().any(|a| a.name == name) {
            return Err(error(
                &format!("Attribute {} is given twice", quote(&name)),
                line,
                column,
            ));
        }
        if raw.contains('<') {
            return Err(error(
                &format!("Attribute {} contains \"<\"", quote(&name)),
                line,
                column,
            ));
        }

        let value = decode_entities(raw, line, column)?;
        attributes.push(Attribute { name, value });

        let consumed = caps.get(0).map_or(rest.len(), |m| m.end());
        rest = &rest[consumed..];
    }

    Ok(attributes)
}

/// Replaces predefined entities and character references in an attribute value.
pub fn decode_entities(raw: &str, line: usize, column: usize) -> Result<String, RegistryError> {
    let mut decoded = String::with_capacity(raw.len());
    let mut last_end = 0;

    for caps in ENTITY.captures_iter(raw) {
        let Some(whole) = caps.get(0) else { continue };
        let before = &raw[last_end..whole.start()];
        if before.contains('&') {
            return Err(error("Unescaped \"&\" in attribute value", line, column));
        }
        decoded.push_str(before);

        let ch = resolve_entity(&caps[1]).ok_or_else(|| {
            error(&format!("Unknown entity {}", quote(whole.as_str())), line, column)
        })?;
        decoded.push(ch);
        last_end = whole.end();
    }

    let tail = &raw[last_end..];
    if tail.contains('&') {
        return Err(error("Unescaped \"&\" in attribute value", line, column));
    }
    decoded.push_str(tail);
    Ok(decoded)
}

fn resolve_entity(body: &str) -> Option<char> {
    match body {
        "amp"  => Some('&'),
        "lt"   => Some('<'),
        "gt"   => Some('>'),
        "quot" => Some('"'),
        "apos" => Some('\''),
        _ => {
            let code = if let Some(hex) = body.strip_prefix("#x") {
                u32::from_str_radix(hex, 16).ok()?
            } else if let Some(dec) = body.strip_prefix('#') {
                dec.parse::<u32>().ok()?
            } else {
                return None;
            };
            char::from_u32(code)
        }
    }
}
