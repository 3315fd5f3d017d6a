use crate::error::RegistryError;

/// Quotes `text` as a double-quoted string literal with JSON escapes.
pub fn quote(text: &str) -> String {
    serde_json::to_string(text).unwrap_or_else(|_| format!("{:?}", text))
}

pub fn error(msg: &str, line: usize, column: usize) -> RegistryError {
    RegistryError::SchemaParse {
        msg: msg.to_string(),
        line,
        column,
    }
}

/// Advances a 1-based `(line, column)` position past `text`.
pub fn advance(line: &mut usize, column: &mut usize, text: &str) {
    let newline_count = text.matches('\n').count();
    if newline_count > 0 {
        *line += newline_count;
        if let Some(last_line_part) = text.split('\n').last() {
            *column = last_line_part.chars().count() + 1;
        }
    } else {
        *column += text.chars().count();
    }
}
