//! Minimal tag scanner for outline markup.
//!
//! Only the structure the outline subset needs is recognised: elements with
//! attributes, closing tags, self-closing tags, comments, processing
//! instructions and declarations. Text content is skipped. Elements must nest
//! properly, otherwise the whole document is rejected.

use thiserror::Error;

/// Structural markup errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MarkupError {
    #[error("Unterminated tag at byte {0}")]
    UnterminatedTag(usize),
    #[error("Unterminated comment at byte {0}")]
    UnterminatedComment(usize),
    #[error("Unterminated attribute value at byte {0}")]
    UnterminatedAttribute(usize),
    #[error("Closing tag </{found}> does not match <{expected}>")]
    MismatchedTag { expected: String, found: String },
    #[error("Closing tag </{0}> without an open element")]
    UnexpectedClose(String),
    #[error("Element <{0}> is never closed")]
    Unclosed(String),
    #[error("Document contains no elements")]
    Empty,
}

/// A start (or self-closing) tag with its attributes in source order.
#[derive(Debug, Clone, PartialEq)]
pub struct Element<'a> {
    pub name: &'a str,
    pub attributes: Vec<(&'a str, &'a str)>,
    /// Nesting depth, 0 for the root element.
    pub depth: usize,
}

impl<'a> Element<'a> {
    /// Look up an attribute value by exact name.
    pub fn attr(&self, name: &str) -> Option<&'a str> {
        self.attributes
            .iter()
            .find(|(key, _)| *key == name)
            .map(|(_, value)| *value)
    }
}

/// Scan a document and return every element in document order.
pub fn scan_elements(source: &str) -> Result<Vec<Element<'_>>, MarkupError> {
    let bytes = source.as_bytes();
    let mut elements = Vec::new();
    let mut open: Vec<&str> = Vec::new();
    let mut pos = 0;

    while let Some(rel) = source[pos..].find('<') {
        let start = pos + rel;
        let rest = &source[start..];

        if rest.starts_with("<!--") {
            let end = rest[4..]
                .find("-->")
                .ok_or(MarkupError::UnterminatedComment(start))?;
            pos = start + 4 + end + 3;
            continue;
        }
        if rest.starts_with("<?") {
            let end = rest.find("?>").ok_or(MarkupError::UnterminatedTag(start))?;
            pos = start + end + 2;
            continue;
        }
        if rest.starts_with("<!") {
            let end = rest.find('>').ok_or(MarkupError::UnterminatedTag(start))?;
            pos = start + end + 1;
            continue;
        }
        if let Some(after) = rest.strip_prefix("</") {
            let end = after.find('>').ok_or(MarkupError::UnterminatedTag(start))?;
            let name = after[..end].trim();
            match open.pop() {
                Some(expected) if expected == name => {}
                Some(expected) => {
                    return Err(MarkupError::MismatchedTag {
                        expected: expected.to_string(),
                        found: name.to_string(),
                    });
                }
                None => return Err(MarkupError::UnexpectedClose(name.to_string())),
            }
            pos = start + 2 + end + 1;
            continue;
        }

        // Start tag.
        let mut cursor = start + 1;
        let name_end = scan_name(bytes, cursor);
        if name_end == cursor {
            return Err(MarkupError::UnterminatedTag(start));
        }
        let name = &source[cursor..name_end];
        cursor = name_end;

        let mut attributes = Vec::new();
        let self_closing;
        loop {
            cursor = skip_whitespace(bytes, cursor);
            match bytes.get(cursor) {
                None => return Err(MarkupError::UnterminatedTag(start)),
                Some(b'>') => {
                    self_closing = false;
                    cursor += 1;
                    break;
                }
                Some(b'/') if bytes.get(cursor + 1) == Some(&b'>') => {
                    self_closing = true;
                    cursor += 2;
                    break;
                }
                Some(_) => {
                    let key_end = scan_name(bytes, cursor);
                    if key_end == cursor {
                        return Err(MarkupError::UnterminatedTag(start));
                    }
                    let key = &source[cursor..key_end];
                    cursor = skip_whitespace(bytes, key_end);
                    if bytes.get(cursor) != Some(&b'=') {
                        // Valueless attribute, tolerated and ignored.
                        continue;
                    }
                    cursor = skip_whitespace(bytes, cursor + 1);
                    let (value, next) = scan_value(source, cursor)?;
                    attributes.push((key, value));
                    cursor = next;
                }
            }
        }

        elements.push(Element {
            name,
            attributes,
            depth: open.len(),
        });
        if !self_closing {
            open.push(name);
        }
        pos = cursor;
    }

    if let Some(name) = open.pop() {
        return Err(MarkupError::Unclosed(name.to_string()));
    }
    if elements.is_empty() {
        return Err(MarkupError::Empty);
    }
    Ok(elements)
}

fn skip_whitespace(bytes: &[u8], mut pos: usize) -> usize {
    while bytes.get(pos).is_some_and(|b| b.is_ascii_whitespace()) {
        pos += 1;
    }
    pos
}

fn scan_name(bytes: &[u8], mut pos: usize) -> usize {
    while let Some(&b) = bytes.get(pos) {
        if b.is_ascii_whitespace() || matches!(b, b'>' | b'/' | b'=' | b'<' | b'"' | b'\'') {
            break;
        }
        pos += 1;
    }
    pos
}

fn scan_value(source: &str, pos: usize) -> Result<(&str, usize), MarkupError> {
    let bytes = source.as_bytes();
    match bytes.get(pos) {
        Some(&quote) if quote == b'"' || quote == b'\'' => {
            let body = pos + 1;
            let len = source[body..]
                .find(quote as char)
                .ok_or(MarkupError::UnterminatedAttribute(pos))?;
            Ok((&source[body..body + len], body + len + 1))
        }
        Some(_) => {
            let end = scan_name(bytes, pos);
            Ok((&source[pos..end], end))
        }
        None => Err(MarkupError::UnterminatedAttribute(pos)),
    }
}
