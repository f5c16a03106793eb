//! Interface-block extraction.
//!
//! Scans TypeScript-style interface text and produces one [`NamedFieldList`]
//! per top-level brace-delimited block, in source order. The scanner is a
//! tokenizer with bracket-balanced depth counting, deliberately not a
//! TypeScript parser: blocks must be flat `name: type;` field lists. A
//! nested inline object literal inside a field is kept as opaque type text
//! and ends up classified as a reference downstream.
//!
//! Malformed field lines (no identifier, no colon) are silently dropped;
//! the block as a whole still extracts.

use crate::field_list::{FieldDeclaration, NamedFieldList};

/// Header keywords skipped when looking for a block's name.
const HEADER_KEYWORDS: &[&str] = &["export", "declare", "interface", "type", "const"];

/// Extract every top-level named block from `text`.
///
/// A block without a discernible name takes `root_name`. Duplicate names are
/// preserved (the synthesizer lets the later definition shadow the earlier
/// one).
pub fn extract_blocks(text: &str, root_name: &str) -> Vec<NamedFieldList> {
    let chars: Vec<char> = text.chars().collect();
    let mut blocks = Vec::new();
    let mut header_start = 0;
    let mut i = 0;

    while i < chars.len() {
        if chars[i] != '{' {
            i += 1;
            continue;
        }

        let Some(end) = matching_brace(&chars, i) else {
            // Unbalanced tail; nothing more to extract.
            break;
        };

        let header: String = chars[header_start..i].iter().collect();
        let body: String = chars[i + 1..end].iter().collect();

        let mut list =
            NamedFieldList::new(block_name(&header).unwrap_or_else(|| root_name.to_string()));
        list.fields = split_fields(&body);
        blocks.push(list);

        i = end + 1;
        header_start = i;
    }

    blocks
}

/// Index of the `}` matching the `{` at `open`, counting nested braces.
fn matching_brace(chars: &[char], open: usize) -> Option<usize> {
    let mut depth = 0usize;
    for (offset, c) in chars[open..].iter().enumerate() {
        match c {
            '{' => depth += 1,
            '}' => {
                depth -= 1;
                if depth == 0 {
                    return Some(open + offset);
                }
            }
            _ => {}
        }
    }
    None
}

/// Last identifier token in a block header, skipping declaration keywords
/// and punctuation (`export interface Foo`, `type Foo =`).
fn block_name(header: &str) -> Option<String> {
    let mut tokens = Vec::new();
    let mut current = String::new();

    for c in header.chars() {
        if is_identifier_char(c) {
            current.push(c);
        } else if !current.is_empty() {
            tokens.push(std::mem::take(&mut current));
        }
    }
    if !current.is_empty() {
        tokens.push(current);
    }

    tokens
        .into_iter()
        .filter(|token| !HEADER_KEYWORDS.contains(&token.as_str()))
        .filter(|token| is_identifier(token))
        .next_back()
}

/// Split a block body into field declarations.
///
/// Fields terminate at `;` outside any nested bracket; a trailing field
/// without a semicolon is accepted.
fn split_fields(body: &str) -> Vec<FieldDeclaration> {
    let mut fields = Vec::new();
    let mut segment = String::new();
    let mut depth = 0usize;

    for c in body.chars() {
        match c {
            '{' | '[' | '(' | '<' => {
                depth += 1;
                segment.push(c);
            }
            '}' | ']' | ')' | '>' => {
                depth = depth.saturating_sub(1);
                segment.push(c);
            }
            ';' if depth == 0 => {
                if let Some(field) = parse_field(&segment) {
                    fields.push(field);
                }
                segment.clear();
            }
            _ => segment.push(c),
        }
    }

    if let Some(field) = parse_field(&segment) {
        fields.push(field);
    }

    fields
}

/// Parse one `identifier: typeExpression` segment. Returns `None` for
/// malformed segments (dropped silently per the error-handling policy).
///
/// An optional-marker `?` on the identifier is stripped and translated to a
/// null-inclusive union so the field stays out of `required`.
fn parse_field(segment: &str) -> Option<FieldDeclaration> {
    let (name_part, type_part) = segment.split_once(':')?;

    let mut name = name_part.trim();
    let optional = name.ends_with('?');
    if optional {
        name = name[..name.len() - 1].trim_end();
    }
    if !is_identifier(name) {
        return None;
    }

    let mut raw_type = type_part.trim().to_string();
    if raw_type.is_empty() {
        return None;
    }
    if optional && !raw_type.split('|').any(|branch| branch.trim() == "null") {
        raw_type.push_str(" | null");
    }

    Some(FieldDeclaration {
        name: name.to_string(),
        raw_type,
    })
}

fn is_identifier(token: &str) -> bool {
    let mut chars = token.chars();
    match chars.next() {
        Some(first) if first.is_alphabetic() || first == '_' || first == '$' => {
            chars.all(is_identifier_char)
        }
        _ => false,
    }
}

fn is_identifier_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_' || c == '$'
}
