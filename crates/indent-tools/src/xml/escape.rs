//! Markup escaping and entity decoding

use std::borrow::Cow;

/// Escape text content: `&`, `<`, `>` and line breaks
pub fn escape_text(text: &str) -> Cow<'_, str> {
    escape_with(text, |c| match c {
        '&' => Some("&amp;"),
        '<' => Some("&lt;"),
        '>' => Some("&gt;"),
        '\n' => Some("&#10;"),
        '\r' => Some("&#13;"),
        _ => None,
    })
}

/// Escape an attribute value: `&`, `"`, `<` and line breaks
pub fn escape_attribute(value: &str) -> Cow<'_, str> {
    escape_with(value, |c| match c {
        '&' => Some("&amp;"),
        '"' => Some("&quot;"),
        '<' => Some("&lt;"),
        '\n' => Some("&#10;"),
        '\r' => Some("&#13;"),
        _ => None,
    })
}

// Single pass, so `&` introduced by a replacement is never escaped twice.
fn escape_with(input: &str, replace: impl Fn(char) -> Option<&'static str>) -> Cow<'_, str> {
    if !input.chars().any(|c| replace(c).is_some()) {
        return Cow::Borrowed(input);
    }

    let mut out = String::with_capacity(input.len() + 8);
    for c in input.chars() {
        match replace(c) {
            Some(entity) => out.push_str(entity),
            None => out.push(c),
        }
    }
    Cow::Owned(out)
}

/// Whitespace as markup sees it; the renderer and the lexer must agree on it
pub(crate) const fn is_markup_whitespace(c: char) -> bool {
    matches!(c, ' ' | '\t' | '\n' | '\r')
}

/// An entity reference that could not be decoded
#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) struct UnknownEntity {
    pub entity: String,
}

/// Decode `&amp; &lt; &gt; &quot; &apos;` and numeric character references
pub(crate) fn unescape(input: &str) -> Result<Cow<'_, str>, UnknownEntity> {
    if !input.contains('&') {
        return Ok(Cow::Borrowed(input));
    }

    let mut out = String::with_capacity(input.len());
    let mut rest = input;
    while let Some(amp) = rest.find('&') {
        let (head, tail) = rest.split_at(amp);
        out.push_str(head);
        let tail = tail.strip_prefix('&').unwrap_or(tail);

        let Some(end) = tail.find(|c: char| c == ';' || c == '&' || c.is_whitespace()) else {
            return Err(UnknownEntity {
                entity: tail.to_string(),
            });
        };
        let (name, after) = tail.split_at(end);
        let Some(after) = after.strip_prefix(';') else {
            return Err(UnknownEntity {
                entity: name.to_string(),
            });
        };
        let decoded = decode_entity(name).ok_or_else(|| UnknownEntity {
            entity: name.to_string(),
        })?;
        out.push(decoded);
        rest = after;
    }
    out.push_str(rest);

    Ok(Cow::Owned(out))
}

fn decode_entity(name: &str) -> Option<char> {
    match name {
        "amp" => Some('&'),
        "lt" => Some('<'),
        "gt" => Some('>'),
        "quot" => Some('"'),
        "apos" => Some('\''),
        _ => decode_numeric_entity(name),
    }
}

fn decode_numeric_entity(entity: &str) -> Option<char> {
    if let Some(hex) = entity
        .strip_prefix("#x")
        .or_else(|| entity.strip_prefix("#X"))
    {
        u32::from_str_radix(hex, 16).ok().and_then(char::from_u32)
    } else if let Some(dec) = entity.strip_prefix('#') {
        dec.parse::<u32>().ok().and_then(char::from_u32)
    } else {
        None
    }
}
