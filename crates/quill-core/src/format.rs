//! Markdown-style formatting for the admin editor toolbar.

use std::str::FromStr;

/// Toolbar action applied around a selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormatTag {
    Bold,
    Italic,
    Heading,
    Quote,
}

impl FormatTag {
    pub fn as_str(&self) -> &'static str {
        match self {
            FormatTag::Bold => "bold",
            FormatTag::Italic => "italic",
            FormatTag::Heading => "heading",
            FormatTag::Quote => "quote",
        }
    }

    /// Wrap `selected` with this tag's markup.
    pub fn wrap(&self, selected: &str) -> String {
        match self {
            FormatTag::Bold => format!("**{selected}**"),
            FormatTag::Italic => format!("*{selected}*"),
            FormatTag::Heading => format!("# {selected}"),
            FormatTag::Quote => format!("> {selected}"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown format tag: {0}")]
pub struct UnknownFormatTag(pub String);

impl FromStr for FormatTag {
    type Err = UnknownFormatTag;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "bold" => Ok(FormatTag::Bold),
            "italic" => Ok(FormatTag::Italic),
            "heading" => Ok(FormatTag::Heading),
            "quote" => Ok(FormatTag::Quote),
            other => Err(UnknownFormatTag(other.to_string())),
        }
    }
}

/// Apply `tag` to the `start..end` selection of `text` and return the new text.
///
/// Offsets count characters, not bytes. Offsets past the end are clamped and a
/// reversed range is treated as if it were given the right way round. An
/// unknown tag returns `text` unchanged.
pub fn apply_format(text: &str, start: usize, end: usize, tag: &str) -> String {
    match tag.parse::<FormatTag>() {
        Ok(tag) => apply_tag(text, start, end, tag),
        Err(_) => text.to_string(),
    }
}

pub fn apply_tag(text: &str, start: usize, end: usize, tag: FormatTag) -> String {
    let (start, end) = if start <= end { (start, end) } else { (end, start) };
    let start = byte_offset(text, start);
    let end = byte_offset(text, end);

    let wrapped = tag.wrap(&text[start..end]);
    let mut out = String::with_capacity(text.len() + wrapped.len() - (end - start));
    out.push_str(&text[..start]);
    out.push_str(&wrapped);
    out.push_str(&text[end..]);
    out
}

fn byte_offset(text: &str, chars: usize) -> usize {
    text.char_indices()
        .nth(chars)
        .map(|(idx, _)| idx)
        .unwrap_or(text.len())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bold_wraps_selection() {
        assert_eq!(apply_format("hello world", 6, 11, "bold"), "hello **world**");
    }

    #[test]
    fn test_empty_selection_inserts_markup() {
        assert_eq!(apply_format("hello world", 5, 5, "heading"), "hello#  world");
        assert_eq!(apply_format("hello", 5, 5, "italic"), "hello**");
    }

    #[test]
    fn test_selection_at_start() {
        assert_eq!(apply_format("hello world", 0, 5, "quote"), "> hello world");
        assert_eq!(apply_format("hello world", 0, 0, "bold"), "****hello world");
    }

    #[test]
    fn test_selection_to_end() {
        assert_eq!(apply_format("hello world", 0, 11, "italic"), "*hello world*");
        assert_eq!(apply_format("title", 0, 5, "heading"), "# title");
    }

    #[test]
    fn test_unknown_tag_is_noop() {
        assert_eq!(apply_format("hello world", 0, 5, "strike"), "hello world");
        assert_eq!(apply_format("hello world", 0, 5, "Bold"), "hello world");
    }

    #[test]
    fn test_empty_text() {
        assert_eq!(apply_format("", 0, 0, "quote"), "> ");
    }

    #[test]
    fn test_offsets_count_characters() {
        assert_eq!(apply_format("café au lait", 0, 4, "bold"), "**café** au lait");
    }

    #[test]
    fn test_out_of_range_and_reversed_offsets() {
        assert_eq!(apply_format("abc", 1, 99, "bold"), "a**bc**");
        assert_eq!(apply_format("abc", 2, 0, "italic"), "*ab*c");
    }

    #[test]
    fn test_tag_round_trips_through_str() {
        for tag in [
            FormatTag::Bold,
            FormatTag::Italic,
            FormatTag::Heading,
            FormatTag::Quote,
        ] {
            assert_eq!(tag.as_str().parse::<FormatTag>(), Ok(tag));
        }
    }
}
