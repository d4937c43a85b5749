//! Character classes and column helpers for line editing

/// Character class used by word selection and word deletion
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CharType {
    Whitespace,
    WordChar,
    Punctuation,
}

pub fn char_type(ch: char) -> CharType {
    if ch.is_whitespace() {
        CharType::Whitespace
    } else if ch.is_alphanumeric() || ch == '_' {
        CharType::WordChar
    } else {
        CharType::Punctuation
    }
}

/// Column where a backwards word deletion from `col` stops.
///
/// Skips whitespace, then one run of same-class characters.
pub fn word_start_before(line: &str, col: usize) -> usize {
    let chars: Vec<char> = line.chars().collect();
    let mut i = col.min(chars.len());
    while i > 0 && char_type(chars[i - 1]) == CharType::Whitespace {
        i -= 1;
    }
    if i == 0 {
        return 0;
    }
    let class = char_type(chars[i - 1]);
    while i > 0 && char_type(chars[i - 1]) == class {
        i -= 1;
    }
    i
}

/// Column range `[start, end)` of the word touching `col`, if any.
///
/// A cursor just past the end of a word still selects that word.
pub fn word_range_at(line: &str, col: usize) -> Option<(usize, usize)> {
    let chars: Vec<char> = line.chars().collect();
    let is_word = |i: usize| chars.get(i).is_some_and(|&c| char_type(c) == CharType::WordChar);

    let anchor = if is_word(col) {
        col
    } else if col > 0 && is_word(col - 1) {
        col - 1
    } else {
        return None;
    };

    let mut start = anchor;
    while start > 0 && is_word(start - 1) {
        start -= 1;
    }
    let mut end = anchor + 1;
    while is_word(end) {
        end += 1;
    }
    Some((start, end))
}

/// Tab stop used when drawing `\t`
pub const TABULATOR_WIDTH: usize = 4;

/// Convert a character column to the screen column it is drawn at
pub fn char_col_to_visual_col(text: &str, char_col: usize) -> usize {
    let mut visual_col = 0;
    for ch in text.chars().take(char_col) {
        if ch == '\t' {
            visual_col += TABULATOR_WIDTH - (visual_col % TABULATOR_WIDTH);
        } else {
            visual_col += 1;
        }
    }
    visual_col
}

/// Character column drawn at a screen column (clicks inside a tab land on it)
pub fn visual_col_to_char_col(text: &str, visual_col: usize) -> usize {
    let mut visual = 0;
    for (index, ch) in text.chars().enumerate() {
        let width = if ch == '\t' {
            TABULATOR_WIDTH - (visual % TABULATOR_WIDTH)
        } else {
            1
        };
        if visual_col < visual + width {
            return index;
        }
        visual += width;
    }
    text.chars().count()
}

/// Replace tabs with spaces up to the next tab stop
pub fn expand_tabs(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut visual = 0;
    for ch in text.chars() {
        if ch == '\t' {
            let pad = TABULATOR_WIDTH - (visual % TABULATOR_WIDTH);
            out.extend(std::iter::repeat(' ').take(pad));
            visual += pad;
        } else {
            out.push(ch);
            visual += 1;
        }
    }
    out
}
