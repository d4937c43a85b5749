//! Utility modules

pub mod file_validation;
pub mod text;

pub use file_validation::{
    filename_for_display, is_likely_binary, validate_entry_name, validate_file_for_opening,
    FileOpenError, INVALID_NAME_CHARS, MAX_FILE_SIZE,
};
pub use text::{
    char_col_to_visual_col, char_type, expand_tabs, visual_col_to_char_col, word_range_at,
    word_start_before, CharType, TABULATOR_WIDTH,
};
