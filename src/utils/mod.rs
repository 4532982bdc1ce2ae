pub mod fountain_constants;

pub use fountain_constants::{BLOCK_REGEX, SENTENCE_REGEX, TITLE_REGEX, TERMINAL_TRANSITIONS};
