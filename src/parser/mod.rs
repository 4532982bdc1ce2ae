pub mod fountain_parser;
pub mod title_page;

pub use fountain_parser::{FountainParser, ParseOutput};
