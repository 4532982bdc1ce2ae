pub mod element;
pub mod title_page;
pub mod page;
pub mod script;

pub use element::{Element, ElementType};
pub use title_page::TitlePageEntry;
pub use page::Page;
pub use script::{Script, ScriptError};
