pub mod models;
pub mod utils;
pub mod parser;
pub mod pagination;

pub use models::{
    Element,
    ElementType,
    Page,
    Script,
    ScriptError,
    TitlePageEntry
};

pub use parser::{
    FountainParser,
    ParseOutput
};

pub use pagination::{
    CourierMetrics,
    Font,
    PageSize,
    Paginator,
    TextMetrics
};

/// 解析Fountain格式文本
///
/// # Arguments
///
/// * `script` - Fountain格式的剧本文本
///
/// # Returns
///
/// 解析结果对象（元素序列 + 标题页条目）
pub fn parse(script: &str) -> ParseOutput {
    let mut parser = FountainParser::new();
    parser.parse(script)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn it_works() {
        let result = parse("INT. ROOM - DAY\n\nHello, world!");
        assert!(!result.elements.is_empty());
    }
}
