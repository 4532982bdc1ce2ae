use serde::{Deserialize, Serialize};

/// 标题页条目，保留源文本顺序的键值对
///
/// 同一个键可以重复出现为独立条目；`author` 在解析时统一为 `authors`。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TitlePageEntry {
    pub key: String,         // 小写键名
    pub values: Vec<String>, // 值列表，多行指令的值按行累积
}

impl TitlePageEntry {
    pub fn new(key: &str, values: Vec<String>) -> Self {
        TitlePageEntry {
            key: key.to_string(),
            values,
        }
    }
}
