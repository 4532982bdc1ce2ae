use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::models::element::Element;
use crate::models::title_page::TitlePageEntry;
use crate::parser::FountainParser;

/// 剧本读取错误
///
/// 解析本身永不失败，只有输入源不可读时才报告错误。
#[derive(Debug, Error)]
pub enum ScriptError {
    #[error("无法读取剧本文件 {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

/// 剧本聚合：标题页条目 + 元素序列
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Script {
    pub filename: Option<String>, // 来源文件名（内存字符串来源时为None）
    pub elements: Vec<Element>,
    pub title_page: Vec<TitlePageEntry>,
}

impl Script {
    /// 从内存字符串解析剧本
    pub fn from_string(string: &str) -> Self {
        let mut parser = FountainParser::new();
        let result = parser.parse(string);
        Script {
            filename: None,
            elements: result.elements,
            title_page: result.title_page,
        }
    }

    /// 从文件解析剧本
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ScriptError> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path).map_err(|source| ScriptError::Io {
            path: path.display().to_string(),
            source,
        })?;

        let mut script = Script::from_string(&contents);
        script.filename = path
            .file_name()
            .map(|name| name.to_string_lossy().to_string());
        Ok(script)
    }
}
