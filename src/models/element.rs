use serde::{Deserialize, Serialize};

/// 剧本元素类型
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ElementType {
    SceneHeading,
    Action,
    Character,
    Dialogue,
    Parenthetical,
    Lyrics,
    Transition,
    SectionHeading,
    Synopsis,
    Comment,
    Boneyard,
    PageBreak,
}

impl ElementType {
    // 检查类型是否在给定集合中
    pub fn is_one_of(&self, types: &[ElementType]) -> bool {
        types.contains(self)
    }
}

/// 剧本元素，一行或合并后的多行语义单元
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Element {
    pub element_type: ElementType, // 元素类型
    pub text: String,              // 文本内容，多行时用换行符连接
    pub scene_number: Option<String>, // 场景编号（仅场景标题有效）
    pub section_depth: usize,      // 章节层级（仅章节标题有效，等于开头#数量）
    pub is_centered: bool,         // 是否居中（仅强制居中的action有效）
    pub is_dual_dialogue: bool,    // 是否为双对话角色
}

impl Element {
    pub fn new(element_type: ElementType, text: &str) -> Self {
        Element {
            element_type,
            text: text.to_string(),
            scene_number: None,
            section_depth: 0,
            is_centered: false,
            is_dual_dialogue: false,
        }
    }

    // 追加一行文本（换行符连接）
    pub fn append_line(&mut self, line: &str) {
        self.text = format!("{}\n{}", self.text, line);
    }
}
