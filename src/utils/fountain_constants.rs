use std::collections::HashMap;
use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    // 标题页指令正则
    pub static ref TITLE_REGEX: HashMap<&'static str, Regex> = {
        let mut map = HashMap::new();
        // Key: Value 同行形式
        map.insert("directive_inline", Regex::new(r"^([^\t\s][^:]+):\s*([^\t\s].*)$").unwrap());
        // Key: 单独成行，值在后续行累积
        map.insert("directive_key", Regex::new(r"^([^\t\s][^:]+):[\t\s]*$").unwrap());
        map
    };

    // 正文行分类正则，按 FountainParser 的规则优先级使用
    pub static ref BLOCK_REGEX: HashMap<&'static str, Regex> = {
        let mut map = HashMap::new();
        map.insert("dialogue_blank", Regex::new(r"^\s{2}$").unwrap());
        map.insert("line_break", Regex::new(r"^\s{2,}$").unwrap());
        map.insert("boneyard_open", Regex::new(r"^/\*").unwrap());
        map.insert("boneyard_close", Regex::new(r"\*/\s*$").unwrap());
        map.insert("page_break", Regex::new(r"^={3,}\s*$").unwrap());
        map.insert("comment", Regex::new(r"^\s*\[{2}\s*([^\]\n])+\s*\]{2}\s*$").unwrap());
        map.insert("section", Regex::new(r"^\s*(#+)\s*(.*)$").unwrap());
        map.insert("scene_heading", Regex::new(r"(?i)^(int|ext|est|(i|int)\.?/(e|ext)\.?)[.\-\s].+$").unwrap());
        map.insert("scene_number", Regex::new(r"#([^\n#]*?)#\s*$").unwrap());
        map.insert("transition", Regex::new(r"^[^a-z]*TO:$").unwrap());
        map.insert("character", Regex::new(r"^[^a-z]+(\(cont'd\))?$").unwrap());
        map.insert("dual_caret", Regex::new(r"\s*\^\s*$").unwrap());
        map.insert("parenthetical_start", Regex::new(r"^\s*\(").unwrap());
        map
    };

    // 对白分页拆分用的句子正则
    pub static ref SENTENCE_REGEX: Regex = Regex::new(r"(.+?[.?!]+\s*)").unwrap();
}

// 固定转场结束语
pub const TERMINAL_TRANSITIONS: [&str; 3] = ["FADE OUT.", "CUT TO BLACK.", "FADE TO BLACK."];
