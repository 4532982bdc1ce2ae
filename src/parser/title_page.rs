use crate::models::TitlePageEntry;
use crate::utils::TITLE_REGEX;

// author 统一为 authors
fn normalize_key(key: &str) -> String {
    let key = key.to_lowercase();
    if key == "author" {
        "authors".to_string()
    } else {
        key
    }
}

/// 解析文档顶部块的标题页指令
///
/// 返回 None 表示顶部块不是标题页，应按正文规则处理原始文本。
pub(crate) fn parse_title_page(top_of_document: &str) -> Option<Vec<TitlePageEntry>> {
    if top_of_document.is_empty() {
        return None;
    }

    let inline_regex = &TITLE_REGEX["directive_inline"];
    let key_regex = &TITLE_REGEX["directive_key"];

    let mut found_title_page = false;
    let mut entries: Vec<TitlePageEntry> = Vec::new();
    let mut open_key = String::new();
    let mut open_values: Vec<String> = Vec::new();

    for line in top_of_document.split('\n') {
        if line.is_empty() || key_regex.is_match(line) {
            found_title_page = true;

            // 关闭之前打开的指令
            if !open_key.is_empty() {
                entries.push(TitlePageEntry::new(&open_key, std::mem::take(&mut open_values)));
            }

            open_key = key_regex
                .captures(line)
                .and_then(|caps| caps.get(1))
                .map(|m| normalize_key(m.as_str()))
                .unwrap_or_default();
        } else if let Some(caps) = inline_regex.captures(line) {
            found_title_page = true;

            if !open_key.is_empty() {
                entries.push(TitlePageEntry::new(&open_key, std::mem::take(&mut open_values)));
                open_key.clear();
            }

            let key = normalize_key(&caps[1]);
            let value = caps[2].to_string();
            entries.push(TitlePageEntry::new(&key, vec![value]));
        } else if found_title_page {
            open_values.push(line.trim().to_string());
        }
    }

    if !found_title_page {
        return None;
    }

    // 防止把单个伪指令行（只有 "Key:"、无任何值）误判为标题页
    if !open_key.is_empty() && open_values.is_empty() && entries.is_empty() {
        return None;
    }

    if !open_key.is_empty() {
        entries.push(TitlePageEntry::new(&open_key, open_values));
    }

    Some(entries)
}
