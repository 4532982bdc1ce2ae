use log::warn;

use crate::models::{Element, ElementType, TitlePageEntry};
use crate::parser::title_page::parse_title_page;
use crate::utils::{BLOCK_REGEX, TERMINAL_TRANSITIONS};

/// 解析结果：元素序列 + 标题页条目
#[derive(Debug, Clone, Default, serde::Serialize)]
pub struct ParseOutput {
    pub elements: Vec<Element>,
    pub title_page: Vec<TitlePageEntry>,
}

/// Fountain 逐行结构解析器
///
/// 单次前向扫描，跨行状态只有三项：连续空行数、对话块开关、boneyard块开关。
/// 规则按固定优先级逐条匹配，命中即处理下一行，对任意输入都不会失败。
pub struct FountainParser {
    result: ParseOutput,
    newlines_before: usize,
    is_inside_dialogue_block: bool,
    is_comment_block: bool,
    comment_text: String,
}

impl FountainParser {
    pub fn new() -> Self {
        FountainParser {
            result: ParseOutput::default(),
            newlines_before: 0,
            is_inside_dialogue_block: false,
            is_comment_block: false,
            comment_text: String::new(),
        }
    }

    fn push_element(&mut self, element_type: ElementType, text: &str) {
        self.result.elements.push(Element::new(element_type, text));
    }

    /// 解析Fountain格式文本
    pub fn parse(&mut self, script: &str) -> ParseOutput {
        self.result = ParseOutput::default();
        self.newlines_before = 0;
        self.is_inside_dialogue_block = false;
        self.is_comment_block = false;
        self.comment_text.clear();

        // 统一换行符，去掉开头空白，结尾补双换行保证末尾块能闭合
        let contents = script.replace("\r\n", "\n");
        let mut contents = format!("{}\n\n", contents.trim_start());

        // 标题页只看第一个空行之前的顶部块
        let top_of_document = contents
            .split("\n\n")
            .next()
            .unwrap_or("")
            .to_string();

        if let Some(entries) = parse_title_page(&top_of_document) {
            self.result.title_page = entries;
            if let Some(rest) = contents.strip_prefix(&top_of_document) {
                contents = rest.to_string();
            }
        }

        // 正文前补一个空行，让首行也能通过 blank_run > 0 的规则
        let contents = format!("\n{}", contents);
        let lines: Vec<&str> = contents.split('\n').collect();

        for (index, line) in lines.iter().enumerate() {
            let line = *line;
            self.parse_body_line(line, index, &lines);
        }

        self.result.clone()
    }

    // 按优先级分类一行正文；命中规则后直接返回
    fn parse_body_line(&mut self, line: &str, index: usize, lines: &[&str]) {
        // 歌词：~ 开头，连续行延续同一段落
        if line.starts_with('~') {
            if let Some(last) = self.result.elements.last() {
                if last.element_type == ElementType::Lyrics && self.newlines_before > 0 {
                    // 隔空行的歌词之间插入一个空白分隔
                    self.push_element(ElementType::Lyrics, " ");
                }
            }
            self.push_element(ElementType::Lyrics, line);
            self.newlines_before = 0;
            return;
        }

        // 强制 action
        if line.starts_with('!') {
            self.push_element(ElementType::Action, line);
            self.newlines_before = 0;
            return;
        }

        // 强制角色
        if line.starts_with('@') {
            self.push_element(ElementType::Character, line);
            self.newlines_before = 0;
            self.is_inside_dialogue_block = true;
            return;
        }

        // 对话内的双空格空行，并入对白而不是断块
        if BLOCK_REGEX["dialogue_blank"].is_match(line) && self.is_inside_dialogue_block {
            self.newlines_before = 0;
            match self.result.elements.last_mut() {
                Some(previous) if previous.element_type == ElementType::Dialogue => {
                    previous.append_line(line);
                }
                _ => self.push_element(ElementType::Dialogue, line),
            }
            return;
        }

        // 对话块外的纯空白行（2个以上空格），保留为 action
        if BLOCK_REGEX["line_break"].is_match(line) {
            self.push_element(ElementType::Action, line);
            self.newlines_before = 0;
            return;
        }

        // 真空行
        if line.is_empty() && !self.is_comment_block {
            self.is_inside_dialogue_block = false;
            self.newlines_before += 1;
            return;
        }

        // boneyard 开口
        if BLOCK_REGEX["boneyard_open"].is_match(line) {
            if BLOCK_REGEX["boneyard_close"].is_match(line) {
                // 单行注释块
                let text = line.replace("/*", "").replace("*/", "");
                self.is_comment_block = false;
                self.push_element(ElementType::Boneyard, &text);
                self.newlines_before = 0;
            } else {
                self.is_comment_block = true;
                self.comment_text.push_str(&line[2..]);
                self.comment_text.push('\n');
            }
            return;
        }

        // boneyard 闭口
        if BLOCK_REGEX["boneyard_close"].is_match(line) {
            let text = BLOCK_REGEX["boneyard_close"].replace(line, "").to_string();
            self.comment_text.push_str(&text);
            self.is_comment_block = false;
            let comment = self.comment_text.trim().to_string();
            self.push_element(ElementType::Boneyard, &comment);
            self.comment_text.clear();
            self.newlines_before = 0;
            return;
        }

        // boneyard 内部，只累积不产出
        if self.is_comment_block {
            self.comment_text.push_str(line);
            self.comment_text.push('\n');
            return;
        }

        // 分页符：3个以上等号
        if BLOCK_REGEX["page_break"].is_match(line) {
            self.push_element(ElementType::PageBreak, line);
            self.newlines_before = 0;
            return;
        }

        // 概要：单个等号开头
        let trimmed = line.trim();
        if !trimmed.is_empty() && trimmed.starts_with('=') {
            let text = &line.trim_start()[1..];
            self.push_element(ElementType::Synopsis, text);
            self.newlines_before = 0;
            return;
        }

        // 行内注解 [[ ... ]] 独占一行
        if BLOCK_REGEX["comment"].is_match(line) {
            let text = line.replace("[[", "").replace("]]", "");
            let text = text.trim().to_string();
            self.push_element(ElementType::Comment, &text);
            self.newlines_before = 0;
            return;
        }

        // 章节标题：# 开头，层级等于#数量
        if trimmed.starts_with('#') {
            self.newlines_before = 0;

            if let Some(caps) = BLOCK_REGEX["section"].captures(line) {
                let depth = caps[1].len();
                let text = caps[2].trim().to_string();
                if text.is_empty() {
                    warn!("第{}行：章节标题去掉#后为空，跳过该行", index);
                    return;
                }

                let mut element = Element::new(ElementType::SectionHeading, &text);
                element.section_depth = depth;
                self.result.elements.push(element);
            }
            return;
        }

        // 强制场景标题：单个 . 开头（排除 .. 省略号）
        let bytes = line.as_bytes();
        if bytes.len() > 1 && bytes[0] == b'.' && bytes[1] != b'.' {
            self.newlines_before = 0;

            let element = if let Some(caps) = BLOCK_REGEX["scene_number"].captures(line) {
                let scene_number = caps[1].to_string();
                let stripped = BLOCK_REGEX["scene_number"].replace(line, "").to_string();
                // 去掉开头的 . 和前导空白，编号前的尾部空格保留
                let text = stripped[1..].trim_start().to_string();
                let mut element = Element::new(ElementType::SceneHeading, &text);
                element.scene_number = Some(scene_number);
                element
            } else {
                Element::new(ElementType::SceneHeading, line[1..].trim())
            };

            self.result.elements.push(element);
            return;
        }

        // 隐式场景标题：INT/EXT/EST/I./E. 开头，且前面有空行
        if self.newlines_before > 0 && BLOCK_REGEX["scene_heading"].is_match(line) {
            self.newlines_before = 0;

            let element = if let Some(caps) = BLOCK_REGEX["scene_number"].captures(line) {
                let scene_number = caps[1].to_string();
                let text = BLOCK_REGEX["scene_number"].replace(line, "").to_string();
                let mut element = Element::new(ElementType::SceneHeading, &text);
                element.scene_number = Some(scene_number);
                element
            } else {
                Element::new(ElementType::SceneHeading, line)
            };

            self.result.elements.push(element);
            return;
        }

        // 转场：TO: 结尾且前面没有小写字母
        if BLOCK_REGEX["transition"].is_match(line) {
            self.push_element(ElementType::Transition, line);
            self.newlines_before = 0;
            return;
        }

        // 固定转场结束语
        if TERMINAL_TRANSITIONS.contains(&line.trim_start()) {
            self.push_element(ElementType::Transition, line);
            self.newlines_before = 0;
            return;
        }

        // 强制转场 / 强制居中 action
        if line.starts_with('>') {
            if line.len() > 1 && line.ends_with('<') {
                let text = line[1..].trim();
                let text = text.strip_suffix('<').unwrap_or(text).trim();
                let mut element = Element::new(ElementType::Action, text);
                element.is_centered = true;
                self.result.elements.push(element);
            } else {
                self.push_element(ElementType::Transition, line[1..].trim());
            }
            self.newlines_before = 0;
            return;
        }

        // 角色提示：全大写行，且下一行非空（角色后必须跟内容）
        if self.newlines_before > 0 && BLOCK_REGEX["character"].is_match(line) {
            if let Some(next_line) = lines.get(index + 1) {
                if !next_line.is_empty() {
                    self.newlines_before = 0;
                    let mut element = Element::new(ElementType::Character, line);

                    // 尾部 ^ 表示双对话，回溯配对上一个角色
                    if BLOCK_REGEX["dual_caret"].is_match(line) {
                        element.is_dual_dialogue = true;
                        element.text =
                            BLOCK_REGEX["dual_caret"].replace(&element.text, "").to_string();

                        for previous in self.result.elements.iter_mut().rev() {
                            if previous.element_type == ElementType::Character {
                                previous.is_dual_dialogue = true;
                                break;
                            }
                        }
                    }

                    self.result.elements.push(element);
                    self.is_inside_dialogue_block = true;
                    return;
                }
            }
        }

        // 对话块内：( 开头是括号说明，其余为对白；连续对白行合并为一个元素
        if self.is_inside_dialogue_block {
            if self.newlines_before == 0 && BLOCK_REGEX["parenthetical_start"].is_match(line) {
                self.push_element(ElementType::Parenthetical, line);
                return;
            }

            match self.result.elements.last_mut() {
                Some(previous) if previous.element_type == ElementType::Dialogue => {
                    previous.append_line(line);
                }
                _ => self.push_element(ElementType::Dialogue, line),
            }
            self.newlines_before = 0;
            return;
        }

        // 没有空行分隔的行并入上一个元素
        if self.newlines_before == 0 && !self.result.elements.is_empty() {
            let previous = self.result.elements.last_mut().unwrap();

            // 场景标题必须被空行包围，否则降级为 action
            if previous.element_type == ElementType::SceneHeading {
                previous.element_type = ElementType::Action;
            }

            previous.append_line(line);
            self.newlines_before = 0;
            return;
        }

        // 兜底：action
        self.push_element(ElementType::Action, line);
        self.newlines_before = 0;
    }
}

impl Default for FountainParser {
    fn default() -> Self {
        Self::new()
    }
}
