use log::debug;
use serde::{Deserialize, Serialize};

use crate::models::{Element, ElementType, Page, Script};
use crate::pagination::metrics::{CourierMetrics, Font, TextMetrics};
use crate::utils::SENTENCE_REGEX;

/// 页面尺寸，布局单位（72 units = 1 英寸）
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PageSize {
    pub width: f64,
    pub height: f64,
}

impl PageSize {
    /// US Letter, 8.5 x 11 英寸
    pub const LETTER: PageSize = PageSize {
        width: 612.0,
        height: 792.0,
    };
}

// 上下各 1 英寸页边距
const ONE_INCH_BUFFER: f64 = 72.0;

// 对白块溢出低于 4 行高时不做块内拆分
const SPLIT_OVERFLOW_THRESHOLD_LINES: f64 = 4.0;

// 页底剩余不足 5 行高时放弃拆分，整块后移
const SPLIT_DISTANCE_THRESHOLD_LINES: f64 = 5.0;

/// 分页器
///
/// 只读借用剧本元素序列，贪心填满固定高度的页面。角色提示不孤立在页底，
/// 场景标题和它后面的第一个块绑定，对白只在句子边界拆分并加 (MORE)/(CONT'D)。
/// 分页产生的合成元素都是新分配的，原始元素序列不被修改。
pub struct Paginator<'a> {
    script: &'a Script,
    metrics: Box<dyn TextMetrics>,
    font: Font,
    line_height: f64,
    pages: Vec<Page>,
}

impl<'a> Paginator<'a> {
    pub fn new(script: &'a Script) -> Self {
        Paginator::with_metrics(script, Box::new(CourierMetrics))
    }

    /// 注入自定义文本度量实现
    pub fn with_metrics(script: &'a Script, metrics: Box<dyn TextMetrics>) -> Self {
        let font = Font::courier(12.0);
        let line_height = font.point_size;
        Paginator {
            script,
            metrics,
            font,
            line_height,
            pages: Vec::new(),
        }
    }

    /// 按默认 US Letter 尺寸分页
    pub fn paginate(&mut self) {
        self.paginate_for(PageSize::LETTER);
    }

    /// 页数（未分页时先按默认尺寸分页）
    pub fn page_count(&mut self) -> usize {
        if self.pages.is_empty() {
            self.paginate();
        }
        self.pages.len()
    }

    /// 取某一页；越界返回空页而不是报错
    pub fn page_at(&mut self, index: usize) -> Page {
        if self.pages.is_empty() {
            self.paginate();
        }
        self.pages.get(index).cloned().unwrap_or_default()
    }

    pub fn pages(&self) -> &[Page] {
        &self.pages
    }

    // 每种元素类型上方的空行数（行高倍数）
    fn space_before(element: &Element) -> f64 {
        match element.element_type {
            ElementType::SceneHeading => 2.0,
            ElementType::Action | ElementType::Character | ElementType::Transition => 1.0,
            _ => 0.0,
        }
    }

    // 每种元素类型的栏宽（布局单位）
    fn content_width(element: &Element) -> f64 {
        match element.element_type {
            ElementType::Character | ElementType::Dialogue => 250.0,
            ElementType::Parenthetical => 212.0,
            _ => 430.0,
        }
    }

    fn height(&self, text: &str, max_width: f64) -> f64 {
        self.metrics.measure(text, &self.font, max_width) as f64 * self.line_height
    }

    fn element_height(&self, element: &Element) -> f64 {
        self.height(&element.text, Self::content_width(element))
    }

    /// 按给定页面尺寸分页；每次调用都从头重新计算
    pub fn paginate_for(&mut self, page_size: PageSize) {
        let max_page_height = page_size.height - (ONE_INCH_BUFFER * 2.01).round();
        let line_height = self.line_height;

        let mut pages: Vec<Page> = Vec::new();
        let initial_y = 0.0;
        let mut current_y = initial_y;
        let mut current_page = Page::new();
        let mut block_height = 0.0;

        // 待落页的当前逻辑单元
        let mut tmp_elements: Vec<Element> = Vec::new();

        let elements = &self.script.elements;
        let max_elements = elements.len() as isize;

        let mut previous_dual_height: f64 = -1.0;

        let mut i: isize = -1;
        while i < max_elements - 1 {
            i += 1;
            let element = &elements[i as usize];

            // 显式分页符立即生效，无视剩余高度
            if element.element_type == ElementType::PageBreak {
                if !tmp_elements.is_empty() {
                    current_page.elements.append(&mut tmp_elements);
                }
                current_page.push(element.clone());
                pages.push(std::mem::take(&mut current_page));
                current_y = initial_y;
                block_height = 0.0;
                continue;
            }

            let space_before = Self::space_before(element) * line_height.round();
            let element_width = Self::content_width(element);
            let height = self.height(&element.text, element_width);

            // 零高度元素不参与排版
            if height <= 0.0 {
                continue;
            }

            block_height += height;

            // 页首元素上方不留空
            if !current_page.is_empty() {
                block_height += space_before;
            }

            if element.element_type == ElementType::SceneHeading && i + 1 < max_elements {
                // 场景标题和下一个块绑定，避免孤立在页底
                let next_element = &elements[(i + 1) as usize];
                let next_height = self.height(&next_element.text, Self::content_width(next_element));

                if block_height + current_y + next_height >= max_page_height
                    && next_height >= line_height
                {
                    tmp_elements.push(Element::new(ElementType::PageBreak, ""));
                }

                tmp_elements.push(element.clone());
                continue;
            } else if element.element_type == ElementType::Character && i + 1 < max_elements {
                // 角色块一次吞并后续全部对白和括号说明
                let dialogue_types = [ElementType::Dialogue, ElementType::Parenthetical];

                let mut j = i + 1;
                let mut next_element = element.clone();
                let mut is_end_of_array = false;
                loop {
                    tmp_elements.push(next_element.clone());

                    if j < max_elements {
                        next_element = elements[j as usize].clone();
                        j += 1;
                        if dialogue_types.contains(&next_element.element_type) {
                            block_height += self.height(&next_element.text, element_width);
                        }
                    } else {
                        is_end_of_array = true;
                    }

                    if is_end_of_array || !dialogue_types.contains(&next_element.element_type) {
                        break;
                    }
                }

                // 回退游标：循环顶部会再前进一步
                if is_end_of_array {
                    i = j - 1;
                } else {
                    i = j - 2;
                }

                // 双对话两栏并排，只有较高的一栏推进光标
                if element.is_dual_dialogue && previous_dual_height < 0.0 {
                    previous_dual_height = block_height;
                } else if element.is_dual_dialogue {
                    block_height = (previous_dual_height - block_height).abs();
                    previous_dual_height = -1.0;
                }
            } else {
                tmp_elements.push(element.clone());
            }

            let total_height_used = block_height + current_y;

            if total_height_used > max_page_height {
                let is_character_block = tmp_elements
                    .first()
                    .map(|e| e.element_type == ElementType::Character)
                    .unwrap_or(false);

                if is_character_block
                    && total_height_used - max_page_height
                        >= line_height * SPLIT_OVERFLOW_THRESHOLD_LINES
                {
                    let max_tmp_elements = tmp_elements.len() as isize;
                    let page_overflow = total_height_used - max_page_height;

                    // 找出块内在哪个元素处溢出
                    let mut partial_height = 0.0;
                    let mut block_index: isize = -1;
                    while partial_height < page_overflow && block_index < max_tmp_elements - 1 {
                        block_index += 1;
                        let e = &tmp_elements[block_index as usize];
                        partial_height +=
                            self.element_height(e) + Self::space_before(e) * line_height.round();
                    }

                    if block_index > 0 {
                        let spiller = tmp_elements[block_index as usize].clone();

                        if spiller.element_type == ElementType::Parenthetical {
                            // 括号说明前断页；块内第二个元素不拆，避免切得太早
                            if block_index > 1 {
                                for z in 0..block_index as usize {
                                    current_page.push(tmp_elements[z].clone());
                                }
                                current_page.push(Element::new(ElementType::Character, "(MORE)"));
                                pages.push(std::mem::take(&mut current_page));

                                block_height = 0.0;

                                // 下一页以 (CONT'D) 角色提示开头
                                let mut character_cue = tmp_elements[0].clone();
                                character_cue.text = format!("{} (CONT'D)", character_cue.text);
                                block_height += self.element_height(&character_cue);
                                current_page.push(character_cue);

                                for z in block_index as usize..tmp_elements.len() {
                                    let e = tmp_elements[z].clone();
                                    block_height += self.element_height(&e);
                                    current_page.push(e);
                                }

                                current_y = block_height;
                                tmp_elements.clear();
                            }
                            // block_index <= 1 时整块留在当前页，接受有限超高
                        } else {
                            let distance_to_bottom =
                                max_page_height - current_y - line_height * 2.0;
                            if distance_to_bottom < line_height * SPLIT_DISTANCE_THRESHOLD_LINES {
                                // 页底空间太小，放弃拆分，整块后移
                                pages.push(std::mem::take(&mut current_page));
                                current_y = block_height - space_before;
                                block_height = 0.0;
                                continue;
                            }

                            // 句子边界：终结符后的字节偏移，彼此连续
                            let spiller_text = spiller.text.clone();
                            let sentence_ends: Vec<usize> = SENTENCE_REGEX
                                .captures_iter(&spiller_text)
                                .filter_map(|caps| caps.get(1))
                                .map(|m| m.end())
                                .collect();

                            if sentence_ends.is_empty() {
                                // 没有可拆分点，整块后移
                                debug!("对白没有句子边界，整块移到下一页");
                                pages.push(std::mem::take(&mut current_page));
                                current_y = block_height - space_before;
                                block_height = 0.0;
                                continue;
                            }

                            // 贪心累积整句直到页底放不下
                            let spiller_width = Self::content_width(&spiller);
                            let mut split_offset = 0;
                            for &end in &sentence_ends {
                                let candidate = &spiller_text[..end];
                                if self.height(candidate, spiller_width) < distance_to_bottom {
                                    split_offset = end;
                                } else {
                                    break;
                                }
                            }

                            let dialogue_before_break = &spiller_text[..split_offset];
                            let dialogue_after_break = &spiller_text[split_offset..];

                            if !dialogue_before_break.is_empty() {
                                // 本页收尾：断点前的内容 + (MORE)
                                for z in 0..block_index as usize {
                                    current_page.push(tmp_elements[z].clone());
                                }
                                current_page
                                    .push(Element::new(ElementType::Dialogue, dialogue_before_break));
                                current_page.push(Element::new(ElementType::Character, "(MORE)"));
                            }
                            pages.push(std::mem::take(&mut current_page));

                            block_height = 0.0;

                            // 下一页以 (CONT'D) 角色提示开头
                            let character_cue = Element::new(
                                ElementType::Character,
                                &format!("{} (CONT'D)", tmp_elements[0].text),
                            );
                            block_height += self.element_height(&character_cue);
                            current_page.push(character_cue);

                            if dialogue_before_break.is_empty() {
                                // 一句都放不下时，断点前的元素也整体后移
                                for z in 1..block_index as usize {
                                    let e = tmp_elements[z].clone();
                                    block_height += self.element_height(&e);
                                    current_page.push(e);
                                }
                            }

                            let post_break =
                                Element::new(ElementType::Dialogue, dialogue_after_break);
                            block_height += self.element_height(&post_break);
                            current_page.push(post_break);

                            // 块内剩余元素
                            for z in (block_index as usize + 1)..tmp_elements.len() {
                                let e = tmp_elements[z].clone();
                                block_height += self.element_height(&e);
                                current_page.push(e);
                            }

                            current_y = block_height;
                            tmp_elements.clear();
                        }
                    } else {
                        // 溢出点就是角色提示本身，无处可拆，整块后移
                        debug!("对白块无拆分点，整块移到下一页");
                        pages.push(std::mem::take(&mut current_page));
                        current_y = block_height - space_before;
                    }
                } else {
                    // 非角色块，或溢出量低于拆分阈值：直接收页
                    pages.push(std::mem::take(&mut current_page));
                    current_y = block_height - space_before;
                    block_height = 0.0;
                }
            } else {
                current_y = block_height + current_y;
            }

            block_height = 0.0;

            // 当前单元落到当前页
            current_page.elements.append(&mut tmp_elements);
        }

        if !tmp_elements.is_empty() {
            current_page.elements.append(&mut tmp_elements);
        }

        if !current_page.is_empty() {
            pages.push(current_page);
        }

        self.pages = pages;
    }
}
