use serde::{Deserialize, Serialize};
use unicode_segmentation::UnicodeSegmentation;

/// 字体描述
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Font {
    pub name: String,
    pub point_size: f64,
}

impl Font {
    pub fn new(name: &str, point_size: f64) -> Self {
        Font {
            name: name.to_string(),
            point_size,
        }
    }

    // 剧本默认字体
    pub fn courier(point_size: f64) -> Self {
        Font::new("Courier", point_size)
    }
}

/// 文本度量能力
///
/// 给定文本、字体和最大宽度，返回折行后占用的行数。
/// 任何实现只要对相同输入返回确定的行数即可。
pub trait TextMetrics {
    fn measure(&self, text: &str, font: &Font, max_width: f64) -> usize;
}

// Courier 等宽字形的宽高比
const GLYPH_ADVANCE_RATIO: f64 = 0.6;

/// 等宽字体折行度量，字符宽按 0.6 倍字号估算
#[derive(Debug, Clone, Copy, Default)]
pub struct CourierMetrics;

impl TextMetrics for CourierMetrics {
    fn measure(&self, text: &str, font: &Font, max_width: f64) -> usize {
        if text.is_empty() {
            return 0;
        }

        let advance = font.point_size * GLYPH_ADVANCE_RATIO;
        let columns = if advance > 0.0 {
            (max_width / advance).floor() as usize
        } else {
            0
        };
        let columns = columns.max(1);

        text.split('\n')
            .map(|line| wrapped_line_count(line, columns))
            .sum()
    }
}

// 贪心按词折行，超长词按整行切块
fn wrapped_line_count(line: &str, columns: usize) -> usize {
    let words: Vec<&str> = line.split_whitespace().collect();
    if words.is_empty() {
        // 内部空行也占一行
        return 1;
    }

    let mut lines = 1;
    let mut current = 0usize;

    for word in words {
        let width = word.graphemes(true).count();

        if width > columns {
            if current > 0 {
                lines += 1;
            }
            let extra = (width - 1) / columns;
            lines += extra;
            current = width - extra * columns;
        } else if current == 0 {
            current = width;
        } else if current + 1 + width <= columns {
            current += 1 + width;
        } else {
            lines += 1;
            current = width;
        }
    }

    lines
}
