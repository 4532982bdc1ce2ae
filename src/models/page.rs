use serde::{Deserialize, Serialize};
use crate::models::element::Element;

/// 一页的内容，分页器输出的元素子序列（可含合成元素）
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Page {
    pub elements: Vec<Element>,
}

impl Page {
    pub fn new() -> Self {
        Page { elements: Vec::new() }
    }

    pub fn push(&mut self, element: Element) {
        self.elements.push(element);
    }

    pub fn len(&self) -> usize {
        self.elements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }
}
