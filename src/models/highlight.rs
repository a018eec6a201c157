//! 占位符高亮：把文本切分为普通片段与 `@@...@@` token 片段
//!
//! 纯函数，不校验 token 是否对应目录中的占位符。

use regex::Regex;
use std::ops::Range;
use std::sync::OnceLock;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SegmentKind {
    Plain,
    Placeholder,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Segment<'a> {
    pub kind: SegmentKind,
    pub text: &'a str,
    /// 字节区间
    pub range: Range<usize>,
}

fn token_regex() -> &'static Regex {
    static TOKEN: OnceLock<Regex> = OnceLock::new();
    TOKEN.get_or_init(|| Regex::new(r"@@[^@]*@@").expect("token pattern is valid"))
}

pub fn highlight(text: &str) -> Vec<Segment<'_>> {
    let mut segments = Vec::new();
    let mut last = 0;

    for m in token_regex().find_iter(text) {
        if m.start() > last {
            segments.push(Segment {
                kind: SegmentKind::Plain,
                text: &text[last..m.start()],
                range: last..m.start(),
            });
        }
        segments.push(Segment {
            kind: SegmentKind::Placeholder,
            text: m.as_str(),
            range: m.range(),
        });
        last = m.end();
    }

    if last < text.len() {
        segments.push(Segment {
            kind: SegmentKind::Plain,
            text: &text[last..],
            range: last..text.len(),
        });
    }

    segments
}

/// token 内部的标题（去掉两侧 `@@`），按出现顺序
pub fn token_titles(text: &str) -> impl Iterator<Item = &str> {
    token_regex()
        .find_iter(text)
        .map(|m| &m.as_str()[2..m.as_str().len() - 2])
}

#[cfg(test)]
#[path = "../../tests/unit/models/highlight.rs"]
mod tests;
