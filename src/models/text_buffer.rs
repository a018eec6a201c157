//! 文本缓冲区模型
//!
//! 职责：
//! - 文本存储（Rope）
//! - 光标（字符偏移）和选区管理
//! - 行列 ↔ 字符偏移映射

use super::selection::Selection;
use ropey::{Rope, RopeSlice};
use std::borrow::Cow;
use unicode_segmentation::UnicodeSegmentation;

/// 从 RopeSlice 获取字符串，优先零拷贝
pub fn slice_to_cow(slice: RopeSlice<'_>) -> Cow<'_, str> {
    match slice.as_str() {
        Some(s) => Cow::Borrowed(s),
        None => Cow::Owned(slice.to_string()),
    }
}

#[derive(Clone, Debug)]
pub struct TextBuffer {
    rope: Rope,
    cursor: usize,
    selection: Option<Selection>,
    /// 上下移动时保持的目标列
    goal_col: Option<usize>,
}

impl TextBuffer {
    pub fn new() -> Self {
        Self {
            rope: Rope::new(),
            cursor: 0,
            selection: None,
            goal_col: None,
        }
    }

    pub fn from_text(text: &str) -> Self {
        Self {
            rope: Rope::from_str(text),
            ..Self::new()
        }
    }

    pub fn rope(&self) -> &Rope {
        &self.rope
    }

    pub fn text(&self) -> String {
        self.rope.to_string()
    }

    pub fn len_chars(&self) -> usize {
        self.rope.len_chars()
    }

    pub fn len_lines(&self) -> usize {
        self.rope.len_lines()
    }

    pub fn is_empty(&self) -> bool {
        self.rope.len_chars() == 0
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn set_cursor(&mut self, pos: usize) {
        self.cursor = pos.min(self.len_chars());
        self.selection = None;
        self.goal_col = None;
    }

    pub fn selection(&self) -> Option<&Selection> {
        self.selection.as_ref()
    }

    /// 设置选区，光标落在 `cursor` 一侧
    pub fn set_selection(&mut self, anchor: usize, cursor: usize) {
        let mut selection = Selection::new(anchor, cursor);
        selection.clamp(self.len_chars());
        self.cursor = selection.cursor();
        self.selection = Some(selection);
        self.goal_col = None;
    }

    /// 执行一次光标移动并扩展选区，锚点不动
    pub fn select_with(&mut self, motion: impl FnOnce(&mut Self)) {
        let anchor = self.selection.map_or(self.cursor, |s| s.anchor());
        self.selection = None;
        motion(self);
        let goal = self.goal_col;
        self.set_selection(anchor, self.cursor);
        self.goal_col = goal;
    }

    pub fn clear_selection(&mut self) {
        self.selection = None;
    }

    pub fn has_selection(&self) -> bool {
        self.selection.as_ref().is_some_and(|s| !s.is_empty())
    }

    /// (行, 列)，列以字符计
    pub fn cursor_row_col(&self) -> (usize, usize) {
        let row = self.rope.char_to_line(self.cursor);
        (row, self.cursor - self.rope.line_to_char(row))
    }

    pub fn line(&self, row: usize) -> Option<Cow<'_, str>> {
        if row < self.rope.len_lines() {
            Some(slice_to_cow(self.rope.line(row)))
        } else {
            None
        }
    }

    fn line_len_chars(&self, row: usize) -> usize {
        let slice = self.rope.line(row);
        let line = slice_to_cow(slice);
        let without_newline = line.strip_suffix('\n').unwrap_or(&line);
        let without_newline = without_newline.strip_suffix('\r').unwrap_or(without_newline);
        without_newline.chars().count()
    }

    /// 整体替换文本（外部 `update_content`），光标收敛到合法范围
    pub fn replace_all(&mut self, text: &str) {
        self.rope = Rope::from_str(text);
        self.cursor = self.cursor.min(self.len_chars());
        self.selection = None;
        self.goal_col = None;
    }

    fn delete_selection(&mut self) -> bool {
        let Some(selection) = self.selection.take() else {
            return false;
        };
        if selection.is_empty() {
            return false;
        }
        let range = selection.range();
        self.rope.remove(range.clone());
        self.cursor = range.start;
        true
    }

    /// 在光标处插入（有选区时替换选区），光标移到插入内容之后
    pub fn insert_str(&mut self, s: &str) {
        self.delete_selection();
        self.rope.insert(self.cursor, s);
        self.cursor += s.chars().count();
        self.goal_col = None;
    }

    pub fn backspace(&mut self) -> bool {
        self.goal_col = None;
        if self.delete_selection() {
            return true;
        }
        if self.cursor == 0 {
            return false;
        }
        let start = self.prev_boundary(self.cursor);
        self.rope.remove(start..self.cursor);
        self.cursor = start;
        true
    }

    pub fn delete_forward(&mut self) -> bool {
        self.goal_col = None;
        if self.delete_selection() {
            return true;
        }
        if self.cursor >= self.len_chars() {
            return false;
        }
        let end = self.next_boundary(self.cursor);
        self.rope.remove(self.cursor..end);
        true
    }

    fn prev_boundary(&self, pos: usize) -> usize {
        let row = self.rope.char_to_line(pos);
        let line_start = self.rope.line_to_char(row);
        if pos == line_start {
            // "\r\n" 作为一个整体
            if pos >= 2 && self.rope.char(pos - 1) == '\n' && self.rope.char(pos - 2) == '\r' {
                return pos - 2;
            }
            return pos.saturating_sub(1);
        }
        let head = slice_to_cow(self.rope.slice(line_start..pos));
        let last = head
            .graphemes(true)
            .next_back()
            .map(|g| g.chars().count())
            .unwrap_or(1);
        pos - last
    }

    fn next_boundary(&self, pos: usize) -> usize {
        let row = self.rope.char_to_line(pos);
        let line_end = self.rope.line_to_char(row) + self.rope.line(row).len_chars();
        let tail = slice_to_cow(self.rope.slice(pos..line_end));
        let first = tail
            .graphemes(true)
            .next()
            .map(|g| g.chars().count())
            .unwrap_or(1);
        (pos + first).min(self.len_chars())
    }

    pub fn move_left(&mut self) {
        self.cursor = match self.selection.take() {
            Some(sel) if !sel.is_empty() => sel.range().start,
            _ => self.prev_boundary(self.cursor),
        };
        self.goal_col = None;
    }

    pub fn move_right(&mut self) {
        self.cursor = match self.selection.take() {
            Some(sel) if !sel.is_empty() => sel.range().end,
            _ if self.cursor >= self.len_chars() => self.cursor,
            _ => self.next_boundary(self.cursor),
        };
        self.goal_col = None;
    }

    pub fn move_up(&mut self) {
        self.move_vertical(-1);
    }

    pub fn move_down(&mut self) {
        self.move_vertical(1);
    }

    fn move_vertical(&mut self, delta: isize) {
        self.selection = None;
        let (row, col) = self.cursor_row_col();
        let goal = *self.goal_col.get_or_insert(col);
        let target = row as isize + delta;
        if target < 0 || target as usize >= self.len_lines() {
            return;
        }
        let target = target as usize;
        let col = goal.min(self.line_len_chars(target));
        self.cursor = self.rope.line_to_char(target) + col;
    }

    pub fn move_home(&mut self) {
        let (row, _) = self.cursor_row_col();
        self.set_cursor(self.rope.line_to_char(row));
    }

    pub fn move_end(&mut self) {
        let (row, _) = self.cursor_row_col();
        self.set_cursor(self.rope.line_to_char(row) + self.line_len_chars(row));
    }
}

impl Default for TextBuffer {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/models/text_buffer.rs"]
mod tests;
