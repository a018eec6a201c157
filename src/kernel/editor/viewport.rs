use crate::models::TextBuffer;
use unicode_segmentation::UnicodeSegmentation;
use unicode_width::UnicodeWidthStr;

use super::state::EditorViewportState;

/// 光标所在行、光标之前内容的显示宽度（制表符按 tab_size 对齐）
pub fn cursor_display_x_abs(buffer: &TextBuffer, tab_size: u8) -> u32 {
    let (row, col) = buffer.cursor_row_col();
    let Some(line) = buffer.line(row) else {
        return 0;
    };

    let mut display_col = 0u32;
    let mut chars_seen = 0usize;
    for g in line.graphemes(true) {
        if chars_seen >= col {
            break;
        }
        chars_seen += g.chars().count();
        if g == "\t" {
            let tab = tab_size.max(1) as u32;
            let rem = display_col % tab;
            display_col += if rem == 0 { tab } else { tab - rem };
        } else if g == "\n" || g == "\r\n" {
            break;
        } else {
            display_col += g.width() as u32;
        }
    }

    display_col
}

pub fn clamp_and_follow(viewport: &mut EditorViewportState, buffer: &TextBuffer, tab_size: u8) {
    let total_lines = buffer.len_lines().max(1);
    let height = viewport.height.max(1);

    let max_offset = total_lines.saturating_sub(height);
    viewport.line_offset = viewport.line_offset.min(max_offset);

    let (row, _) = buffer.cursor_row_col();

    if row < viewport.line_offset {
        viewport.line_offset = row;
    } else if row >= viewport.line_offset + height {
        viewport.line_offset = row.saturating_sub(height.saturating_sub(1));
    }

    let cursor_x = cursor_display_x_abs(buffer, tab_size);
    let width = viewport.width.max(1) as u32;

    if cursor_x < viewport.horiz_offset {
        viewport.horiz_offset = cursor_x;
    } else if cursor_x >= viewport.horiz_offset + width {
        viewport.horiz_offset = cursor_x.saturating_sub(width.saturating_sub(1));
    }
}

pub fn expand_tabs(line: &str, tab_size: u8) -> String {
    let mut expanded = String::new();
    let mut display_col = 0u32;
    let tab_size = tab_size.max(1) as u32;

    for ch in line.chars() {
        match ch {
            '\t' => {
                let remainder = display_col % tab_size;
                let spaces = if remainder == 0 {
                    tab_size
                } else {
                    tab_size - remainder
                };
                for _ in 0..spaces {
                    expanded.push(' ');
                }
                display_col += spaces;
            }
            '\n' | '\r' => break,
            _ => {
                expanded.push(ch);
                display_col += unicode_width::UnicodeWidthChar::width(ch).unwrap_or(0) as u32;
            }
        }
    }

    expanded
}

#[cfg(test)]
#[path = "../../../tests/unit/kernel/editor/viewport.rs"]
mod tests;
