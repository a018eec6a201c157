//! 界面绘制：文件树、编辑区、占位符列表、状态栏与输入框

use std::ops::Range;

use ratatui::layout::{Constraint, Direction, Layout, Rect, Size};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Clear, Paragraph};
use ratatui::Frame;
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

use crate::kernel::editor::{cursor_display_x_abs, ActiveView};
use crate::kernel::{AppState, FocusTarget};
use crate::models::{highlight, NodeKind, SegmentKind};

const EXPLORER_WIDTH: u16 = 30;
const PLACEHOLDER_WIDTH: u16 = 34;
const DIALOG_WIDTH: u16 = 56;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Panes {
    pub explorer: Rect,
    pub editor: Rect,
    pub placeholders: Rect,
    pub status: Rect,
}

impl Panes {
    /// 编辑区去掉边框后的大小 (宽, 高)
    pub fn editor_inner_size(&self) -> (usize, usize) {
        let inner = inner(self.editor);
        (inner.width as usize, inner.height as usize)
    }

    pub fn explorer_inner_height(&self) -> usize {
        inner(self.explorer).height as usize
    }
}

pub fn layout(area: Rect) -> Panes {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Fill(1), Constraint::Length(1)])
        .split(area);
    let cols = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Length(EXPLORER_WIDTH),
            Constraint::Fill(1),
            Constraint::Length(PLACEHOLDER_WIDTH),
        ])
        .split(rows[0]);

    Panes {
        explorer: cols[0],
        editor: cols[1],
        placeholders: cols[2],
        status: rows[1],
    }
}

/// `Terminal::size()` 返回的是尺寸，布局从原点展开
pub fn layout_for_size(size: Size) -> Panes {
    layout(Rect::new(0, 0, size.width, size.height))
}

fn inner(area: Rect) -> Rect {
    Block::bordered().inner(area)
}

pub fn token_style() -> Style {
    Style::default()
        .fg(Color::Black)
        .bg(Color::LightBlue)
        .add_modifier(Modifier::BOLD)
}

fn pane_block(title: String, focused: bool) -> Block<'static> {
    let border = if focused {
        Style::default().fg(Color::Cyan)
    } else {
        Style::default().fg(Color::DarkGray)
    };
    Block::bordered().title(title).border_style(border)
}

pub fn render(frame: &mut Frame, state: &AppState) {
    let panes = layout(frame.area());

    render_explorer(frame, panes.explorer, state);
    render_editor(frame, panes.editor, state);
    render_placeholders(frame, panes.placeholders, state);
    render_status(frame, panes.status, state);

    if state.ui.input_dialog.visible {
        render_dialog(frame, frame.area(), state);
    }
}

fn render_explorer(frame: &mut Frame, area: Rect, state: &AppState) {
    let focused = state.ui.focus == FocusTarget::Explorer;
    let block = pane_block(format!(" Files ({}) ", state.tree.len()), focused);
    let height = block.inner(area).height as usize;
    let selected = state.tree.selected();

    let lines: Vec<Line> = state
        .tree
        .flatten_for_view()
        .into_iter()
        .skip(state.ui.explorer_scroll)
        .take(height)
        .map(|row| {
            let icon = match (row.kind, row.is_expanded) {
                (NodeKind::Folder, true) => "▾ ",
                (NodeKind::Folder, false) => "▸ ",
                (NodeKind::File, _) => "  ",
            };
            let mut spans = vec![
                Span::raw("  ".repeat(row.depth as usize)),
                Span::raw(icon),
                Span::raw(row.name.clone()),
            ];
            if row.is_repeating {
                spans.push(Span::styled(" ↻", Style::default().fg(Color::Magenta)));
            }
            if row.kind == NodeKind::File && state.editor.is_changed(&row.id) {
                spans.push(Span::styled(" ●", Style::default().fg(Color::Yellow)));
            }

            let mut line = Line::from(spans);
            if selected.as_ref() == Some(&row.id) {
                line = line.style(if focused {
                    Style::default().add_modifier(Modifier::REVERSED)
                } else {
                    Style::default().add_modifier(Modifier::BOLD)
                });
            }
            line
        })
        .collect();

    frame.render_widget(Paragraph::new(lines).block(block), area);
}

fn render_editor(frame: &mut Frame, area: Rect, state: &AppState) {
    let focused = state.ui.focus == FocusTarget::Editor;
    let editor = &state.editor;

    let (id, name) = match editor.active() {
        ActiveView::Empty => {
            let block = pane_block(" Editor ".to_string(), focused);
            frame.render_widget(
                Paragraph::new("Select a file to edit its content.")
                    .style(Style::default().fg(Color::DarkGray))
                    .block(block),
                area,
            );
            return;
        }
        ActiveView::Folder { name, .. } => {
            let block = pane_block(format!(" {name}/ "), focused);
            frame.render_widget(
                Paragraph::new("Folders have no content. Select a file inside it to edit.")
                    .style(Style::default().fg(Color::DarkGray))
                    .block(block),
                area,
            );
            return;
        }
        ActiveView::File { id, name } => (id, name),
    };

    let marker = if editor.is_changed(id) { " ●" } else { "" };
    let mut block = pane_block(format!(" {name}{marker} "), focused);
    let unknown = editor.catalog().unresolved_tokens(editor.content(id));
    if !unknown.is_empty() {
        block = block.title_bottom(
            Line::from(format!(" unknown: {} ", unknown.join(", ")))
                .style(Style::default().fg(Color::Red)),
        );
    }

    let inner_area = block.inner(area);
    let viewport = editor.viewport;
    let buffer = &editor.buffer;
    let selection = buffer.selection().filter(|s| !s.is_empty()).map(|s| s.range());
    // token 可以跨行，在整个缓冲区上切分
    let tokens = token_char_ranges(&buffer.text());

    let lines: Vec<Line> = (viewport.line_offset..)
        .take(inner_area.height as usize)
        .map_while(|row| {
            let text = buffer.line(row)?;
            let line_start = buffer.rope().line_to_char(row);
            let line_len = text.chars().count();
            let selected = selection.as_ref().and_then(|range| {
                let start = range.start.max(line_start);
                let end = range.end.min(line_start + line_len);
                (start < end).then(|| start - line_start..end - line_start)
            });
            Some(highlight_line(
                &text,
                editor.tab_size,
                viewport.horiz_offset,
                inner_area.width as usize,
                &line_tokens(&tokens, line_start, line_len),
                selected,
            ))
        })
        .collect();

    frame.render_widget(Paragraph::new(lines).block(block), area);

    if focused && !state.ui.input_dialog.visible {
        let (row, _) = buffer.cursor_row_col();
        let x = cursor_display_x_abs(buffer, editor.tab_size)
            .saturating_sub(viewport.horiz_offset);
        let y = row.saturating_sub(viewport.line_offset);
        if (x as usize) < inner_area.width as usize && y < inner_area.height as usize {
            frame.set_cursor_position((inner_area.x + x as u16, inner_area.y + y as u16));
        }
    }
}

/// 整段文本中 `@@...@@` token 的字符区间
pub fn token_char_ranges(text: &str) -> Vec<Range<usize>> {
    let mut ranges = Vec::new();
    let mut chars = 0usize;
    let mut bytes = 0usize;
    for segment in highlight(text) {
        chars += text[bytes..segment.range.start].chars().count();
        let len = segment.text.chars().count();
        if segment.kind == SegmentKind::Placeholder {
            ranges.push(chars..chars + len);
        }
        chars += len;
        bytes = segment.range.end;
    }
    ranges
}

/// 把缓冲区级别的 token 区间裁剪到一行内，返回行内字符区间
pub fn line_tokens(
    tokens: &[Range<usize>],
    line_start: usize,
    line_len: usize,
) -> Vec<Range<usize>> {
    let line_end = line_start + line_len;
    tokens
        .iter()
        .filter(|range| range.start < line_end && range.end > line_start)
        .map(|range| {
            let start = range.start.max(line_start) - line_start;
            let end = range.end.min(line_end) - line_start;
            start..end
        })
        .collect()
}

/// 把一行文本转换为带样式的 `Line`：token 高亮、制表符展开、按横向偏移裁剪
///
/// `tokens` 和 `selected` 都是行内字符区间。
pub fn highlight_line(
    line: &str,
    tab_size: u8,
    horiz_offset: u32,
    width: usize,
    tokens: &[Range<usize>],
    selected: Option<Range<usize>>,
) -> Line<'static> {
    let tab = tab_size.max(1) as u32;
    let end_col = horiz_offset + width as u32;
    let mut spans: Vec<Span<'static>> = Vec::new();
    let mut run = String::new();
    let mut run_style = Style::default();
    let mut col = 0u32;

    for (char_idx, ch) in line.chars().enumerate() {
        if ch == '\n' || ch == '\r' {
            break;
        }
        let base = if tokens.iter().any(|r| r.contains(&char_idx)) {
            token_style()
        } else {
            Style::default()
        };
        let style = if selected.as_ref().is_some_and(|r| r.contains(&char_idx)) {
            base.add_modifier(Modifier::REVERSED)
        } else {
            base
        };

        let w = if ch == '\t' {
            tab - col % tab
        } else {
            ch.width().unwrap_or(0) as u32
        };
        let start = col;
        col += w;
        if col < horiz_offset || (w > 0 && col == horiz_offset) {
            continue;
        }
        if start >= end_col {
            break;
        }

        let clipped = start < horiz_offset || col > end_col;
        if style != run_style && !run.is_empty() {
            spans.push(Span::styled(std::mem::take(&mut run), run_style));
        }
        run_style = style;
        if ch == '\t' || clipped {
            let visible = col.min(end_col) - start.max(horiz_offset);
            run.push_str(&" ".repeat(visible as usize));
        } else {
            run.push(ch);
        }
    }

    if !run.is_empty() {
        spans.push(Span::styled(run, run_style));
    }
    Line::from(spans)
}

fn render_placeholders(frame: &mut Frame, area: Rect, state: &AppState) {
    let focused = state.ui.focus == FocusTarget::Placeholders;
    let items = state.editor.placeholders();
    let block = pane_block(format!(" Placeholders ({}) ", items.len()), focused);

    if items.is_empty() {
        frame.render_widget(
            Paragraph::new("No placeholders. Press `a` to add one.")
                .style(Style::default().fg(Color::DarkGray))
                .block(block),
            area,
        );
        return;
    }

    let height = block.inner(area).height as usize;
    let cursor = state.ui.placeholder_cursor.min(items.len() - 1);
    // 每个占位符占两行
    let per_page = (height / 2).max(1);
    let first = cursor.saturating_sub(per_page - 1);

    let mut lines = Vec::new();
    for (index, placeholder) in items.iter().enumerate().skip(first).take(per_page) {
        let marker = if index == cursor && focused { "> " } else { "  " };
        lines.push(Line::from(vec![
            Span::raw(marker),
            Span::styled(placeholder.token(), token_style()),
        ]));
        let description = if placeholder.description.is_empty() {
            "(no description)".to_string()
        } else {
            placeholder.description.clone()
        };
        lines.push(Line::from(Span::styled(
            format!("    {description}"),
            Style::default().fg(Color::DarkGray),
        )));
    }

    frame.render_widget(Paragraph::new(lines).block(block), area);
}

fn render_status(frame: &mut Frame, area: Rect, state: &AppState) {
    let focus = match state.ui.focus {
        FocusTarget::Explorer => " FILES ",
        FocusTarget::Editor => " EDIT ",
        FocusTarget::Placeholders => " PLACEHOLDERS ",
    };
    let hint = match state.ui.focus {
        FocusTarget::Explorer => "f file  d folder  r repeating  x delete",
        FocusTarget::Editor => "Shift+arrows select  Shift+Tab next pane  Ctrl+P placeholders",
        FocusTarget::Placeholders => "a add  e edit  x delete  Enter insert",
    };
    let message = state.ui.status.as_deref().unwrap_or(hint);

    let save = if state.saving {
        Span::styled(" saving… ", Style::default().fg(Color::Yellow))
    } else if state.editor.has_changes() {
        Span::styled(
            " ● Ctrl+S save ",
            Style::default().fg(Color::Black).bg(Color::Yellow),
        )
    } else {
        Span::styled(" Ctrl+S save ", Style::default().fg(Color::DarkGray))
    };

    let line = Line::from(vec![
        Span::styled(focus, Style::default().fg(Color::Black).bg(Color::Cyan)),
        Span::raw(" "),
        Span::raw(message.to_string()),
    ]);
    let save_width = save.width() as u16;
    let cols = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Fill(1), Constraint::Length(save_width)])
        .split(area);

    frame.render_widget(Paragraph::new(line), cols[0]);
    frame.render_widget(Paragraph::new(Line::from(save)), cols[1]);
}

fn render_dialog(frame: &mut Frame, area: Rect, state: &AppState) {
    let dialog = &state.ui.input_dialog;
    let width = DIALOG_WIDTH.min(area.width);
    let height = 5.min(area.height);
    let rect = Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y + (area.height - height) / 2,
        width,
        height,
    };

    let block = Block::bordered()
        .title(format!(" {} ", dialog.title))
        .title_bottom(" Enter ok · Esc cancel ")
        .border_style(Style::default().fg(Color::Cyan));
    let inner_area = block.inner(rect);

    let mut lines = vec![Line::from(dialog.value.clone())];
    if let Some(error) = &dialog.error {
        lines.push(Line::from(Span::styled(
            error.clone(),
            Style::default().fg(Color::Red),
        )));
    }

    frame.render_widget(Clear, rect);
    frame.render_widget(Paragraph::new(lines).block(block), rect);

    let cursor = dialog.cursor.min(dialog.value.len());
    let x = dialog
        .value
        .get(..cursor)
        .map(UnicodeWidthStr::width)
        .unwrap_or(0) as u16;
    if x < inner_area.width && inner_area.height > 0 {
        frame.set_cursor_position((inner_area.x + x, inner_area.y));
    }
}

#[cfg(test)]
#[path = "../../tests/unit/tui/render.rs"]
mod tests;
