//! Shared UI components (status bar, modal frame, info and help dialogs).
//!
use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph, Widget, Wrap};

use crate::app::keymap::KeyAction;
use crate::app::theme::Theme;
use crate::app::{AppState, InputMode, ModalState};

/// Render the bottom status bar with mode, counts and the last action.
pub fn render_status_bar(f: &mut Frame, area: Rect, app: &AppState) {
    let mode = match app.input_mode {
        InputMode::Normal => "NORMAL",
        InputMode::Search => "SEARCH",
        InputMode::Modal => "MODAL",
    };
    let filter = if app.search_query.is_empty() {
        String::new()
    } else {
        format!("  filter:\"{}\"", app.search_query)
    };
    let last = app
        .status_message
        .as_deref()
        .map(|m| format!("  | {m}"))
        .unwrap_or_default();
    let msg = format!(
        "mode: {mode}  showing:{}/{}{}{}  ?: help",
        app.visible_len(),
        match app.active_tab {
            crate::app::ActiveTab::Users => app.users().len(),
            crate::app::ActiveTab::Roles => app.roles.len(),
        },
        filter,
        last
    );
    let p = Paragraph::new(msg).style(Style::default().fg(app.theme.status_fg).bg(app.theme.status_bg));
    f.render_widget(p, area);
}

/// Compute a rectangle centered within `area` with a maximum size.
pub fn centered_rect(width: u16, height: u16, area: Rect) -> Rect {
    let x = area.x + area.width.saturating_sub(width) / 2;
    let y = area.y + area.height.saturating_sub(height) / 2;
    Rect {
        x,
        y,
        width: width.min(area.width),
        height: height.min(area.height),
    }
}

/// Titled overlay panel. Holds no state: the caller decides whether it is open
/// and handles the close key itself.
pub struct Modal<'a> {
    pub title: &'a str,
    pub width: u16,
    pub height: u16,
    pub theme: &'a Theme,
}

impl<'a> Modal<'a> {
    pub fn new(title: &'a str, width: u16, height: u16, theme: &'a Theme) -> Self {
        Self { title, width, height, theme }
    }

    /// Dim the screen, draw the panel and put `content` inside it.
    /// Draws nothing when `open` is false; returns the panel area otherwise.
    pub fn render<W: Widget>(self, f: &mut Frame, area: Rect, open: bool, content: W) -> Option<Rect> {
        if !open {
            return None;
        }
        f.buffer_mut().set_style(area, Style::default().add_modifier(Modifier::DIM));
        let rect = centered_rect(self.width, self.height, area);
        let block = Block::default()
            .title(Span::styled(self.title, Style::default().fg(self.theme.title).add_modifier(Modifier::BOLD)))
            .title(Line::from("Esc ✕").right_aligned())
            .borders(Borders::ALL)
            .border_style(Style::default().fg(self.theme.border));
        let inner = block.inner(rect);
        f.render_widget(Clear, rect);
        f.render_widget(block, rect);
        f.render_widget(content, inner);
        Some(rect)
    }
}

/// Render a generic informational modal dialog.
pub fn render_info_modal(f: &mut Frame, area: Rect, app: &AppState, state: &ModalState) {
    if let ModalState::Info { message } = state {
        let max_w = area.width.saturating_sub(6).max(30);
        let width = 50u16.min(max_w);
        let approx_lines = (message.len() as u16 / width.saturating_sub(4).max(10)).max(1);
        let height = (approx_lines + 4).min(area.height.saturating_sub(2)).max(5);
        let body = Paragraph::new(vec![
            Line::raw(message.clone()),
            Line::raw(""),
            Line::styled("Enter / Esc to close", Style::default().fg(app.theme.muted)),
        ])
        .wrap(Wrap { trim: false });
        Modal::new("Info", width, height, &app.theme).render(f, area, true, body);
    }
}

/// Render the help modal: the keymap's bindings plus the fixed form keys.
pub fn render_help_modal(f: &mut Frame, area: Rect, app: &AppState, scroll: u16) {
    let width = 64u16.min(area.width.saturating_sub(4)).max(40);
    let height = 24u16.min(area.height.saturating_sub(2)).max(10);

    let key_style = Style::default().add_modifier(Modifier::ITALIC);
    let heading = |s: &'static str| Line::from(Span::styled(s, Style::default().add_modifier(Modifier::BOLD)));
    let row = |label: &str, keys: String| {
        Line::from(vec![Span::raw(format!("  {:>16} │ ", label)), Span::styled(keys, key_style)])
    };

    let mut lines: Vec<Line> = vec![heading("Table")];
    for action in KeyAction::ALL {
        if action == KeyAction::Ignore {
            continue;
        }
        let keys = app.keymap.keys_for(action);
        if keys.is_empty() {
            continue;
        }
        lines.push(row(action.label(), keys.join(", ")));
    }
    lines.push(Line::raw(""));
    lines.push(heading("Search prompt"));
    lines.push(row("Keep filter", "Enter".into()));
    lines.push(row("Clear filter", "Esc".into()));
    lines.push(Line::raw(""));
    lines.push(heading("User form"));
    lines.push(row("Next field", "Tab, Down".into()));
    lines.push(row("Previous field", "BackTab, Up".into()));
    lines.push(row("Change role/status", "Left, Right, Space".into()));
    lines.push(row("Submit", "Enter".into()));
    lines.push(row("Cancel", "Esc".into()));
    lines.push(Line::raw(""));
    lines.push(heading("Delete prompt"));
    lines.push(row("Yes / No", "y / n".into()));
    lines.push(row("Choose", "Left, Right, Enter".into()));

    let p = Paragraph::new(lines).wrap(Wrap { trim: false }).scroll((scroll, 0));
    Modal::new("Help", width, height, &app.theme).render(f, area, true, p);
}
