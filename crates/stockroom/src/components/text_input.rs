//! Labelled single-line input box.
//!
//! ```text
//! ╭Cost*─────────────────╮
//! │0.00                  │
//! ╰──────────────────────╯
//! Must be more than zero
//! ```

use ratatui::{
    buffer::Buffer,
    layout::{Position, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Paragraph, Widget},
};

pub const DEFAULT_PLACEHOLDER: &str = "Type here";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum InputKind {
    #[default]
    Text,
    /// Only characters that can appear in a decimal number are accepted.
    Number,
}

impl InputKind {
    pub fn accepts(self, c: char) -> bool {
        match self {
            InputKind::Text => true,
            InputKind::Number => c.is_ascii_digit() || matches!(c, '.' | '-' | '+' | 'e' | 'E'),
        }
    }
}

#[derive(Debug, Clone)]
pub struct TextInput<'a> {
    label: &'a str,
    value: &'a str,
    placeholder: &'a str,
    kind: InputKind,
    required: bool,
    error: Option<&'a str>,
    disabled: bool,
    focused: bool,
    scroll: u16,
}

impl<'a> TextInput<'a> {
    pub fn new(value: &'a str) -> Self {
        Self {
            label: "",
            value,
            placeholder: DEFAULT_PLACEHOLDER,
            kind: InputKind::Text,
            required: false,
            error: None,
            disabled: false,
            focused: false,
            scroll: 0,
        }
    }

    pub fn label(mut self, label: &'a str) -> Self {
        self.label = label;
        self
    }

    pub fn placeholder(mut self, placeholder: &'a str) -> Self {
        self.placeholder = placeholder;
        self
    }

    pub fn kind(mut self, kind: InputKind) -> Self {
        self.kind = kind;
        self
    }

    pub fn required(mut self, required: bool) -> Self {
        self.required = required;
        self
    }

    pub fn error(mut self, error: Option<&'a str>) -> Self {
        self.error = error.filter(|e| !e.is_empty());
        self
    }

    pub fn disabled(mut self, disabled: bool) -> Self {
        self.disabled = disabled;
        self
    }

    pub fn focused(mut self, focused: bool) -> Self {
        self.focused = focused;
        self
    }

    /// Horizontal scroll of the value, in columns.
    pub fn scroll(mut self, scroll: usize) -> Self {
        self.scroll = scroll.min(u16::MAX as usize) as u16;
        self
    }

    pub fn input_kind(&self) -> InputKind {
        self.kind
    }

    /// Rows needed: the box plus one row when an error is shown.
    pub fn height(&self) -> u16 {
        if self.error.is_some() {
            4
        } else {
            3
        }
    }

    /// Terminal cursor for a caret at `cursor` columns into the value.
    pub fn cursor_position(&self, area: Rect, cursor: usize) -> Position {
        let offset = cursor.saturating_sub(self.scroll as usize) as u16;
        let max_x = area.right().saturating_sub(2);
        Position::new((area.x + 1 + offset).min(max_x), area.y + 1)
    }

    fn border_style(&self) -> Style {
        if self.disabled {
            Style::default().fg(Color::DarkGray)
        } else if self.error.is_some() {
            Style::default().fg(Color::Red)
        } else if self.focused {
            Style::default().fg(Color::Yellow)
        } else {
            Style::default().fg(Color::Gray)
        }
    }
}

impl Widget for TextInput<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.height < 3 {
            return;
        }
        let field = Rect { height: 3, ..area };

        let mut title = Vec::new();
        if !self.label.is_empty() {
            title.push(Span::styled(
                self.label,
                Style::default().add_modifier(Modifier::BOLD),
            ));
        }
        if self.required {
            title.push(Span::styled(
                "*",
                Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
            ));
        }

        let block = Block::bordered()
            .border_type(BorderType::Rounded)
            .border_style(self.border_style())
            .title(Line::from(title));

        let content = if self.value.is_empty() {
            Line::from(Span::styled(
                self.placeholder,
                Style::default()
                    .fg(Color::DarkGray)
                    .add_modifier(Modifier::ITALIC),
            ))
        } else if self.disabled {
            Line::from(Span::styled(self.value, Style::default().fg(Color::DarkGray)))
        } else {
            Line::from(self.value)
        };

        Paragraph::new(content)
            .block(block)
            .scroll((0, self.scroll))
            .render(field, buf);

        if let Some(error) = self.error {
            if area.height > 3 {
                let row = Rect {
                    y: area.y + 3,
                    height: 1,
                    ..area
                };
                Line::from(Span::styled(error, Style::default().fg(Color::Red))).render(row, buf);
            }
        }
    }
}
