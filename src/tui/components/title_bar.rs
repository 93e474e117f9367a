//! # TitleBar Component
//!
//! Top status bar: app name, active model, and the latest status message.
//!
//! Purely presentational. All data arrives as props, so the title text is
//! easy to check in tests:
//!
//! 1. **Status message**: `"wordcards (gemini: gemini-flash-lite-latest) | Looking up 'word'..."`
//! 2. **Default**: `"wordcards (gemini: gemini-flash-lite-latest)"`

use crate::tui::component::Component;
use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};

/// Top status bar component.
pub struct TitleBar<'a> {
    pub provider_name: &'a str,
    pub model_name: &'a str,
    pub status_message: &'a str,
}

impl<'a> TitleBar<'a> {
    pub fn new(provider_name: &'a str, model_name: &'a str, status_message: &'a str) -> Self {
        Self {
            provider_name,
            model_name,
            status_message,
        }
    }

    pub fn title_text(&self) -> String {
        let base = format!("wordcards ({}: {})", self.provider_name, self.model_name);
        if self.status_message.is_empty() {
            base
        } else {
            format!("{base} | {}", self.status_message)
        }
    }
}

impl Component for TitleBar<'_> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let line = Line::from(Span::styled(
            self.title_text(),
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        ));
        frame.render_widget(line, area);
    }
}
