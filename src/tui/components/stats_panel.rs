//! # StatsPanel Component
//!
//! Sidebar with the size of both word lists.

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Padding, Paragraph};

use crate::tui::component::Component;

pub struct StatsPanel {
    pub to_learn: usize,
    pub known: usize,
}

impl StatsPanel {
    pub fn new(to_learn: usize, known: usize) -> Self {
        Self { to_learn, known }
    }

    fn line(label: &str, value: usize, color: Color) -> Line<'static> {
        Line::from(vec![
            Span::raw(format!("{label}: ")),
            Span::styled(
                value.to_string(),
                Style::default().fg(color).add_modifier(Modifier::BOLD),
            ),
        ])
    }
}

impl Component for StatsPanel {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let lines = vec![
            Self::line("To learn", self.to_learn, Color::Yellow),
            Self::line("Known", self.known, Color::Green),
        ];
        let block = Block::bordered()
            .title("Statistics")
            .border_style(Style::default().fg(Color::DarkGray))
            .padding(Padding::horizontal(1));
        frame.render_widget(Paragraph::new(lines).block(block), area);
    }
}
