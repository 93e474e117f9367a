//! # WordCard Component
//!
//! The flashcard itself. Three looks:
//!
//! - **Word only**: the capitalized word and a hint to reveal it
//! - **Revealed**: word plus meaning and example sentence
//! - **Exhausted**: no words left, a congratulation and the restart hint
//!
//! While a lookup is running a spinner replaces the hint.

use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Flex, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Padding, Paragraph, Wrap};

use crate::core::lookup::DefinitionResult;
use crate::tui::component::Component;

const SPINNER_FRAMES: [&str; 10] = ["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"];

pub struct WordCard<'a> {
    pub word: Option<&'a str>,
    pub definition: Option<&'a DefinitionResult>,
    pub is_loading: bool,
    pub spinner_frame: usize,
}

impl<'a> WordCard<'a> {
    pub fn new(
        word: Option<&'a str>,
        definition: Option<&'a DefinitionResult>,
        is_loading: bool,
        spinner_frame: usize,
    ) -> Self {
        Self {
            word,
            definition,
            is_loading,
            spinner_frame,
        }
    }

    fn body_lines(&self) -> Vec<Line<'a>> {
        let Some(word) = self.word else {
            return vec![
                Line::from(Span::styled(
                    "Congratulations! You finished every word on your list!",
                    Style::default()
                        .fg(Color::Green)
                        .add_modifier(Modifier::BOLD),
                )),
                Line::default(),
                Line::from(Span::styled(
                    "Press r to start over.",
                    Style::default().fg(Color::DarkGray),
                )),
            ];
        };

        let mut lines = vec![
            Line::from(Span::styled(
                capitalize(word),
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD),
            )),
            Line::default(),
        ];

        if self.is_loading {
            let spinner = SPINNER_FRAMES[self.spinner_frame % SPINNER_FRAMES.len()];
            lines.push(Line::from(Span::styled(
                format!("{spinner} Asking the model..."),
                Style::default().fg(Color::Magenta),
            )));
        } else if let Some(definition) = self.definition {
            lines.push(labeled("Meaning", definition.meaning_or_placeholder(), Color::Green));
            lines.push(Line::default());
            lines.push(labeled("Example", definition.usage_or_placeholder(), Color::Cyan));
        } else {
            lines.push(Line::from(Span::styled(
                "Press Space to show the meaning",
                Style::default().fg(Color::DarkGray),
            )));
        }
        lines
    }
}

fn labeled<'a>(label: &'static str, text: &str, color: Color) -> Line<'a> {
    Line::from(vec![
        Span::styled(
            format!("{label}: "),
            Style::default().fg(color).add_modifier(Modifier::BOLD),
        ),
        Span::raw(text.to_string()),
    ])
}

/// First character upper-cased, the rest lower-cased.
pub fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first
            .to_uppercase()
            .chain(chars.flat_map(char::to_lowercase))
            .collect(),
        None => String::new(),
    }
}

/// Rows the wrapped body needs, capped at the space available.
fn body_height(paragraph: &Paragraph<'_>, inner: Rect) -> u16 {
    u16::try_from(paragraph.line_count(inner.width))
        .unwrap_or(u16::MAX)
        .min(inner.height)
}

impl Component for WordCard<'_> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let block = Block::bordered()
            .border_style(Style::default().fg(Color::Gray))
            .padding(Padding::uniform(1));
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let paragraph = Paragraph::new(self.body_lines())
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true });
        let height = body_height(&paragraph, inner);
        let [body] = Layout::vertical([Constraint::Length(height)])
            .flex(Flex::Center)
            .areas(inner);
        frame.render_widget(paragraph, body);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::render_to_string;

    #[test]
    fn test_body_height_caps_huge_line_counts() {
        let lines: Vec<Line> = (0..65_537).map(|_| Line::from("a")).collect();
        let paragraph = Paragraph::new(lines);
        assert_eq!(body_height(&paragraph, Rect::new(0, 0, 10, 5)), 5);
    }

    #[test]
    fn test_body_height_fits_short_text() {
        let paragraph = Paragraph::new("one line");
        assert_eq!(body_height(&paragraph, Rect::new(0, 0, 40, 5)), 1);
    }

    fn render(card: WordCard<'_>) -> String {
        let mut card = card;
        render_to_string(70, 14, |f| {
            let area = f.area();
            card.render(f, area);
        })
    }

    #[test]
    fn test_capitalize() {
        assert_eq!(capitalize("example"), "Example");
        assert_eq!(capitalize("eXAMPLE"), "Example");
        assert_eq!(capitalize("ışık"), "Işık");
        assert_eq!(capitalize(""), "");
    }

    #[test]
    fn test_card_shows_word_and_hint() {
        let screen = render(WordCard::new(Some("serendipity"), None, false, 0));
        assert!(screen.contains("Serendipity"));
        assert!(screen.contains("Press Space to show the meaning"));
    }

    #[test]
    fn test_card_shows_definition() {
        let def = DefinitionResult {
            meaning: Some("tesadüf (isim)".to_string()),
            usage: None,
        };
        let screen = render(WordCard::new(Some("serendipity"), Some(&def), false, 0));
        assert!(screen.contains("Meaning: tesadüf (isim)"));
        assert!(screen.contains("Example: Not found."));
    }

    #[test]
    fn test_card_spinner_while_loading() {
        let screen = render(WordCard::new(Some("word"), None, true, 3));
        assert!(screen.contains("Asking the model..."));
        assert!(!screen.contains("Press Space"));
    }

    #[test]
    fn test_card_exhausted() {
        let screen = render(WordCard::new(None, None, false, 0));
        assert!(screen.contains("Congratulations!"));
        assert!(screen.contains("Press r to start over."));
    }
}
