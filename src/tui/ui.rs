use crate::core::state::App;
use crate::tui::component::Component;
use crate::tui::components::{StatsPanel, TitleBar, WordCard};

use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Color, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

/// Width of the statistics sidebar.
const SIDEBAR_WIDTH: u16 = 22;

const KEY_HINTS: &str = "Space: meaning   k: I know it   s: next word   r: restart   q: quit";

pub fn draw_ui(frame: &mut Frame, app: &App, spinner_frame: usize) {
    use Constraint::{Length, Min};
    let layout = Layout::vertical([Length(1), Min(0), Length(1), Length(1)]);
    let [title_area, main_area, message_area, hints_area] = layout.areas(frame.area());

    TitleBar::new(
        app.lookup.provider_name(),
        app.model_name(),
        &app.status_message,
    )
    .render(frame, title_area);

    let [card_area, sidebar_area] =
        Layout::horizontal([Min(0), Length(SIDEBAR_WIDTH)]).areas(main_area);

    WordCard::new(
        app.current_word.as_deref(),
        app.definition.as_ref(),
        app.is_loading,
        spinner_frame,
    )
    .render(frame, card_area);

    StatsPanel::new(app.lists.to_learn.len(), app.lists.known.len()).render(frame, sidebar_area);

    draw_error_line(frame, message_area, app.error.as_deref());

    frame.render_widget(
        Paragraph::new(Span::styled(KEY_HINTS, Style::default().fg(Color::DarkGray))),
        hints_area,
    );
}

fn draw_error_line(frame: &mut Frame, area: Rect, error: Option<&str>) {
    if let Some(error_msg) = error {
        let line = Line::from(Span::styled(
            format!("Error: {error_msg}"),
            Style::default().fg(Color::Red),
        ));
        frame.render_widget(line, area);
    }
}
