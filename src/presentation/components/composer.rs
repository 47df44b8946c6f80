use ratatui::{prelude::*, widgets::*};

use crate::model::composer::Composer;

#[derive(Debug, Clone, Default)]
pub struct ComposerComponent;

impl ComposerComponent {
    pub fn new() -> Self {
        Self
    }

    pub fn view(&self, composer: &Composer<'_>, frame: &mut Frame<'_>, area: Rect) {
        if !composer.is_active() {
            return;
        }

        let [input_area, message_area] =
            Layout::vertical([Constraint::Min(3), Constraint::Length(1)]).areas(area);

        frame.render_widget(Clear, area);
        frame.render_widget(composer.textarea(), input_area);

        let message = match (composer.is_pending(), composer.error()) {
            (true, _) => Line::styled("Posting...", Style::default().fg(Color::Gray)),
            (false, Some(error)) => Line::styled(error.to_string(), Style::default().fg(Color::Red)),
            (false, None) => Line::default(),
        };
        frame.render_widget(Paragraph::new(message), message_area);
    }
}
