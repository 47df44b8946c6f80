//! Status bar component
//!
//! Two lines at the bottom of the screen: who is logged in, then the latest
//! status or error message.

use ratatui::{prelude::*, widgets::*};

use crate::model::{session::Session, status_bar::StatusBar};

#[derive(Debug, Clone, Default)]
pub struct StatusBarComponent;

impl StatusBarComponent {
    pub fn new() -> Self {
        Self
    }

    pub fn user_line(session: &Session) -> String {
        match session.user() {
            Some(user) => format!("Logged in as {}", user.handle()),
            None => String::from("Not logged in"),
        }
    }

    pub fn view(&self, session: &Session, status_bar: &StatusBar, frame: &mut Frame<'_>, area: Rect) {
        let [user_area, message_area] =
            Layout::vertical([Constraint::Length(1), Constraint::Length(1)]).areas(area);

        frame.render_widget(Clear, area);
        frame.render_widget(
            Paragraph::new(Span::styled(
                Self::user_line(session),
                Style::default().fg(Color::Gray).italic(),
            ))
            .style(Style::default().bg(Color::Black)),
            user_area,
        );

        let style = if status_bar.is_error() {
            Style::default().fg(Color::Red)
        } else {
            Style::default()
        };
        frame.render_widget(
            Paragraph::new(status_bar.message().unwrap_or_default().to_string()).style(style),
            message_area,
        );
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::{domain::UserRef, model::session::Message};

    #[test]
    fn test_user_line() {
        let mut session = Session::default();
        assert_eq!(StatusBarComponent::user_line(&session), "Not logged in");

        session.update(Message::LoggedIn(UserRef::new(1, "user1", "display1")));
        assert_eq!(
            StatusBarComponent::user_line(&session),
            "Logged in as display1@user1"
        );
    }
}
