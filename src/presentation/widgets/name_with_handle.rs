use ratatui::prelude::*;

use crate::domain::UserRef;

/// Bold display name followed by the gray `@username`
pub struct NameWithHandle {
    display_name: String,
    username: String,
    highlighted: bool,
}

impl NameWithHandle {
    pub fn new(user: &UserRef, highlighted: bool) -> Self {
        Self {
            display_name: user.name().to_string(),
            username: user.username.clone(),
            highlighted,
        }
    }

    pub fn display_name_style(&self) -> Style {
        if self.highlighted {
            Style::default().bold().reversed()
        } else {
            Style::default().bold()
        }
    }

    pub fn handle_style(&self) -> Style {
        Style::default().italic().fg(Color::Gray)
    }
}

impl From<NameWithHandle> for Line<'static> {
    fn from(widget: NameWithHandle) -> Self {
        let display_name_style = widget.display_name_style();
        let handle_style = widget.handle_style();
        Line::from(vec![
            Span::styled(widget.display_name, display_name_style),
            Span::raw(" "),
            Span::styled(format!("@{}", widget.username), handle_style),
        ])
    }
}

impl Widget for NameWithHandle {
    fn render(self, area: Rect, buf: &mut Buffer)
    where
        Self: Sized,
    {
        let line: Line = self.into();
        line.render(area, buf);
    }
}
