use ratatui::{prelude::*, widgets::*};

use crate::domain::UserRef;

/// Centered `displayName@username` card with the profile image name
pub struct ProfileCard<'a> {
    user: &'a UserRef,
}

impl<'a> ProfileCard<'a> {
    pub const HEIGHT: u16 = 4;

    pub fn new(user: &'a UserRef) -> Self {
        Self { user }
    }
}

impl<'a> Widget for ProfileCard<'a> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let image = self.user.image.as_deref().unwrap_or("default avatar");
        let text = Text::from(vec![
            Line::styled(self.user.handle(), Style::default().bold()),
            Line::styled(image.to_string(), Style::default().fg(Color::Gray)),
        ]);
        Paragraph::new(text)
            .alignment(Alignment::Center)
            .block(Block::default().borders(Borders::ALL).title("Profile"))
            .render(area, buf);
    }
}
