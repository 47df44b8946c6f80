use ratatui::{prelude::*, widgets::*};

use crate::{domain::UserRef, presentation::widgets::name_with_handle::NameWithHandle};

/// One row of the user directory
#[derive(Clone, Debug)]
pub struct UserItem {
    pub user: UserRef,
    pub highlight: bool,
}

impl UserItem {
    pub const HEIGHT: u16 = 2;

    pub fn new(user: UserRef) -> Self {
        Self {
            user,
            highlight: false,
        }
    }
}

impl Widget for UserItem {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let image = self
            .user
            .image
            .as_deref()
            .map_or_else(|| String::from("default avatar"), |image| format!("image: {image}"));
        let text = Text::from(vec![
            Line::from(NameWithHandle::new(&self.user, self.highlight)),
            Line::styled(image, Style::default().fg(Color::DarkGray)),
        ]);
        Paragraph::new(text).render(area, buf);
    }
}
