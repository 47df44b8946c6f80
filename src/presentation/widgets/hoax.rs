use ratatui::{prelude::*, widgets::*};

use crate::{
    domain::{text, Hoax},
    presentation::widgets::name_with_handle::NameWithHandle,
};

/// Name line, timestamp line and separator
const FIXED_LINES: u16 = 3;

/// One hoax in a feed list
#[derive(Clone, Debug)]
pub struct HoaxWidget {
    pub hoax: Hoax,
    pub padding: Padding, // Only used to compute width and height
    pub highlight: bool,
}

impl HoaxWidget {
    pub fn new(hoax: Hoax, padding: Padding) -> Self {
        Self {
            hoax,
            padding,
            highlight: false,
        }
    }

    pub fn timestamp(&self) -> String {
        self.hoax.local_timestamp()
    }

    fn content(&self, width: usize, max_height: usize) -> Text<'static> {
        Text::from(text::truncate_text(
            &text::wrap_text(&self.hoax.content, width),
            max_height,
        ))
    }

    pub fn calculate_height(&self, area: &Rect) -> u16 {
        let width = area
            .width
            .saturating_sub(self.padding.left + self.padding.right);
        let available_height = area
            .height
            .saturating_sub(self.padding.top + self.padding.bottom + FIXED_LINES);
        let content = self.content(width as usize, available_height as usize);
        FIXED_LINES + content.height() as u16
    }
}

impl Widget for HoaxWidget {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let mut text = Text::from(Line::from(NameWithHandle::new(
            &self.hoax.user,
            self.highlight,
        )));
        let content_height = area.height.saturating_sub(FIXED_LINES);
        text.extend(self.content(area.width as usize, content_height as usize));
        text.extend(Text::from(Line::styled(
            self.timestamp(),
            Style::default().fg(Color::Gray),
        )));
        text.extend(Text::styled(
            "─".repeat(area.width as usize),
            Style::default().fg(Color::Gray),
        ));
        Paragraph::new(text).render(area, buf);
    }
}
