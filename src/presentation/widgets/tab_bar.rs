use ratatui::{prelude::*, widgets::Tabs};
use strum::IntoEnumIterator;

use crate::core::app::View;

pub struct TabBarWidget {
    current: View,
}

impl TabBarWidget {
    pub fn new(current: View) -> Self {
        Self { current }
    }

    /// Tab titles, prefixed with the key selecting them
    pub fn titles() -> Vec<String> {
        View::iter()
            .enumerate()
            .map(|(index, view)| format!("{} {view}", index + 1))
            .collect()
    }

    fn selected_index(&self) -> usize {
        View::iter()
            .position(|view| view == self.current)
            .unwrap_or_default()
    }
}

impl Widget for TabBarWidget {
    fn render(self, area: Rect, buf: &mut Buffer)
    where
        Self: Sized,
    {
        Tabs::new(Self::titles())
            .select(self.selected_index())
            .style(Style::default().bg(Color::Black))
            .highlight_style(Style::default().reversed())
            .render(area, buf);
    }
}
