use ratatui::{prelude::*, widgets::*};
use tui_widget_list::{ListBuilder, ListState, ListView};

use crate::{
    model::{directory::DirectoryPaginator, selection::Selection},
    presentation::{components::feed::LOADING_LABEL, widgets::user_item::UserItem},
};

#[derive(Debug, Clone, Default)]
pub struct DirectoryComponent;

impl DirectoryComponent {
    pub fn new() -> Self {
        Self
    }

    /// `< previous | page N | next >`, offering only the available directions
    pub fn pager(directory: &DirectoryPaginator) -> String {
        let mut parts = Vec::new();
        if directory.can_go_previous() {
            parts.push(String::from("< previous ([)"));
        }
        parts.push(format!("page {}", directory.page().page_index + 1));
        if directory.can_go_next() {
            parts.push(String::from("next (]) >"));
        }
        parts.join(" | ")
    }

    pub fn view(
        &self,
        directory: &DirectoryPaginator,
        selection: &Selection,
        frame: &mut Frame<'_>,
        area: Rect,
    ) {
        let block = Block::default().borders(Borders::ALL).title("Users");
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let [list_area, status_area, pager_area] = Layout::vertical([
            Constraint::Min(0),
            Constraint::Length(1),
            Constraint::Length(1),
        ])
        .areas(inner);

        let items: Vec<UserItem> = directory.items().iter().cloned().map(UserItem::new).collect();
        let item_count = items.len();
        let builder = ListBuilder::new(move |context| {
            let mut item = items[context.index].clone();
            item.highlight = context.is_selected;
            (item, UserItem::HEIGHT)
        });
        let mut list_state = ListState::default();
        list_state.select(selection.selected_index());
        frame.render_stateful_widget(
            ListView::new(builder, item_count).block(Block::default().padding(Padding::horizontal(1))),
            list_area,
            &mut list_state,
        );

        let status = match (directory.is_loading(), directory.error()) {
            (true, _) => Line::from(LOADING_LABEL),
            (false, Some(error)) => Line::styled(error.to_string(), Style::default().fg(Color::Red)),
            (false, None) => Line::default(),
        };
        frame.render_widget(Paragraph::new(status).alignment(Alignment::Center), status_area);
        frame.render_widget(
            Paragraph::new(Self::pager(directory)).alignment(Alignment::Center),
            pager_area,
        );
    }
}
