//! Feed component
//!
//! Renders a feed read-only: new-hoax banner, hoax list, then the
//! "Load More" footer. All state comes from the synchronizer.

use ratatui::{prelude::*, widgets::*};
use tui_widget_list::{ListBuilder, ListState, ListView};

use crate::{
    domain::text::new_hoax_banner,
    model::{
        feed::{FeedSynchronizer, LoadState},
        selection::Selection,
    },
    presentation::widgets::hoax::HoaxWidget,
};

pub const LOADING_LABEL: &str = "Loading...";
pub const EMPTY_LABEL: &str = "There are no hoaxes";
pub const LOAD_MORE_LABEL: &str = "Load More";

#[derive(Debug, Clone, Default)]
pub struct FeedComponent;

impl FeedComponent {
    pub fn new() -> Self {
        Self
    }

    /// Line above the list while newer hoaxes are known or loading
    pub fn banner(feed: &FeedSynchronizer) -> Option<Line<'static>> {
        if feed.load_state() == LoadState::LoadingNewer {
            return Some(Line::from(LOADING_LABEL));
        }
        let pending = feed.pending_newer_count();
        (pending > 0).then(|| {
            Line::styled(
                format!("{} (n)", new_hoax_banner(pending)),
                Style::default().fg(Color::Cyan).bold(),
            )
        })
    }

    /// Footer line below the list, if any
    pub fn footer(feed: &FeedSynchronizer) -> Option<Line<'static>> {
        if let Some(error) = feed.last_error() {
            return Some(Line::styled(error.to_string(), Style::default().fg(Color::Red)));
        }
        match feed.load_state() {
            LoadState::LoadingOlder => Some(Line::from(LOADING_LABEL)),
            _ if feed.has_more_older() => Some(Line::styled(
                format!("{LOAD_MORE_LABEL} (m)"),
                Style::default().fg(Color::Cyan),
            )),
            _ => None,
        }
    }

    pub fn view(
        &self,
        feed: &FeedSynchronizer,
        selection: &Selection,
        title: &str,
        frame: &mut Frame<'_>,
        area: Rect,
    ) {
        let block = Block::default()
            .borders(Borders::ALL)
            .title(title.to_string());
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let banner = Self::banner(feed);
        if feed.is_empty() && banner.is_none() {
            let label = match (feed.load_state(), feed.last_error()) {
                (LoadState::LoadingInitial, _) => Line::from(LOADING_LABEL),
                (_, Some(error)) => {
                    Line::styled(error.to_string(), Style::default().fg(Color::Red))
                }
                _ => Line::styled(EMPTY_LABEL, Style::default().fg(Color::DarkGray)),
            };
            frame.render_widget(Paragraph::new(label).alignment(Alignment::Center), inner);
            return;
        }

        let footer = Self::footer(feed);
        let [banner_area, list_area, footer_area] = Layout::vertical([
            Constraint::Length(u16::from(banner.is_some())),
            Constraint::Min(0),
            Constraint::Length(u16::from(footer.is_some())),
        ])
        .areas(inner);

        if let Some(banner) = banner {
            frame.render_widget(
                Paragraph::new(banner).alignment(Alignment::Center),
                banner_area,
            );
        }

        let padding = Padding::horizontal(1);
        let items: Vec<HoaxWidget> = feed
            .items()
            .iter()
            .map(|hoax| HoaxWidget::new(hoax.clone(), padding))
            .collect();
        let item_count = items.len();
        let builder = ListBuilder::new(move |context| {
            let mut item = items[context.index].clone();
            item.highlight = context.is_selected;
            let height = item.calculate_height(&list_area);
            (item, height)
        });
        let mut list_state = ListState::default();
        list_state.select(selection.selected_index());
        let list = ListView::new(builder, item_count).block(Block::default().padding(padding));
        frame.render_stateful_widget(list, list_area, &mut list_state);

        if let Some(footer) = footer {
            frame.render_widget(
                Paragraph::new(footer).alignment(Alignment::Center),
                footer_area,
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use ratatui::{backend::TestBackend, Terminal};

    use super::*;
    use crate::{
        domain::{FeedScope, HoaxId, Page},
        infrastructure::poll::RecordingPoller,
        model::feed::{FeedConfig, FeedResponse},
    };

    fn empty_feed_with_pending(count: u64) -> (FeedSynchronizer, RecordingPoller) {
        let poller = RecordingPoller::new();
        let mut feed = FeedSynchronizer::new(FeedConfig::default(), Box::new(poller.clone()));
        let request = feed.initialize(FeedScope::Global).expect("initialize");
        feed.handle_response(
            request.session,
            FeedResponse::InitialPageLoaded(Ok(Page::default())),
        );
        let tick = poller.current_tick().expect("polling");
        let probe = feed.check_newer_count(tick).expect("count probe");
        feed.handle_response(
            probe.session,
            FeedResponse::NewerCountChecked {
                after: HoaxId::ZERO,
                result: Ok(count),
            },
        );
        (feed, poller)
    }

    fn render(feed: &FeedSynchronizer) -> String {
        let mut terminal = Terminal::new(TestBackend::new(60, 8)).expect("terminal");
        terminal
            .draw(|frame: &mut Frame<'_>| {
                let area = frame.area();
                FeedComponent::new().view(feed, &Selection::new(), "Home", frame, area);
            })
            .expect("draw");
        let buffer = terminal.backend().buffer();
        buffer
            .content()
            .chunks(buffer.area.width as usize)
            .map(|row| row.iter().map(|cell| cell.symbol()).collect::<String>())
            .collect::<Vec<_>>()
            .join("\n")
    }

    #[test]
    fn test_empty_feed_shows_placeholder() {
        let (feed, _poller) = empty_feed_with_pending(0);
        let screen = render(&feed);
        assert!(screen.contains(EMPTY_LABEL), "{screen}");
        assert_eq!(FeedComponent::banner(&feed), None);
    }

    #[test]
    fn test_empty_feed_shows_new_hoax_banner() {
        let (feed, _poller) = empty_feed_with_pending(2);
        assert_eq!(feed.pending_newer_count(), 2);

        let screen = render(&feed);
        assert!(screen.contains("There are 2 new hoaxes (n)"), "{screen}");
        assert!(!screen.contains(EMPTY_LABEL), "{screen}");
    }

    #[test]
    fn test_banner_shows_loading_while_newer_hoaxes_load() {
        let (mut feed, _poller) = empty_feed_with_pending(1);
        let _ = feed.load_newer().expect("load newer");
        assert_eq!(feed.load_state(), LoadState::LoadingNewer);

        let screen = render(&feed);
        assert!(screen.contains(LOADING_LABEL), "{screen}");
        assert!(!screen.contains("new hoax"), "{screen}");
    }
}
