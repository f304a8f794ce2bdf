use crossterm::event::{KeyCode, KeyEventKind};
use ratatui::{
    Frame,
    layout::{Constraint, Layout, Rect},
    style::Style,
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph, Wrap},
};
use tui_dispatch::{DataResource, EventKind};

use super::{Component, NEWS_CARD_HEIGHT, NewsCard, NewsCardProps};
use crate::action::Action;
use crate::news::NewsSource;
use crate::state::{AppState, NO_NEWS_SOURCE};

/// Scrollable column of news cards
#[derive(Default)]
pub struct NewsFeed;

pub struct NewsFeedProps<'a> {
    pub state: &'a AppState,
    pub is_focused: bool,
}

/// First visible card so that `selected` stays on screen.
fn scroll_offset(selected: usize, visible: usize) -> usize {
    if visible == 0 {
        return selected;
    }
    selected.saturating_sub(visible - 1)
}

impl Component<Action> for NewsFeed {
    type Props<'a> = NewsFeedProps<'a>;

    fn handle_event(
        &mut self,
        event: &EventKind,
        props: Self::Props<'_>,
    ) -> impl IntoIterator<Item = Action> {
        if !props.is_focused {
            return None;
        }

        let EventKind::Key(key) = event else {
            return None;
        };
        if key.kind == KeyEventKind::Release {
            return None;
        }

        let selected = props.state.news_selected;
        let last = props.state.articles().len().saturating_sub(1);
        match key.code {
            KeyCode::Down | KeyCode::Char('j') => Some(Action::NewsSelect(selected + 1)),
            KeyCode::Up | KeyCode::Char('k') => selected.checked_sub(1).map(Action::NewsSelect),
            KeyCode::Home | KeyCode::Char('g') => Some(Action::NewsSelect(0)),
            KeyCode::End | KeyCode::Char('G') => Some(Action::NewsSelect(last)),
            KeyCode::Char('r') | KeyCode::F(5) => Some(Action::NewsFetch),
            KeyCode::Char('u') => Some(Action::UiToggleUnits),
            KeyCode::Char('q') | KeyCode::Esc => Some(Action::Quit),
            _ => None,
        }
    }

    fn render(&mut self, frame: &mut Frame, area: Rect, props: Self::Props<'_>) {
        let state = props.state;
        let palette = state.config.theme.palette();

        let block = Block::default()
            .title(" News ")
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(if props.is_focused {
                palette.selected_border
            } else {
                palette.border
            }))
            .style(Style::default().bg(palette.bg).fg(palette.fg));
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let message = match &state.news {
            DataResource::Empty if state.config.news == NewsSource::Disabled => {
                Some((NO_NEWS_SOURCE.to_string(), palette.muted))
            }
            DataResource::Empty | DataResource::Loading => {
                Some(("Loading news...".to_string(), palette.muted))
            }
            DataResource::Failed(error) => Some((error.clone(), palette.error)),
            DataResource::Loaded(articles) if articles.is_empty() => {
                Some(("No articles".to_string(), palette.muted))
            }
            DataResource::Loaded(_) => None,
        };
        if let Some((text, color)) = message {
            frame.render_widget(
                Paragraph::new(Line::from(Span::styled(text, Style::default().fg(color))))
                    .wrap(Wrap { trim: true }),
                inner,
            );
            return;
        }

        let articles = state.articles();
        let visible = (inner.height / NEWS_CARD_HEIGHT).max(1) as usize;
        let offset = scroll_offset(state.news_selected, visible).min(articles.len());
        let shown = &articles[offset..articles.len().min(offset + visible)];

        let rows = Layout::vertical(
            shown
                .iter()
                .map(|_| Constraint::Length(NEWS_CARD_HEIGHT))
                .chain(std::iter::once(Constraint::Min(0))),
        )
        .split(inner);

        let mut card = NewsCard;
        for (i, article) in shown.iter().enumerate() {
            let index = offset + i;
            let show_image = article
                .url_to_image
                .as_deref()
                .is_some_and(|url| state.config.image_allowed(url));
            card.render(
                frame,
                rows[i],
                NewsCardProps {
                    article,
                    is_selected: props.is_focused && index == state.news_selected,
                    palette,
                    show_image,
                },
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::news::Article;
    use crossterm::event::{KeyEvent, KeyModifiers};
    use tui_dispatch::testing::*;

    fn articles(n: usize) -> Vec<Article> {
        (0..n)
            .map(|i| Article {
                title: format!("Headline {i}"),
                url: format!("https://news.example/{i}"),
                ..Default::default()
            })
            .collect()
    }

    fn render_feed(state: &AppState, height: u16) -> String {
        let mut render = RenderHarness::new(60, height);
        let mut feed = NewsFeed;
        render.render_to_string_plain(|frame| {
            let props = NewsFeedProps {
                state,
                is_focused: true,
            };
            feed.render(frame, frame.area(), props);
        })
    }

    #[test]
    fn test_scroll_offset() {
        assert_eq!(scroll_offset(0, 3), 0);
        assert_eq!(scroll_offset(2, 3), 0);
        assert_eq!(scroll_offset(3, 3), 1);
        assert_eq!(scroll_offset(9, 3), 7);
        assert_eq!(scroll_offset(4, 0), 4);
    }

    #[test]
    fn test_navigation_keys() {
        let mut feed = NewsFeed;
        let state = AppState {
            news: DataResource::Loaded(articles(3)),
            news_selected: 1,
            ..Default::default()
        };

        let mut send = |code: KeyCode| -> Vec<Action> {
            let props = NewsFeedProps {
                state: &state,
                is_focused: true,
            };
            feed.handle_event(
                &EventKind::Key(KeyEvent::new(code, KeyModifiers::NONE)),
                props,
            )
            .into_iter()
            .collect()
        };

        send(KeyCode::Down).assert_first(Action::NewsSelect(2));
        send(KeyCode::Up).assert_first(Action::NewsSelect(0));
        send(KeyCode::End).assert_first(Action::NewsSelect(2));
        send(KeyCode::Char('r')).assert_first(Action::NewsFetch);
    }

    #[test]
    fn test_up_at_top_does_nothing() {
        let mut feed = NewsFeed;
        let state = AppState::default();
        let props = NewsFeedProps {
            state: &state,
            is_focused: true,
        };
        let actions: Vec<_> = feed
            .handle_event(
                &EventKind::Key(KeyEvent::new(KeyCode::Up, KeyModifiers::NONE)),
                props,
            )
            .into_iter()
            .collect();
        actions.assert_empty();
    }

    #[test]
    fn test_render_without_source() {
        let output = render_feed(&AppState::default(), 10);
        assert!(output.contains(NO_NEWS_SOURCE), "{output}");
    }

    #[test]
    fn test_render_failure() {
        let state = AppState {
            news: DataResource::Failed("news service returned 401 Unauthorized".into()),
            ..Default::default()
        };
        let output = render_feed(&state, 10);
        assert!(output.contains("401 Unauthorized"), "{output}");
    }

    #[test]
    fn test_render_scrolls_to_selection() {
        let state = AppState {
            news: DataResource::Loaded(articles(5)),
            news_selected: 4,
            ..Default::default()
        };
        // Room for two cards.
        let output = render_feed(&state, NEWS_CARD_HEIGHT * 2 + 2);
        assert!(output.contains("Headline 4"), "{output}");
        assert!(output.contains("Headline 3"), "{output}");
        assert!(!output.contains("Headline 0"), "{output}");
    }
}
