use ratatui::layout::{Constraint, Layout};
use ratatui::prelude::{Frame, Rect};
use tui_dispatch_components::{
    StatusBar, StatusBarHint, StatusBarProps, StatusBarSection, StatusBarStyle,
};

use super::{Component, NewsFeed, NewsFeedProps, WeatherFeature, WeatherFeatureProps};
use crate::action::Action;
use crate::state::{AppState, Focus};

/// Screen regions, shared with event routing
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DashboardAreas {
    pub weather: Rect,
    pub news: Rect,
    pub status: Rect,
}

impl DashboardAreas {
    /// Side by side on wide terminals, stacked on narrow ones.
    pub fn split(area: Rect) -> Self {
        let rows = Layout::vertical([
            Constraint::Min(1),    // Panels
            Constraint::Length(1), // Help bar
        ])
        .split(area);

        let panels = if rows[0].width >= 80 {
            Layout::horizontal([Constraint::Percentage(45), Constraint::Percentage(55)])
                .split(rows[0])
        } else {
            Layout::vertical([Constraint::Length(14), Constraint::Min(0)]).split(rows[0])
        };

        Self {
            weather: panels[0],
            news: panels[1],
            status: rows[1],
        }
    }
}

pub struct DashboardProps<'a> {
    pub state: &'a AppState,
    pub is_focused: bool,
}

/// Weather panel, news panel and key hints
#[derive(Default)]
pub struct Dashboard {
    pub feature: WeatherFeature,
    pub news: NewsFeed,
}

impl Dashboard {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Component<Action> for Dashboard {
    type Props<'a> = DashboardProps<'a>;

    fn render(&mut self, frame: &mut Frame, area: Rect, props: DashboardProps<'_>) {
        let state = props.state;
        let areas = DashboardAreas::split(area);
        let news_focused = state.focus == Focus::News;

        self.feature.render(
            frame,
            areas.weather,
            WeatherFeatureProps {
                state,
                is_focused: props.is_focused && !news_focused,
            },
        );
        self.news.render(
            frame,
            areas.news,
            NewsFeedProps {
                state,
                is_focused: props.is_focused && news_focused,
            },
        );

        let hints = if news_focused {
            vec![
                StatusBarHint::new("tab", "focus"),
                StatusBarHint::new("↑↓", "select"),
                StatusBarHint::new("r", "reload news"),
                StatusBarHint::new("u", "units"),
                StatusBarHint::new("q", "quit"),
            ]
        } else {
            vec![
                StatusBarHint::new("tab", "focus"),
                StatusBarHint::new("enter", "search"),
                StatusBarHint::new("esc", "quit"),
            ]
        };

        let mut status_bar = StatusBar::new();
        <StatusBar as Component<Action>>::render(
            &mut status_bar,
            frame,
            areas.status,
            StatusBarProps {
                left: StatusBarSection::empty(),
                center: StatusBarSection::hints(&hints),
                right: StatusBarSection::empty(),
                style: StatusBarStyle::default(),
                is_focused: false,
            },
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wide_layout_is_side_by_side() {
        let areas = DashboardAreas::split(Rect::new(0, 0, 120, 30));
        assert_eq!(areas.weather.y, areas.news.y);
        assert!(areas.weather.x < areas.news.x);
        assert_eq!(areas.status.height, 1);
        assert_eq!(areas.status.y, 29);
    }

    #[test]
    fn test_narrow_layout_stacks() {
        let areas = DashboardAreas::split(Rect::new(0, 0, 60, 40));
        assert_eq!(areas.weather.x, areas.news.x);
        assert!(areas.weather.y < areas.news.y);
        assert_eq!(areas.weather.height, 14);
    }
}
