use crossterm::event::{KeyCode, KeyEventKind};
use ratatui::{
    Frame,
    layout::{Constraint, Layout, Rect},
    style::{Color, Modifier, Style, Stylize},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph},
};
use tui_dispatch::EventKind;
use tui_dispatch_components::{BaseStyle, Padding, TextInput, TextInputProps, TextInputStyle};

use super::{Component, WEATHER_CARD_HEIGHT, WeatherCard, WeatherCardProps};
use crate::action::Action;
use crate::state::{AppState, Focus, RequestState};
use crate::theme::Palette;

const PLACEHOLDER: &str = "Enter city name";
const SEARCH_LABEL: &str = "Search";

/// City input, Search button and result area
pub struct WeatherFeature {
    input: TextInput,
}

impl Default for WeatherFeature {
    fn default() -> Self {
        Self {
            input: TextInput::new(),
        }
    }
}

pub struct WeatherFeatureProps<'a> {
    pub state: &'a AppState,
    pub is_focused: bool,
}

impl WeatherFeature {
    pub fn new() -> Self {
        Self::default()
    }
}

fn input_style(palette: Palette) -> TextInputStyle {
    TextInputStyle {
        base: BaseStyle {
            border: None,
            padding: Padding::all(1),
            bg: Some(palette.input_bg),
            fg: Some(palette.fg),
        },
        placeholder_style: None,
        cursor_style: None,
    }
}

impl Component<Action> for WeatherFeature {
    type Props<'a> = WeatherFeatureProps<'a>;

    fn handle_event(
        &mut self,
        event: &EventKind,
        props: Self::Props<'_>,
    ) -> impl IntoIterator<Item = Action> {
        if !props.is_focused {
            return Vec::new();
        }

        let EventKind::Key(key) = event else {
            return Vec::new();
        };
        if key.kind == KeyEventKind::Release {
            return Vec::new();
        }

        let focus = props.state.focus;
        match (focus, key.code) {
            // Enter in the input and activating the button share one path.
            (_, KeyCode::Enter) => vec![Action::WeatherSubmit],
            (_, KeyCode::Esc) => vec![Action::Quit],
            // Focus changes are handled globally.
            (_, KeyCode::Tab | KeyCode::BackTab) => Vec::new(),
            (Focus::SearchButton, KeyCode::Char(' ')) => vec![Action::WeatherSubmit],
            (Focus::SearchButton, KeyCode::Char('u')) => vec![Action::UiToggleUnits],
            (Focus::SearchButton, KeyCode::Char('q')) => vec![Action::Quit],
            (Focus::CityInput, _) => {
                let input_props = TextInputProps {
                    value: &props.state.city,
                    placeholder: PLACEHOLDER,
                    is_focused: true,
                    style: input_style(props.state.config.theme.palette()),
                    on_change: Action::CityChange,
                    on_submit: |_| Action::WeatherSubmit,
                    on_cursor_move: Some(|_| Action::Render),
                };
                self.input
                    .handle_event(event, input_props)
                    .into_iter()
                    .collect()
            }
            _ => Vec::new(),
        }
    }

    fn render(&mut self, frame: &mut Frame, area: Rect, props: Self::Props<'_>) {
        let state = props.state;
        let palette = state.config.theme.palette();

        let block = Block::default()
            .title(" Weather ")
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

        let chunks = Layout::vertical([
            Constraint::Length(3),                   // Input row
            Constraint::Length(1),                   // Status line
            Constraint::Length(1),                   // Spacer
            Constraint::Length(WEATHER_CARD_HEIGHT), // Result
            Constraint::Min(0),
        ])
        .split(inner);

        let row = Layout::horizontal([Constraint::Min(10), Constraint::Length(12)]).split(chunks[0]);

        let input_props = TextInputProps {
            value: &state.city,
            placeholder: PLACEHOLDER,
            is_focused: props.is_focused && state.focus == Focus::CityInput,
            style: input_style(palette),
            on_change: Action::CityChange,
            on_submit: |_| Action::WeatherSubmit,
            on_cursor_move: Some(|_| Action::Render),
        };
        self.input.render(frame, row[0], input_props);

        render_button(
            frame,
            row[1],
            palette,
            props.is_focused && state.focus == Focus::SearchButton,
        );

        let status = match state.request_state() {
            RequestState::Loading => Some(Line::from(Span::styled(
                "Loading...",
                Style::default().fg(palette.muted),
            ))),
            RequestState::Failed(message) => Some(Line::from(Span::styled(
                message.to_string(),
                Style::default().fg(palette.error),
            ))),
            RequestState::Idle => Some(Line::from(vec![
                Span::styled("Press ", Style::default().fg(palette.muted)),
                Span::styled("Enter", Style::default().fg(palette.accent).bold()),
                Span::styled(" to fetch weather", Style::default().fg(palette.muted)),
            ])),
            RequestState::Success(_) => None,
        };
        if let Some(status) = status {
            frame.render_widget(Paragraph::new(status), chunks[1]);
        }

        if let Some(result) = state.visible_result() {
            let mut card = WeatherCard;
            card.render(
                frame,
                chunks[3],
                WeatherCardProps {
                    result,
                    unit: state.unit,
                    palette,
                    show_icon: state.config.image_allowed(&result.icon_url()),
                },
            );
        }
    }
}

fn render_button(frame: &mut Frame, area: Rect, palette: Palette, is_focused: bool) {
    let (style, border) = if is_focused {
        (
            Style::default()
                .bg(palette.accent)
                .fg(Color::White)
                .add_modifier(Modifier::BOLD),
            palette.accent,
        )
    } else {
        (Style::default().fg(palette.accent), palette.border)
    };
    let button = Paragraph::new(Line::from(SEARCH_LABEL).centered())
        .style(style)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_type(BorderType::Rounded)
                .border_style(Style::default().fg(border)),
        );
    frame.render_widget(button, area);
}
