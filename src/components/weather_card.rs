use ratatui::{
    Frame,
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph},
};

use super::Component;
use crate::action::Action;
use crate::state::{TempUnit, WeatherResult};
use crate::theme::Palette;

/// Presentational card for one weather result
pub struct WeatherCard;

pub struct WeatherCardProps<'a> {
    pub result: &'a WeatherResult,
    pub unit: TempUnit,
    pub palette: Palette,
    /// Whether the icon URL is on an allow-listed host
    pub show_icon: bool,
}

/// Rows a card needs: border + heading + icon + temperature + feels-like.
pub const WEATHER_CARD_HEIGHT: u16 = 6;

impl Component<Action> for WeatherCard {
    type Props<'a> = WeatherCardProps<'a>;

    fn render(&mut self, frame: &mut Frame, area: Rect, props: Self::Props<'_>) {
        let WeatherCardProps {
            result,
            unit,
            palette,
            show_icon,
        } = props;

        let muted = Style::default().fg(palette.muted);
        let icon_line = if show_icon {
            Line::from(vec![
                Span::styled("icon ", muted),
                Span::styled(
                    result.icon_url(),
                    Style::default()
                        .fg(palette.accent)
                        .add_modifier(Modifier::UNDERLINED),
                ),
            ])
        } else {
            // Alt text stands in for images from unknown hosts.
            Line::from(vec![
                Span::styled("icon ", muted),
                Span::styled(format!("[{}]", result.condition), muted),
            ])
        };

        let lines = vec![
            Line::from(Span::styled(
                result.place(),
                Style::default()
                    .fg(palette.fg)
                    .add_modifier(Modifier::BOLD),
            )),
            icon_line,
            Line::from(vec![
                Span::styled(
                    unit.format(result.temp_c),
                    Style::default()
                        .fg(palette.accent)
                        .add_modifier(Modifier::BOLD),
                ),
                Span::styled(
                    format!(" – {}", result.condition),
                    Style::default().fg(palette.fg),
                ),
            ]),
            Line::from(Span::styled(
                format!("Feels like {}", unit.format(result.feelslike_c)),
                muted,
            )),
        ];

        let block = Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(palette.border))
            .style(Style::default().bg(palette.bg));

        frame.render_widget(
            Paragraph::new(lines).block(block).centered(),
            area,
        );
    }
}
