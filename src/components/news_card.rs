use ratatui::{
    Frame,
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph},
};

use super::Component;
use crate::action::Action;
use crate::news::Article;
use crate::theme::Palette;

/// Presentational card for one article
pub struct NewsCard;

pub struct NewsCardProps<'a> {
    pub article: &'a Article,
    pub is_selected: bool,
    pub palette: Palette,
    /// Whether `url_to_image` is on an allow-listed host
    pub show_image: bool,
}

/// Border + title + meta + description + link + image.
pub const NEWS_CARD_HEIGHT: u16 = 7;

impl Component<Action> for NewsCard {
    type Props<'a> = NewsCardProps<'a>;

    fn render(&mut self, frame: &mut Frame, area: Rect, props: Self::Props<'_>) {
        let NewsCardProps {
            article,
            is_selected,
            palette,
            show_image,
        } = props;
        let muted = Style::default().fg(palette.muted);

        let mut lines = vec![
            Line::from(Span::styled(
                article.title.clone(),
                Style::default()
                    .fg(palette.fg)
                    .add_modifier(Modifier::BOLD),
            )),
            Line::from(Span::styled(
                format!("{} • {}", article.published_date(), article.source_name()),
                muted,
            )),
            Line::from(Span::styled(
                article.description_text().to_string(),
                Style::default().fg(palette.fg),
            )),
            Line::from(Span::styled(
                article.url.clone(),
                Style::default()
                    .fg(palette.accent)
                    .add_modifier(Modifier::UNDERLINED),
            )),
        ];

        if let Some(image) = article.url_to_image.as_deref() {
            let shown = if show_image {
                image.to_string()
            } else {
                format!("[{}]", article.title)
            };
            lines.push(Line::from(vec![
                Span::styled("image ", muted),
                Span::styled(shown, muted),
            ]));
        }

        let border = if is_selected {
            palette.selected_border
        } else {
            palette.border
        };
        let block = Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(border))
            .style(Style::default().bg(palette.bg));

        frame.render_widget(Paragraph::new(lines).block(block), area);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::news::ArticleSource;
    use crate::theme::Theme;
    use tui_dispatch::testing::*;

    fn render_card(article: &Article, show_image: bool) -> String {
        let mut render = RenderHarness::new(60, NEWS_CARD_HEIGHT);
        let mut card = NewsCard;
        render.render_to_string_plain(|frame| {
            let props = NewsCardProps {
                article,
                is_selected: false,
                palette: Theme::Light.palette(),
                show_image,
            };
            card.render(frame, frame.area(), props);
        })
    }

    #[test]
    fn test_full_article() {
        let article = Article {
            title: "Rust 2.0 announced".into(),
            description: Some("Not really.".into()),
            url: "https://blog.example/rust".into(),
            url_to_image: Some("https://ui-avatars.com/api/?name=R".into()),
            published_at: Some("2024-04-01T08:00:00Z".into()),
            source: Some(ArticleSource {
                name: "Example Blog".into(),
            }),
        };

        let output = render_card(&article, true);

        assert!(output.contains("Rust 2.0 announced"), "{output}");
        assert!(output.contains("2024-04-01 • Example Blog"), "{output}");
        assert!(output.contains("Not really."), "{output}");
        assert!(output.contains("https://blog.example/rust"), "{output}");
        assert!(output.contains("image https://ui-avatars.com"), "{output}");
    }

    #[test]
    fn test_missing_optional_fields_render_empty() {
        let article = Article {
            title: "Bare".into(),
            url: "https://bare.example".into(),
            ..Default::default()
        };

        let output = render_card(&article, true);

        assert!(output.contains("Bare"), "{output}");
        assert!(output.contains(" • "), "{output}");
        assert!(!output.contains("image"), "{output}");
    }

    #[test]
    fn test_disallowed_image_uses_title_as_alt() {
        let article = Article {
            title: "Tracked".into(),
            url: "https://t.example".into(),
            url_to_image: Some("https://tracker.example/pixel.png".into()),
            ..Default::default()
        };

        let output = render_card(&article, false);

        assert!(output.contains("image [Tracked]"), "{output}");
        assert!(!output.contains("tracker.example"), "{output}");
    }
}
