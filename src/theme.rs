//! Light and dark palettes for the cards and panels

use ratatui::style::Color;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum Theme {
    #[default]
    Dark,
    Light,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Palette {
    pub bg: Color,
    pub fg: Color,
    pub muted: Color,
    pub accent: Color,
    pub error: Color,
    pub border: Color,
    pub selected_border: Color,
    pub input_bg: Color,
}

impl Theme {
    pub fn palette(self) -> Palette {
        match self {
            Theme::Dark => Palette {
                bg: Color::Rgb(24, 26, 33),
                fg: Color::White,
                muted: Color::Gray,
                accent: Color::Rgb(96, 165, 250),
                error: Color::Rgb(248, 113, 113),
                border: Color::DarkGray,
                selected_border: Color::Rgb(96, 165, 250),
                input_bg: Color::Rgb(50, 50, 60),
            },
            Theme::Light => Palette {
                bg: Color::White,
                fg: Color::Black,
                muted: Color::DarkGray,
                accent: Color::Rgb(37, 99, 235),
                error: Color::Rgb(220, 38, 38),
                border: Color::Gray,
                selected_border: Color::Rgb(37, 99, 235),
                input_bg: Color::Rgb(229, 231, 235),
            },
        }
    }
}
