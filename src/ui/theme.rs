use ratatui::style::{Color, Modifier, Style};

use crate::config::ThemeMode;

/// Colours for one theme mode.
#[derive(Debug, Clone, Copy)]
pub struct Palette {
    pub fg: Color,
    pub bg: Color,
    pub dim: Color,
    pub accent: Color,
    pub card_title: Color,
    pub badge: Color,
    pub error: Color,
    pub placeholder: Color,
}

const DARK: Palette = Palette {
    fg: Color::White,
    bg: Color::Reset,
    dim: Color::DarkGray,
    accent: Color::Cyan,
    card_title: Color::White,
    badge: Color::LightBlue,
    error: Color::Red,
    placeholder: Color::Yellow,
};

const LIGHT: Palette = Palette {
    fg: Color::Black,
    bg: Color::Gray,
    dim: Color::DarkGray,
    accent: Color::Blue,
    card_title: Color::Black,
    badge: Color::Blue,
    error: Color::Red,
    placeholder: Color::Magenta,
};

pub fn palette(mode: ThemeMode) -> Palette {
    match mode {
        ThemeMode::Dark => DARK,
        ThemeMode::Light => LIGHT,
    }
}

impl Palette {
    pub fn base(&self) -> Style {
        Style::default().fg(self.fg).bg(self.bg)
    }

    pub fn dim(&self) -> Style {
        Style::default().fg(self.dim)
    }

    pub fn border(&self, focused: bool) -> Style {
        if focused {
            Style::default().fg(self.accent)
        } else {
            Style::default()
        }
    }

    pub fn selected(&self) -> Style {
        Style::default()
            .fg(self.accent)
            .add_modifier(Modifier::BOLD)
    }
}
