use ratatui::style::{Color, Modifier, Style};

/// Light and dark palettes
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Theme {
    pub background: Color,
    pub text: Color,
    pub muted: Color,
    pub accent: Color,
    pub highlight: Color,
    pub error: Color,
    pub success: Color,
}

impl Theme {
    pub const LIGHT: Theme = Theme {
        background: Color::White,
        text: Color::Black,
        muted: Color::Gray,
        accent: Color::Blue,
        highlight: Color::LightBlue,
        error: Color::Red,
        success: Color::Green,
    };

    pub const DARK: Theme = Theme {
        background: Color::Black,
        text: Color::White,
        muted: Color::DarkGray,
        accent: Color::Cyan,
        highlight: Color::Yellow,
        error: Color::LightRed,
        success: Color::LightGreen,
    };

    pub fn for_mode(dark: bool) -> Theme {
        if dark {
            Theme::DARK
        } else {
            Theme::LIGHT
        }
    }

    pub fn base(&self) -> Style {
        Style::default().fg(self.text).bg(self.background)
    }

    pub fn border(&self) -> Style {
        Style::default().fg(self.muted)
    }

    pub fn border_focused(&self) -> Style {
        Style::default().fg(self.accent)
    }

    pub fn border_editing(&self) -> Style {
        Style::default().fg(self.highlight)
    }

    pub fn title(&self) -> Style {
        Style::default().fg(self.accent).add_modifier(Modifier::BOLD)
    }

    pub fn selected(&self) -> Style {
        Style::default().fg(self.highlight).add_modifier(Modifier::BOLD)
    }

    pub fn hint(&self) -> Style {
        Style::default().fg(self.muted)
    }

    pub fn error(&self) -> Style {
        Style::default().fg(self.error).add_modifier(Modifier::BOLD)
    }

    pub fn success(&self) -> Style {
        Style::default().fg(self.success).add_modifier(Modifier::BOLD)
    }
}
