use ratatui::style::{Color, Modifier, Style};

use crate::chat::BotTone;

/// Application theme configuration
#[derive(Debug, Clone)]
pub struct Theme {
    pub primary: Color,
    pub secondary: Color,

    pub text: Color,
    pub text_dim: Color,

    pub background_alt: Color,

    pub border: Color,
    pub border_focused: Color,

    pub warning: Color,
    pub error: Color,
    pub info: Color,

    pub placeholder: Color,
}

impl Default for Theme {
    fn default() -> Self {
        Self::dark()
    }
}

impl Theme {
    /// Create a dark theme
    pub fn dark() -> Self {
        Self {
            primary: Color::Rgb(0, 68, 159),       // Clinic blue
            secondary: Color::Rgb(20, 184, 166),   // Teal-500

            text: Color::Rgb(248, 250, 252),       // Slate-50
            text_dim: Color::Rgb(148, 163, 184),   // Slate-400

            background_alt: Color::Rgb(30, 41, 59), // Slate-800

            border: Color::Rgb(71, 85, 105),       // Slate-600
            border_focused: Color::Rgb(59, 130, 246), // Blue-500

            warning: Color::Rgb(245, 158, 11),     // Amber-500
            error: Color::Rgb(239, 68, 68),        // Red-500
            info: Color::Rgb(59, 130, 246),        // Blue-500

            placeholder: Color::Rgb(100, 116, 139), // Slate-500
        }
    }

    pub fn heading_style(&self) -> Style {
        Style::default()
            .fg(self.text)
            .bg(self.primary)
            .add_modifier(Modifier::BOLD)
    }

    pub fn disclaimer_style(&self) -> Style {
        Style::default()
            .fg(self.warning)
            .add_modifier(Modifier::ITALIC)
    }

    pub fn text_style(&self) -> Style {
        Style::default().fg(self.text)
    }

    pub fn dim_style(&self) -> Style {
        Style::default().fg(self.text_dim)
    }

    pub fn border_style(&self) -> Style {
        Style::default().fg(self.border)
    }

    pub fn focused_border_style(&self) -> Style {
        Style::default()
            .fg(self.border_focused)
            .add_modifier(Modifier::BOLD)
    }

    pub fn avatar_style(&self) -> Style {
        Style::default().fg(self.secondary)
    }

    /// Style for placeholder text
    pub fn placeholder_style(&self) -> Style {
        Style::default()
            .fg(self.placeholder)
            .add_modifier(Modifier::ITALIC)
    }

    /// Style for the bot's text depending on what it is showing
    pub fn bot_style(&self, tone: BotTone) -> Style {
        match tone {
            BotTone::Placeholder => self.placeholder_style(),
            BotTone::Answer => self.text_style(),
            BotTone::Working => Style::default().fg(self.info),
            BotTone::Error => Style::default().fg(self.error),
        }
    }

    pub fn status_bar_style(&self) -> Style {
        Style::default()
            .fg(self.text)
            .bg(self.background_alt)
    }

    pub fn help_style(&self) -> Style {
        Style::default()
            .fg(self.text)
            .bg(self.background_alt)
    }
}
