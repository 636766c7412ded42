//! Drawing a `ChatView` onto a ratatui frame

use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    text::{Line, Span, Text},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
};
use unicode_width::UnicodeWidthStr;

use super::{
    keys::KeyMap,
    styles::Theme,
    utils::{art_size, centered_rect_percent, wrapped_height},
    Frame,
};
use crate::chat::{BotSide, ChatView, UserSide};

/// Draw the whole panel above a one-line status bar
pub fn draw_chat(frame: &mut Frame, area: Rect, view: &ChatView, theme: &Theme, status: &str) {
    let disclaimer_height = wrapped_height(&view.disclaimer, area.width.saturating_sub(2)).min(4);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),                 // Heading
            Constraint::Length(disclaimer_height), // Disclaimer
            Constraint::Min(8),                    // Conversation
            Constraint::Length(1),                 // Status bar
        ])
        .split(area);

    let heading = Paragraph::new(view.heading.as_str())
        .alignment(Alignment::Center)
        .style(theme.heading_style());
    frame.render_widget(heading, chunks[0]);

    let disclaimer = Paragraph::new(view.disclaimer.as_str())
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true })
        .style(theme.disclaimer_style());
    frame.render_widget(disclaimer, chunks[1]);

    let sides = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(45), Constraint::Percentage(55)])
        .split(chunks[2]);

    draw_user_side(frame, sides[0], &view.user, theme);
    draw_bot_side(frame, sides[1], &view.bot, theme);

    let status_bar = Paragraph::new(status).style(theme.status_bar_style());
    frame.render_widget(status_bar, chunks[3]);
}

fn draw_user_side(frame: &mut Frame, area: Rect, user: &UserSide, theme: &Theme) {
    let block = Block::default()
        .borders(Borders::ALL)
        .title(" You ")
        .border_style(theme.border_style());
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let (_, avatar_height) = art_size(user.avatar);
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(avatar_height),
            Constraint::Min(0),    // Last question
            Constraint::Length(3), // Input form
        ])
        .split(inner);

    let avatar = Paragraph::new(user.avatar).style(theme.avatar_style());
    frame.render_widget(avatar, chunks[0]);

    if let Some(question) = &user.last_question {
        let asked = Paragraph::new(Text::from(vec![
            Line::from(Span::styled("You asked:", theme.dim_style())),
            Line::from(Span::styled(question.as_str(), theme.text_style())),
        ]))
        .wrap(Wrap { trim: true });
        frame.render_widget(asked, chunks[1]);
    }

    let send_hint = if user.can_send { " Question [Enter] " } else { " Question " };
    let input_block = Block::default()
        .borders(Borders::ALL)
        .title(send_hint)
        .border_style(theme.focused_border_style());
    let input_area = input_block.inner(chunks[2]);

    // keep the cursor visible on long input
    let scroll = (user.cursor_column as u16).saturating_sub(input_area.width.saturating_sub(1));
    let input_style = if user.showing_placeholder {
        theme.placeholder_style()
    } else {
        theme.text_style()
    };
    let input = Paragraph::new(user.input.as_str())
        .style(input_style)
        .scroll((0, scroll))
        .block(input_block);
    frame.render_widget(input, chunks[2]);

    if input_area.width > 0 && input_area.height > 0 {
        frame.set_cursor(
            input_area.x + (user.cursor_column as u16 - scroll),
            input_area.y,
        );
    }
}

fn draw_bot_side(frame: &mut Frame, area: Rect, bot: &BotSide, theme: &Theme) {
    let block = Block::default()
        .borders(Borders::ALL)
        .title(" Medi-Bot ")
        .border_style(theme.border_style());
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let (_, avatar_height) = art_size(bot.avatar);
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(avatar_height),
            Constraint::Min(1),
            Constraint::Length(u16::from(bot.footer.is_some())),
        ])
        .split(inner);

    let avatar = Paragraph::new(bot.avatar).style(theme.avatar_style());
    frame.render_widget(avatar, chunks[0]);

    let response = Paragraph::new(bot.text.as_str())
        .style(theme.bot_style(bot.tone))
        .wrap(Wrap { trim: false });
    frame.render_widget(response, chunks[1]);

    if let Some(footer) = &bot.footer {
        let footer = Paragraph::new(footer.as_str())
            .alignment(Alignment::Right)
            .style(theme.dim_style());
        frame.render_widget(footer, chunks[2]);
    }
}

/// Render the key binding overlay
pub fn draw_help(frame: &mut Frame, key_map: &KeyMap, theme: &Theme) {
    let area = centered_rect_percent(50, 40, frame.size());

    let label_width = key_map
        .help_lines()
        .iter()
        .map(|(label, _)| label.width())
        .max()
        .unwrap_or(0);
    let lines: Vec<Line> = key_map
        .help_lines()
        .into_iter()
        .map(|(label, description)| {
            Line::from(vec![
                Span::styled(format!("{:<width$}  ", label, width = label_width), theme.focused_border_style()),
                Span::styled(description, theme.text_style()),
            ])
        })
        .collect();

    let help = Paragraph::new(lines)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(" Help ")
                .border_style(theme.focused_border_style()),
        )
        .style(theme.help_style());

    frame.render_widget(Clear, area);
    frame.render_widget(help, area);
}
