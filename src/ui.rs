use ratatui::{prelude::*, widgets::*};

use crate::models::Estado;
use crate::theme::Theme;

/// Renders the screen tabs
pub fn render_tabs<'a>(titles: &[&'a str], selected: usize, theme: &Theme) -> Tabs<'a> {
    let titles: Vec<Line> = titles.iter().map(|t| Line::from(*t)).collect();

    Tabs::new(titles)
        .select(selected)
        .style(theme.hint())
        .highlight_style(theme.selected())
        .divider("|")
}

/// Renders a labelled form input
pub fn render_input<'a>(
    content: &'a str,
    title: &'a str,
    is_focused: bool,
    theme: &Theme,
) -> Paragraph<'a> {
    let style = if is_focused {
        theme.border_editing()
    } else {
        theme.border()
    };

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(style)
        .title(title);

    Paragraph::new(content).block(block)
}

/// Estado color
pub fn estado_color(estado: Estado) -> Color {
    match estado {
        Estado::Operativo => Color::Green,
        Estado::Mantenimiento => Color::Yellow,
        Estado::FueraDeServicio => Color::Red,
    }
}

/// Simple text progress bar, `width` cells wide
pub fn progress_bar(percent: u16, width: usize) -> String {
    let filled = (percent.min(100) as usize * width) / 100;
    format!("{}{}", "█".repeat(filled), "░".repeat(width - filled))
}

/// Center a `percent_x` by `percent_y` rectangle inside `r`
pub fn centered_rect(percent_x: u16, percent_y: u16, r: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(r);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_progress_bar_bounds() {
        assert_eq!(progress_bar(0, 4), "░░░░");
        assert_eq!(progress_bar(50, 4), "██░░");
        assert_eq!(progress_bar(250, 4), "████");
    }
}
