use ratatui::prelude::*;
use ratatui::widgets::{Block, Cell, Clear, Paragraph, Row, Table, Tabs, Wrap};

use crate::output::format_average;
use crate::roster::Category;
use crate::stats::{aggregate_category, radar_chart};
use crate::tui::app::{App, FlashKind, InputMode, InputTarget};
use crate::tui::radar::render_radar;
use crate::tui::theme::ThemeColors;

pub fn draw(frame: &mut Frame, app: &mut App) {
    let area = frame.area();

    // Handle very small terminal sizes gracefully
    if area.height < 10 || area.width < 40 {
        let msg = Paragraph::new("Terminal too small").alignment(Alignment::Center);
        frame.render_widget(msg, area);
        return;
    }

    // Layout: Title(1) + Team tabs(1) + Category tabs(1) + Body(fill) + Status(1)
    let chunks = Layout::vertical([
        Constraint::Length(1),
        Constraint::Length(1),
        Constraint::Length(1),
        Constraint::Fill(1),
        Constraint::Length(1),
    ])
    .split(area);

    render_title(frame, chunks[0], app);
    render_team_tabs(frame, chunks[1], app);
    render_category_tabs(frame, chunks[2], app);
    render_body(frame, chunks[3], app);
    render_status_bar(frame, chunks[4], app);

    match app.input_mode {
        InputMode::TextInput(target) => render_input_popup(frame, app, target),
        InputMode::ConfirmDelete => render_delete_popup(frame, app),
        InputMode::Help => render_help_popup(frame, &app.theme),
        InputMode::Normal => {}
    }
}

fn render_title(frame: &mut Frame, area: Rect, app: &App) {
    let title = "Skill Radar";
    let mut spans = vec![Span::styled(
        title,
        Style::default().fg(app.theme.title_color).bold(),
    )];

    let count_text = format!("{} teams", app.roster.teams().len());
    let padding_len = (area.width as usize).saturating_sub(title.len() + count_text.len());
    spans.push(Span::raw(" ".repeat(padding_len)));
    spans.push(Span::styled(count_text, Style::default().fg(app.theme.muted)));

    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}

fn render_team_tabs(frame: &mut Frame, area: Rect, app: &App) {
    if app.roster.is_empty() {
        let hint = Paragraph::new("No teams yet. Press 'a' to add one.")
            .style(Style::default().fg(app.theme.muted));
        frame.render_widget(hint, area);
        return;
    }

    let titles: Vec<String> = app.roster.teams().iter().map(|t| t.name.clone()).collect();
    let tabs = Tabs::new(titles)
        .select(app.selected_team)
        .style(app.theme.tab_inactive_style)
        .highlight_style(app.theme.tab_active_style.reversed())
        .divider(" | ");
    frame.render_widget(tabs, area);
}

fn render_category_tabs(frame: &mut Frame, area: Rect, app: &App) {
    let titles: Vec<&str> = Category::ALL.iter().map(Category::as_str).collect();
    let selected = Category::ALL
        .iter()
        .position(|c| *c == app.category)
        .unwrap_or(0);
    let tabs = Tabs::new(titles)
        .select(selected)
        .style(app.theme.tab_inactive_style)
        .highlight_style(app.theme.tab_active_style)
        .divider(" · ");
    frame.render_widget(tabs, area);
}

fn render_body(frame: &mut Frame, area: Rect, app: &mut App) {
    let Some(team) = app.current_team() else {
        let empty = Paragraph::new("No teams added yet. Please add a team first.")
            .alignment(Alignment::Center)
            .style(Style::default().fg(app.theme.muted));
        frame.render_widget(empty, area);
        return;
    };
    let chart = radar_chart(team, app.category);

    let columns = if area.width >= 100 {
        Layout::horizontal([Constraint::Percentage(50), Constraint::Percentage(50)]).split(area)
    } else {
        Layout::vertical([Constraint::Percentage(45), Constraint::Percentage(55)]).split(area)
    };

    render_grid(frame, columns[0], app);
    render_radar(frame, columns[1], &chart, &app.theme);
}

/// Skills x members grid for the current category with an average column
fn render_grid(frame: &mut Frame, area: Rect, app: &mut App) {
    let theme = &app.theme;
    let Some(team) = app.roster.teams().get(app.selected_team) else {
        return;
    };
    let skills = team.skills.get(app.category);
    let block = Block::bordered().title(format!(" {} · {} ", team.name, app.category));

    if skills.is_empty() {
        let msg = Paragraph::new(format!(
            "No {} skills. Press 's' to add some.",
            app.category
        ))
        .style(Style::default().fg(theme.muted))
        .block(block);
        frame.render_widget(msg, area);
        return;
    }

    let stats = aggregate_category(skills, &team.members);
    let selected_row = app.table_state.selected();

    let rows: Vec<Row> = skills
        .iter()
        .enumerate()
        .map(|(row_idx, skill)| {
            let mut cells = vec![Cell::from(skill.clone())];
            for (col_idx, member) in team.members.iter().enumerate() {
                let (text, color) = match member.level(skill) {
                    Some(level) => (level.to_string(), theme.level_color(level.value())),
                    None => ("·".to_string(), theme.unscored),
                };
                let mut style = Style::default().fg(color);
                if selected_row == Some(row_idx) && col_idx == app.selected_member {
                    style = style.patch(theme.cell_selected);
                }
                cells.push(Cell::from(Line::from(text).alignment(Alignment::Center)).style(style));
            }

            let average = stats
                .iter()
                .find(|s| &s.skill == skill)
                .map(|s| format_average(s.average))
                .unwrap_or_default();
            cells.push(Cell::from(Line::from(average).alignment(Alignment::Right)));

            let row_style = if row_idx % 2 == 1 {
                Style::default().bg(theme.row_alt_bg)
            } else {
                Style::default()
            };
            Row::new(cells).style(row_style)
        })
        .collect();

    let skill_width = skills
        .iter()
        .map(|s| s.chars().count())
        .max()
        .unwrap_or(5)
        .clamp(5, 24) as u16;
    let mut widths = vec![Constraint::Length(skill_width)];
    let mut header = vec![Cell::from("Skill")];
    for member in &team.members {
        let width = member.name.chars().count().clamp(3, 10) as u16;
        widths.push(Constraint::Length(width));
        header.push(Cell::from(
            Line::from(crate::output::truncate_name(&member.name, width as usize))
                .alignment(Alignment::Center),
        ));
    }
    widths.push(Constraint::Length(5));
    header.push(Cell::from(Line::from("Avg").alignment(Alignment::Right)));

    let table = Table::new(rows, widths)
        .header(Row::new(header).style(theme.header_style).bottom_margin(1))
        .row_highlight_style(theme.row_selected)
        .block(block);

    frame.render_stateful_widget(table, area, &mut app.table_state);
}

fn render_status_bar(frame: &mut Frame, area: Rect, app: &App) {
    let theme = &app.theme;
    let line = if let Some((ref msg, kind, _)) = app.flash_message {
        let color = match kind {
            FlashKind::Success => theme.flash_success,
            FlashKind::Warning => theme.flash_warning,
            FlashKind::Error => theme.flash_error,
        };
        Line::from(Span::styled(msg.clone(), Style::default().fg(color)))
    } else {
        let hints = [
            ("j/k", ":skill "),
            ("h/l", ":member "),
            ("0-9", ":level "),
            ("x", ":clear "),
            ("c", ":category "),
            ("Tab", ":team "),
            ("a/m/s", ":add "),
            ("e", ":export "),
            ("?", ":help "),
            ("q", ":quit"),
        ];
        let mut spans = Vec::new();
        for (i, (key, label)) in hints.iter().enumerate() {
            if i > 0 {
                spans.push(Span::raw(" "));
            }
            spans.push(Span::styled(*key, Style::default().fg(theme.status_key_color)));
            spans.push(Span::raw(*label));
        }
        Line::from(spans)
    };

    frame.render_widget(
        Paragraph::new(line).style(Style::default().bg(theme.status_bar_bg)),
        area,
    );
}

/// Create a centered rectangle with fixed width and height
fn centered_rect_fixed(width: u16, height: u16, area: Rect) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    let x = area.x + (area.width.saturating_sub(width)) / 2;
    let y = area.y + (area.height.saturating_sub(height)) / 2;
    Rect {
        x,
        y,
        width,
        height,
    }
}

fn popup_block<'a>(title: String, theme: &ThemeColors) -> Block<'a> {
    Block::bordered()
        .title(Span::styled(title, theme.popup_title))
        .border_style(Style::default().fg(theme.popup_border))
        .style(Style::default().bg(theme.popup_bg))
}

fn render_input_popup(frame: &mut Frame, app: &App, target: InputTarget) {
    let popup_area = centered_rect_fixed(60, 5, frame.area());
    frame.render_widget(Clear, popup_area);

    let block = popup_block(target.title(app.category), &app.theme);
    let inner = block.inner(popup_area);
    frame.render_widget(block, popup_area);

    let chunks = Layout::vertical([Constraint::Length(1), Constraint::Length(1)]).split(inner);

    frame.render_widget(Paragraph::new(format!("{}|", app.input)), chunks[0]);

    let help = match target {
        InputTarget::Team => "Enter: confirm | Esc: cancel",
        InputTarget::Members | InputTarget::Skills => {
            "Comma separated | Enter: confirm | Esc: cancel"
        }
    };
    frame.render_widget(
        Paragraph::new(help).style(Style::default().fg(app.theme.muted)),
        chunks[1],
    );
}

fn render_delete_popup(frame: &mut Frame, app: &App) {
    let Some(team) = app.current_team() else {
        return;
    };
    let popup_area = centered_rect_fixed(50, 6, frame.area());
    frame.render_widget(Clear, popup_area);

    let block = popup_block(" Delete Team ".to_string(), &app.theme);
    let text = vec![
        Line::from(format!(
            "Delete '{}' with {} members and {} scores?",
            team.name,
            team.members.len(),
            team.scored_pairs()
        )),
        Line::from(""),
        Line::from(vec![
            Span::styled("y", Style::default().fg(app.theme.flash_error).bold()),
            Span::raw(": delete   any other key: cancel"),
        ]),
    ];
    frame.render_widget(
        Paragraph::new(text).wrap(Wrap { trim: true }).block(block),
        popup_area,
    );
}

/// Render the help overlay popup
fn render_help_popup(frame: &mut Frame, theme: &ThemeColors) {
    let popup_area = centered_rect_fixed(50, 20, frame.area());
    frame.render_widget(Clear, popup_area);

    let block = popup_block(" Keyboard Shortcuts ".to_string(), theme);
    let inner = block.inner(popup_area);
    frame.render_widget(block, popup_area);

    let key_style = Style::default().fg(theme.status_key_color).bold();
    let entries = [
        ("j / k         ", "Select skill"),
        ("h / l         ", "Select member"),
        ("0 - 9         ", "Set competency level"),
        ("+ / -         ", "Raise / lower level (max 10)"),
        ("x             ", "Clear level (unscored)"),
        ("c / C         ", "Next / previous category"),
        ("Tab / S-Tab   ", "Next / previous team"),
        ("a             ", "Add team"),
        ("m             ", "Add members"),
        ("s             ", "Add skills to category"),
        ("D             ", "Delete team"),
        ("e             ", "Export CSV"),
        ("?             ", "Show/hide this help"),
        ("q / Ctrl-c    ", "Quit"),
    ];
    let mut lines: Vec<Line> = entries
        .iter()
        .map(|(key, desc)| Line::from(vec![Span::styled(*key, key_style), Span::raw(*desc)]))
        .collect();
    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(
        "Press any key to close",
        Style::default().fg(theme.muted),
    )));

    frame.render_widget(Paragraph::new(lines), inner);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::roster::{CompetencyLevel, Roster, SkillCategories};
    use ratatui::backend::TestBackend;
    use ratatui::Terminal;

    fn render(app: &mut App, width: u16, height: u16) -> String {
        let mut terminal = Terminal::new(TestBackend::new(width, height)).unwrap();
        terminal.draw(|frame| draw(frame, app)).unwrap();
        let buffer = terminal.backend().buffer().clone();
        buffer
            .content()
            .chunks(width as usize)
            .map(|row| row.iter().map(|c| c.symbol()).collect::<String>())
            .collect::<Vec<_>>()
            .join("\n")
    }

    fn app_with(roster: Roster) -> App {
        App::new(
            roster,
            std::env::temp_dir().join("skill_radar_ui_unused.json"),
            Config::default(),
            ThemeColors::dark(),
        )
    }

    #[test]
    fn test_empty_roster_hint() {
        let mut app = app_with(Roster::new());
        let screen = render(&mut app, 100, 30);
        assert!(screen.contains("No teams yet"));
    }

    #[test]
    fn test_not_renderable_notice() {
        let mut roster = Roster::new();
        roster.add_team("Alpha", &SkillCategories::defaults()).unwrap();
        roster.add_members("Alpha", "Ana, Ben").unwrap();
        roster
            .set_competency("Alpha", "Ana", "Python", CompetencyLevel::new(7).unwrap())
            .unwrap();
        let mut app = app_with(roster);

        let screen = render(&mut app, 300, 30);
        assert!(screen.contains("Alpha"));
        assert!(screen.contains("Python"));
        assert!(screen.contains("Current count: 1"));
    }

    #[test]
    fn test_renderable_chart_has_legend() {
        let mut roster = Roster::new();
        roster.add_team("Alpha", &SkillCategories::defaults()).unwrap();
        roster.add_members("Alpha", "Ana").unwrap();
        for skill in ["Databricks", "Python", "NodeJS", "SQL", "Gitlab"] {
            roster
                .set_competency("Alpha", "Ana", skill, CompetencyLevel::new(5).unwrap())
                .unwrap();
        }
        let mut app = app_with(roster);

        let screen = render(&mut app, 140, 40);
        assert!(screen.contains("Average"));
        assert!(screen.contains("Technical Competency Radar Chart"));
    }

    #[test]
    fn test_help_popup() {
        let mut app = app_with(Roster::new());
        app.show_help();
        let screen = render(&mut app, 100, 30);
        assert!(screen.contains("Keyboard Shortcuts"));
    }

    #[test]
    fn test_tiny_terminal() {
        let mut app = app_with(Roster::new());
        let screen = render(&mut app, 30, 5);
        assert!(screen.contains("Terminal too small"));
    }
}
