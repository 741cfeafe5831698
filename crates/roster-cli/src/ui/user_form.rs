//! Add-user form, drawn as a popup over the body.

use ratatui::{
  Frame,
  layout::{Constraint, Flex, Layout, Rect},
  style::{Color, Modifier, Style},
  text::{Line, Span},
  widgets::{Block, Borders, Clear, Paragraph},
};

use crate::app::{App, FormField};

pub fn draw(f: &mut Frame, area: Rect, app: &App) {
  let popup = centered(area, 50, 6);
  f.render_widget(Clear, popup);

  let block = Block::default()
    .title(" Add user ")
    .borders(Borders::ALL)
    .border_style(Style::default().fg(Color::Cyan));
  let inner = block.inner(popup);
  f.render_widget(block, popup);

  let form = &app.form;
  let lines = vec![
    field_line("Name", &form.name, form.focus == FormField::Name),
    field_line("Email", &form.email, form.focus == FormField::Email),
    Line::from(""),
    Line::styled(
      "New users get the \"user\" role.",
      Style::default().fg(Color::DarkGray),
    ),
  ];
  f.render_widget(Paragraph::new(lines), inner);
}

fn field_line<'a>(label: &'a str, value: &'a str, focused: bool) -> Line<'a> {
  let label_style = if focused {
    Style::default()
      .fg(Color::Cyan)
      .add_modifier(Modifier::BOLD)
  } else {
    Style::default().fg(Color::Gray)
  };
  let cursor = if focused { "_" } else { "" };
  Line::from(vec![
    Span::styled(format!("{label:<7}"), label_style),
    Span::raw(value),
    Span::styled(cursor, Style::default().fg(Color::Yellow)),
  ])
}

fn centered(area: Rect, width: u16, height: u16) -> Rect {
  let [row] = Layout::vertical([Constraint::Length(height)])
    .flex(Flex::Center)
    .areas(area);
  let [cell] = Layout::horizontal([Constraint::Length(width)])
    .flex(Flex::Center)
    .areas(row);
  cell
}
