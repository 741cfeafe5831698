//! Detail pane for the selected user (right panel).

use ratatui::{
  Frame,
  layout::Rect,
  style::{Color, Modifier, Style},
  text::{Line, Span},
  widgets::{Block, Borders, Paragraph},
};
use roster_core::{
  User,
  util::{format::format_date, text::capitalize},
};

use crate::app::{App, Screen};

const TIMESTAMP_PATTERN: &str = "YYYY-MM-DD HH:mm";

/// Render the detail pane into `area`.
pub fn draw(f: &mut Frame, area: Rect, app: &App) {
  let selected = app.roster.selected();

  let title = selected.map_or_else(|| " Detail ".to_string(), |u| format!(" {} ", u.name));
  let border = if app.screen == Screen::Detail {
    Color::Gray
  } else {
    Color::DarkGray
  };
  let block = Block::default()
    .title(title)
    .borders(Borders::ALL)
    .border_style(Style::default().fg(border));

  let inner = block.inner(area);
  f.render_widget(block, area);

  let Some(user) = selected else {
    let hint = Paragraph::new("Select a user and press Enter.")
      .style(Style::default().fg(Color::DarkGray));
    f.render_widget(hint, inner);
    return;
  };

  f.render_widget(Paragraph::new(detail_lines(user)), inner);
}

fn detail_lines(user: &User) -> Vec<Line<'static>> {
  let mut rows = vec![
    ("id", user.id.to_string()),
    ("name", user.name.clone()),
    ("email", user.email.clone()),
    ("role", capitalize(&user.role)),
  ];
  if let Some(at) = &user.created_at {
    rows.push(("created", format_date(at, TIMESTAMP_PATTERN)));
  }
  if let Some(at) = &user.updated_at {
    rows.push(("updated", format_date(at, TIMESTAMP_PATTERN)));
  }

  rows
    .into_iter()
    .map(|(label, value)| {
      Line::from(vec![
        Span::styled(
          format!("{label:<10}"),
          Style::default()
            .fg(Color::Cyan)
            .add_modifier(Modifier::BOLD),
        ),
        Span::raw(value),
      ])
    })
    .collect()
}
