//! User list pane (left panel).

use ratatui::{
  Frame,
  layout::Rect,
  style::{Color, Modifier, Style},
  text::{Line, Span},
  widgets::{Block, Borders, List, ListItem, ListState, Paragraph},
};
use roster_core::{user::roles, util::text::truncate};

use crate::app::{App, Screen};

const NAME_WIDTH: usize = 24;

/// Render the user list into `area`.
pub fn draw(f: &mut Frame, area: Rect, app: &App) {
  let filtered = app.filtered_users();
  let total = app.roster.count();

  let title = if app.filter_active || !app.filter.is_empty() {
    format!(" Users ({}/{}) ", filtered.len(), total)
  } else {
    format!(" Users ({total}) ")
  };

  let border = if app.screen == Screen::List {
    Color::Gray
  } else {
    Color::DarkGray
  };
  let block = Block::default()
    .title(title)
    .borders(Borders::ALL)
    .border_style(Style::default().fg(border));

  let selected = app.roster.selection();
  let items: Vec<ListItem> = filtered
    .iter()
    .map(|user| {
      let marker = if selected.is(user.id) { "● " } else { "  " };
      let role_color = match user.role.as_str() {
        roles::ADMIN => Color::Red,
        roles::EDITOR => Color::Yellow,
        _ => Color::Green,
      };
      ListItem::new(Line::from(vec![
        Span::styled(marker, Style::default().fg(Color::Cyan)),
        Span::raw(truncate(&user.name, NAME_WIDTH, "…")),
        Span::styled(format!("  {}", user.role), Style::default().fg(role_color)),
      ]))
    })
    .collect();

  let mut inner_area = block.inner(area);
  f.render_widget(block, area);

  // Filter bar on the last inner row.
  if (app.filter_active || !app.filter.is_empty()) && inner_area.height > 2 {
    let filter_area = Rect {
      x:      inner_area.x,
      y:      inner_area.y + inner_area.height - 1,
      width:  inner_area.width,
      height: 1,
    };
    inner_area.height -= 1;

    let filter_text = if app.filter_active {
      format!("/{}_", app.filter)
    } else {
      format!("/{}", app.filter)
    };
    f.render_widget(
      Paragraph::new(filter_text).style(Style::default().fg(Color::Yellow)),
      filter_area,
    );
  }

  if filtered.is_empty() {
    f.render_widget(
      Paragraph::new("No users.").style(Style::default().fg(Color::DarkGray)),
      inner_area,
    );
    return;
  }

  let mut state = ListState::default();
  state.select(Some(app.list_cursor));

  f.render_stateful_widget(
    List::new(items).highlight_style(
      Style::default()
        .bg(Color::Blue)
        .fg(Color::White)
        .add_modifier(Modifier::BOLD),
    ),
    inner_area,
    &mut state,
  );
}
