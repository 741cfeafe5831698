//! Role statistics strip under the detail pane.

use ratatui::{
  Frame,
  layout::Rect,
  style::{Color, Style},
  text::{Line, Span},
  widgets::{Block, Borders, Paragraph},
};
use roster_core::user::roles;

use crate::app::App;

/// Rows taken by the pane, borders included.
pub const HEIGHT: u16 = 4;

pub fn draw(f: &mut Frame, area: Rect, app: &App) {
  let block = Block::default()
    .title(" Stats ")
    .borders(Borders::ALL)
    .border_style(Style::default().fg(Color::DarkGray));
  let inner = block.inner(area);
  f.render_widget(block, area);

  let roster = &app.roster;
  let headline = Line::from(vec![
    stat("total", roster.count()),
    stat("admin", roster.count_by_role(roles::ADMIN)),
    stat("user", roster.count_by_role(roles::USER)),
  ]);

  // Every role present, including free-form ones.
  let breakdown = roster
    .role_counts()
    .into_iter()
    .map(|(role, n)| format!("{role} {n}"))
    .collect::<Vec<_>>()
    .join(" · ");

  f.render_widget(
    Paragraph::new(vec![
      headline,
      Line::styled(breakdown, Style::default().fg(Color::DarkGray)),
    ]),
    inner,
  );
}

fn stat(label: &str, value: usize) -> Span<'static> {
  Span::styled(format!("{label}: {value}   "), Style::default().fg(Color::White))
}
