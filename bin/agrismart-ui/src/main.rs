//! ---
//! agri_section: "06-terminal-shell"
//! agri_subsection: "binary"
//! agri_type: "source"
//! agri_scope: "code"
//! agri_description: "Terminal shell rendering role-scoped dashboards."
//! agri_version: "v0.1.0-alpha"
//! agri_owner: "tbd"
//! ---
use std::io;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;
use crossterm::cursor::{Hide, Show};
use crossterm::event::{self, Event, KeyCode, KeyEvent};
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use ratatui::backend::CrosstermBackend;
use ratatui::layout::{Constraint, Direction, Layout};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, List, ListItem, ListState, Paragraph};
use ratatui::{Frame, Terminal};

use agrismart_app::guard::{self, GuardOutcome};
use agrismart_common::AppConfig;
use agrismart_roles::{lookup, Role, RoleConfig, RoleResolver};
use agrismart_session::{ClientStorage, SessionStore};

#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "Explore role-scoped AgriSmart dashboards in a terminal UI"
)]
struct Cli {
    /// Configuration file (falls back to AGRISMART_CONFIG, then defaults)
    #[arg(long)]
    config: Option<PathBuf>,
    /// Start with this role instead of the persisted one (viewer, producteur,
    /// technicien, cooperative, ong, etat, admin)
    #[arg(long, value_parser = parse_role)]
    role: Option<Role>,
}

fn parse_role(raw: &str) -> Result<Role, String> {
    Role::ALL
        .iter()
        .copied()
        .find(|role| role.as_str() == raw)
        .ok_or_else(|| {
            let expected = Role::ALL.map(|role| role.as_str()).join(", ");
            format!("unknown role '{raw}' (expected one of: {expected})")
        })
}

struct App {
    session: SessionStore,
    selected: usize,
}

impl App {
    fn new(session: SessionStore) -> Self {
        Self {
            session,
            selected: 0,
        }
    }

    fn role(&self) -> Role {
        self.session.resolver().current()
    }

    fn config(&self) -> &'static RoleConfig {
        lookup(self.role())
    }

    fn select_next(&mut self) {
        let len = self.config().nav.len();
        if len > 0 && self.selected + 1 < len {
            self.selected += 1;
        }
    }

    fn select_previous(&mut self) {
        if self.selected > 0 {
            self.selected -= 1;
        }
    }

    fn cycle_role(&mut self) {
        let current = self.role();
        let index = Role::ALL
            .iter()
            .position(|role| *role == current)
            .unwrap_or(0);
        let next = Role::ALL[(index + 1) % Role::ALL.len()];
        self.session.resolver().set_role(next);
        self.selected = 0;
    }

    fn guard_line(&self) -> String {
        let Some(item) = self.config().nav.get(self.selected) else {
            return String::new();
        };
        match guard::evaluate(&self.session, item.route) {
            GuardOutcome::Allow => format!("{} → accès autorisé", item.route),
            GuardOutcome::Redirect(to) => format!("{} → redirection vers {to}", item.route),
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => AppConfig::load(&[path.clone()]).context("loading configuration")?,
        None => {
            let default_path = PathBuf::from("agrismart.toml");
            if default_path.exists() || std::env::var(AppConfig::ENV_CONFIG_PATH).is_ok() {
                AppConfig::load(&[default_path]).context("loading configuration")?
            } else {
                AppConfig::default()
            }
        }
    };

    agrismart_common::init_tracing(&config.logging).context("initialising logging")?;

    let storage = Arc::new(
        ClientStorage::open(&config.storage.directory).context("opening client storage")?,
    );
    let resolver = RoleResolver::new(storage.clone());
    let session = SessionStore::new(storage, resolver);
    session.restore_session();
    if let Some(role) = cli.role {
        session.resolver().set_role(role);
    }

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    crossterm::execute!(stdout, EnterAlternateScreen, Hide)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;
    let result = run_app(&mut terminal, session, config.ui.tick_millis);
    cleanup_terminal(&mut terminal)?;
    if let Err(err) = result {
        eprintln!("error: {err:?}");
        std::process::exit(1);
    }
    Ok(())
}

fn cleanup_terminal(terminal: &mut Terminal<CrosstermBackend<std::io::Stdout>>) -> Result<()> {
    disable_raw_mode()?;
    crossterm::execute!(terminal.backend_mut(), LeaveAlternateScreen, Show)?;
    terminal.show_cursor()?;
    Ok(())
}

fn run_app(
    terminal: &mut Terminal<CrosstermBackend<std::io::Stdout>>,
    session: SessionStore,
    tick_millis: u64,
) -> Result<()> {
    let mut app = App::new(session);
    let tick_rate = Duration::from_millis(tick_millis.max(50));
    loop {
        terminal.draw(|frame| draw_ui(frame, &mut app))?;
        if event::poll(tick_rate)? {
            if let Event::Key(key) = event::read()? {
                if handle_input(&mut app, key) {
                    break;
                }
            }
        }
    }
    Ok(())
}

fn handle_input(app: &mut App, key: KeyEvent) -> bool {
    match key.code {
        KeyCode::Char('q') | KeyCode::Esc => return true,
        KeyCode::Char('r') | KeyCode::Char('R') => app.cycle_role(),
        KeyCode::Char('j') | KeyCode::Down => app.select_next(),
        KeyCode::Char('k') | KeyCode::Up => app.select_previous(),
        _ => {}
    }
    false
}

fn draw_ui(frame: &mut Frame, app: &mut App) {
    let layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(0),
            Constraint::Length(2),
        ])
        .split(frame.size());

    let config = app.config();
    let who = app
        .session
        .current_user()
        .map(|user| format!("{} {} · {}", user.first_name, user.last_name, user.email))
        .unwrap_or_else(|| "session invitée".to_owned());
    let header = Paragraph::new(Line::from(vec![
        Span::styled(
            config.label,
            Style::default()
                .fg(Color::Green)
                .add_modifier(Modifier::BOLD),
        ),
        Span::raw("  "),
        Span::styled(config.org_label, Style::default().fg(Color::Gray)),
        Span::raw("  "),
        Span::raw(who),
    ]))
    .block(Block::default().borders(Borders::ALL).title("AgriSmart"));
    frame.render_widget(header, layout[0]);

    let main = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(30), Constraint::Percentage(70)])
        .split(layout[1]);

    let mut state = ListState::default();
    if !config.nav.is_empty() {
        state.select(Some(app.selected.min(config.nav.len() - 1)));
    }
    let items: Vec<ListItem> = config
        .nav
        .iter()
        .map(|item| ListItem::new(format!("{}  {}", item.icon, item.label)))
        .collect();
    let list = List::new(items)
        .block(Block::default().borders(Borders::ALL).title("Navigation"))
        .highlight_style(
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        )
        .highlight_symbol("▶ ");
    frame.render_stateful_widget(list, main[0], &mut state);

    let panes = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(6), Constraint::Min(0)])
        .split(main[1]);

    let kpi_lines: Vec<Line> = config
        .kpis
        .iter()
        .map(|kpi| {
            let trend = kpi.trend.unwrap_or("");
            Line::from(format!("{}  {} {}  {}", kpi.icon, kpi.label, kpi.value, trend))
        })
        .collect();
    let kpis = Paragraph::new(kpi_lines)
        .block(Block::default().borders(Borders::ALL).title("Indicateurs"));
    frame.render_widget(kpis, panes[0]);

    let mut panel_lines: Vec<Line> = Vec::new();
    for panel in &config.panels {
        panel_lines.push(Line::from(Span::styled(
            panel.title,
            Style::default().add_modifier(Modifier::BOLD),
        )));
        if let Some(subtitle) = panel.subtitle {
            panel_lines.push(Line::from(Span::styled(
                subtitle,
                Style::default().fg(Color::Gray),
            )));
        }
        for item in panel.items {
            panel_lines.push(Line::from(format!("  • {item}")));
        }
        panel_lines.push(Line::from(""));
    }
    let panels = Paragraph::new(panel_lines)
        .block(Block::default().borders(Borders::ALL).title("Tableau de bord"));
    frame.render_widget(panels, panes[1]);

    let help = Paragraph::new(Line::from(vec![
        Span::raw(app.guard_line()),
        Span::raw("   "),
        Span::styled(
            "↑/↓ naviguer  r changer de rôle  q quitter",
            Style::default().fg(Color::Gray),
        ),
    ]));
    frame.render_widget(help, layout[2]);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn role_flag_accepts_every_known_slug() {
        for role in Role::ALL {
            assert_eq!(parse_role(role.as_str()), Ok(role));
        }
    }

    #[test]
    fn role_flag_rejects_unknown_values() {
        let err = parse_role("amdin").unwrap_err();
        assert!(err.contains("unknown role 'amdin'"));
        assert!(err.contains("admin"));
    }
}
