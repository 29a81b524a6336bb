use std::fs::File;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;
use crossterm::event::{
    DisableBracketedPaste, EnableBracketedPaste, KeyCode, KeyEvent, KeyModifiers,
};
use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use rand::SeedableRng;
use rand::rngs::SmallRng;
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Paragraph};
use rust_i18n::t;
use tracing::{info, warn};

use dazi::app::{App, AuthField, DrillSource};
use dazi::config::Config;
use dazi::content::catalog::Catalog;
use dazi::content::pool::PoolTable;
use dazi::content::selector::RngSource;
use dazi::event::{AppEvent, EventHandler};
use dazi::router::View;
use dazi::ui;
use dazi::ui::components::dashboard::Dashboard;
use dazi::ui::components::form::Form;
use dazi::ui::components::menu::{MenuView, mode_label};
use dazi::ui::components::progress_bar::ProgressBar;
use dazi::ui::components::stats_sidebar::StatsSidebar;
use dazi::ui::components::typing_area::TypingArea;
use dazi::ui::layout::AppLayout;
use dazi::ui::line_input::InputResult;
use dazi::ui::theme::Theme;

rust_i18n::i18n!("locales", fallback = "en");

#[derive(Parser)]
#[command(name = "dazi", version, about = "Terminal typing practice for Chinese, English and Wubi")]
struct Cli {
    #[arg(short, long, help = "Config file (default: <config dir>/dazi/config.toml)")]
    config: Option<PathBuf>,

    #[arg(short, long, help = "Theme name")]
    theme: Option<String>,

    #[arg(short, long, help = "Interface language (zh-CN, en)")]
    lang: Option<String>,

    #[arg(short, long, help = "Preselected practice mode (chinese, english, wubi)")]
    mode: Option<String>,

    #[arg(long, help = "JSON catalog replacing the built-in practice texts")]
    texts: Option<PathBuf>,

    #[arg(short, long, help = "Sign in as this user and skip the login screen")]
    user: Option<String>,

    #[arg(long, help = "Write diagnostics to this file")]
    log_file: Option<PathBuf>,
}

fn init_logging(path: &Path) -> Result<()> {
    let file = File::create(path)
        .with_context(|| format!("cannot create log file {}", path.display()))?;
    tracing_subscriber::fmt()
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .with_max_level(tracing::Level::DEBUG)
        .init();
    Ok(())
}

fn build_app(cli: Cli) -> Result<App> {
    let config_path = cli.config.unwrap_or_else(Config::config_path);
    let mut config = Config::load_from(&config_path)
        .with_context(|| format!("cannot load config {}", config_path.display()))?;
    if let Some(lang) = cli.lang {
        config.ui_language = lang;
    }
    if let Some(mode) = cli.mode {
        config.default_mode = mode;
    }
    if let Some(theme) = cli.theme {
        config.theme = theme;
    }
    config.normalize();
    rust_i18n::set_locale(&config.ui_language);

    let catalog = match cli.texts {
        Some(path) => Catalog::load(&path)
            .with_context(|| format!("cannot load practice texts {}", path.display()))?,
        None => Catalog::builtin(),
    };
    let pools = PoolTable::from_config(&config, catalog);
    let theme = Theme::load(&config.theme).unwrap_or_else(|| {
        warn!(
            theme = config.theme.as_str(),
            available = ?Theme::available_themes(),
            "unknown theme, using default"
        );
        Theme::default()
    });

    let rng = Box::new(RngSource(SmallRng::from_entropy()));
    let mut app = App::new(config, theme, pools, rng);
    app.config_path = Some(config_path);

    if let Some(user) = cli.user {
        app.login(&user, "");
    }
    Ok(app)
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    if let Some(ref path) = cli.log_file {
        init_logging(path)?;
    }

    let mut app = build_app(cli)?;
    info!(view = app.router.current_path(), "starting");

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableBracketedPaste)?;

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let events = EventHandler::new(Duration::from_millis(100));

    let result = run_app(&mut terminal, &mut app, &events);

    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        DisableBracketedPaste,
        LeaveAlternateScreen
    )?;
    terminal.show_cursor()?;

    if let Err(err) = result {
        eprintln!("Error: {err:?}");
    }

    Ok(())
}

fn run_app(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
    events: &EventHandler,
) -> Result<()> {
    loop {
        terminal.draw(|frame| render(frame, app))?;

        match events.next()? {
            AppEvent::Key(key) => handle_key(app, key),
            AppEvent::Paste(text) => app.paste(&text),
            // Redraw keeps the elapsed time ticking.
            AppEvent::Tick | AppEvent::Resize => {}
        }

        if app.should_quit {
            return Ok(());
        }
    }
}

fn handle_key(app: &mut App, key: KeyEvent) {
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        app.should_quit = true;
        return;
    }

    match app.screen() {
        View::Auth => handle_auth_key(app, key),
        View::ModeSelector if app.custom_editing => handle_custom_key(app, key),
        View::ModeSelector => handle_menu_key(app, key),
        View::TypingPractice => handle_practice_key(app, key),
        View::Results => handle_result_key(app, key),
        View::FileUpload => handle_upload_key(app, key),
    }
}

fn handle_auth_key(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Tab | KeyCode::BackTab | KeyCode::Up | KeyCode::Down => app.toggle_auth_focus(),
        _ => match app.focused_auth_input().handle(key) {
            InputResult::Submit => app.submit_login(),
            InputResult::Cancel => app.should_quit = true,
            InputResult::Continue => {}
        },
    }
}

fn handle_menu_key(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Char('q') | KeyCode::Esc => app.should_quit = true,
        KeyCode::Up | KeyCode::Char('k') => app.menu.prev(),
        KeyCode::Down | KeyCode::Char('j') => app.menu.next(),
        KeyCode::Enter => {
            let action = app.menu.selected_action();
            app.activate(action);
        }
        KeyCode::Char(ch) => {
            if let Some(action) = app.menu.action_for_key(ch) {
                app.activate(action);
            }
        }
        _ => {}
    }
}

fn handle_custom_key(app: &mut App, key: KeyEvent) {
    match app.custom_input.handle(key) {
        InputResult::Submit => app.submit_custom(),
        InputResult::Cancel => app.custom_editing = false,
        InputResult::Continue => {}
    }
}

fn handle_upload_key(app: &mut App, key: KeyEvent) {
    match app.upload_input.handle(key) {
        InputResult::Submit => app.submit_upload(),
        InputResult::Cancel => app.go_to_modes(),
        InputResult::Continue => {}
    }
}

fn handle_practice_key(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Esc => app.end_drill(),
        KeyCode::Backspace => app.backspace(),
        KeyCode::Enter => app.type_char('\n'),
        KeyCode::Char(ch) => app.type_char(ch),
        _ => {}
    }
}

fn handle_result_key(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Char('r') | KeyCode::Enter => app.next_text(),
        KeyCode::Char('q') | KeyCode::Esc => app.go_to_modes(),
        _ => {}
    }
}

fn render(frame: &mut ratatui::Frame, app: &App) {
    let area = frame.area();
    let colors = &app.theme.colors;

    let bg = Block::default().style(Style::default().bg(colors.bg()));
    frame.render_widget(bg, area);

    match app.screen() {
        View::Auth => render_auth(frame, app),
        View::ModeSelector => render_menu(frame, app),
        View::TypingPractice => render_practice(frame, app),
        View::Results => render_result(frame, app),
        View::FileUpload => render_upload(frame, app),
    }
}

fn render_header(frame: &mut ratatui::Frame, app: &App, area: Rect, info: String) {
    let colors = &app.theme.colors;
    let user = app
        .session
        .user
        .as_deref()
        .map(|name| t!("header.user", name = name).to_string())
        .unwrap_or_default();
    let header = Paragraph::new(Line::from(vec![
        Span::styled(
            format!(" {} ", t!("app.title")),
            Style::default()
                .fg(colors.header_fg())
                .bg(colors.header_bg())
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled(
            format!("{info}{user}"),
            Style::default()
                .fg(colors.text_pending())
                .bg(colors.header_bg()),
        ),
    ]))
    .style(Style::default().bg(colors.header_bg()));
    frame.render_widget(header, area);
}

fn render_footer(frame: &mut ratatui::Frame, app: &App, area: Rect, hint: &str) {
    let lines: Vec<Line> = ui::layout::pack_hint_lines(&[hint], area.width as usize)
        .into_iter()
        .map(|l| {
            Line::from(Span::styled(
                l,
                Style::default().fg(app.theme.colors.text_pending()),
            ))
        })
        .collect();
    frame.render_widget(Paragraph::new(lines), area);
}

fn screen_rows(area: Rect) -> std::rc::Rc<[Rect]> {
    Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Min(0),
            Constraint::Length(1),
        ])
        .split(area)
}

fn render_auth(frame: &mut ratatui::Frame, app: &App) {
    let rows = screen_rows(frame.area());
    render_header(frame, app, rows[0], String::new());

    let error = app.auth_error.as_ref().map(|_| t!("auth.error_empty").to_string());
    let focused = match app.auth_focus {
        AuthField::Username => 0,
        AuthField::Password => 1,
    };
    let form = Form::new(t!("auth.title").to_string(), &app.theme)
        .field(t!("auth.username").to_string(), &app.username)
        .field(t!("auth.password").to_string(), &app.password)
        .focused(focused)
        .error(error.as_deref())
        .hint(t!("auth.hint").to_string());
    frame.render_widget(form, ui::layout::centered_rect(50, 60, rows[1]));
}

fn render_menu(frame: &mut ratatui::Frame, app: &App) {
    let rows = screen_rows(frame.area());
    render_header(frame, app, rows[0], String::new());

    let menu_area = ui::layout::centered_rect(50, 80, rows[1]);
    frame.render_widget(
        MenuView {
            menu: &app.menu,
            theme: &app.theme,
        },
        menu_area,
    );

    if app.custom_editing {
        let label = t!("custom.label", mode = mode_label(app.current_mode())).to_string();
        let form = Form::new(t!("custom.title").to_string(), &app.theme)
            .field(label, &app.custom_input)
            .hint(t!("custom.hint").to_string());
        let popup = ui::layout::centered_rect(60, 40, rows[1]);
        frame.render_widget(ratatui::widgets::Clear, popup);
        frame.render_widget(form, popup);
    }

    render_footer(frame, app, rows[2], &t!("menu.footer"));
}

fn render_upload(frame: &mut ratatui::Frame, app: &App) {
    let rows = screen_rows(frame.area());
    render_header(frame, app, rows[0], String::new());

    let error = if app.upload_input.completion_error {
        Some(t!("upload.completion_error").to_string())
    } else {
        app.upload_error
            .as_ref()
            .map(|e| t!("upload.error", error = e.to_string()).to_string())
    };
    let form = Form::new(t!("upload.title").to_string(), &app.theme)
        .field(t!("upload.label").to_string(), &app.upload_input)
        .error(error.as_deref())
        .hint(t!("upload.hint").to_string());
    frame.render_widget(form, ui::layout::centered_rect(70, 50, rows[1]));
}

fn render_practice(frame: &mut ratatui::Frame, app: &App) {
    let area = frame.area();
    let Some(ref drill) = app.drill else {
        return;
    };

    let app_layout = AppLayout::new(area);
    let tier = app_layout.tier;
    let mode = app.current_mode();

    let source = match &app.drill_source {
        DrillSource::Titled(title) => t!("practice.source", title = title).to_string(),
        DrillSource::Custom => t!("practice.custom_source").to_string(),
        DrillSource::Untitled => String::new(),
    };
    let mut info = format!(" | {}{source}", mode_label(mode));
    if !tier.show_sidebar() {
        info.push_str(&format!(
            " | {:.1}% | {}",
            drill.accuracy(),
            drill.typo_count()
        ));
    }
    render_header(frame, app, app_layout.header, info);

    let show_progress = tier.show_progress_bar(area.height);
    let mut constraints = vec![Constraint::Min(5)];
    if show_progress {
        constraints.push(Constraint::Length(3));
    }
    let main_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints(constraints)
        .split(app_layout.main);

    frame.render_widget(TypingArea::new(drill, &app.theme), main_layout[0]);

    if show_progress {
        let progress = ProgressBar::new(&t!("practice.progress"), drill.progress(), &app.theme);
        frame.render_widget(progress, main_layout[1]);
    }

    if let Some(sidebar_area) = app_layout.sidebar {
        let sidebar = StatsSidebar::new(drill, Some(mode), app.last_result.as_ref(), &app.theme);
        frame.render_widget(sidebar, sidebar_area);
    }

    render_footer(frame, app, app_layout.footer, &t!("practice.footer"));
}

fn render_result(frame: &mut ratatui::Frame, app: &App) {
    let area = frame.area();

    if let Some(ref result) = app.last_result {
        let centered = ui::layout::centered_rect(60, 70, area);
        frame.render_widget(Dashboard::new(result, &app.theme), centered);
    }
}
