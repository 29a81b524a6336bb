use std::path::PathBuf;

use tracing::{info, warn};

use crate::auth::{AuthError, AuthStub};
use crate::config::Config;
use crate::content::PracticeCategory;
use crate::content::pool::PoolTable;
use crate::content::selector::{ContentRequest, ContentSelector, RandomSource, SelectionSource};
use crate::router::{Router, View};
use crate::session::drill::DrillState;
use crate::session::input;
use crate::session::result::{DrillResult, PracticeResults};
use crate::session::state::SessionState;
use crate::ui::components::menu::{Menu, MenuAction};
use crate::ui::line_input::{InputKind, LineInput};
use crate::ui::theme::Theme;
use crate::upload::{self, UploadError};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AuthField {
    Username,
    Password,
}

/// Where the text of the running drill came from, for the practice header.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum DrillSource {
    Titled(String),
    Untitled,
    Custom,
}

pub struct App {
    pub config: Config,
    /// Where language changes are saved. `None` keeps them in memory.
    pub config_path: Option<PathBuf>,
    pub theme: Theme,
    pub router: Router,
    pub session: SessionState,
    pub selector: ContentSelector,
    rng: Box<dyn RandomSource>,
    pub drill: Option<DrillState>,
    pub drill_source: DrillSource,
    pub last_result: Option<DrillResult>,
    pub menu: Menu,
    pub username: LineInput,
    pub password: LineInput,
    pub auth_focus: AuthField,
    pub auth_error: Option<AuthError>,
    /// Custom text entry is an overlay on the mode selector.
    pub custom_editing: bool,
    pub custom_input: LineInput,
    pub upload_input: LineInput,
    pub upload_error: Option<UploadError>,
    pub should_quit: bool,
}

impl App {
    pub fn new(config: Config, theme: Theme, pools: PoolTable, rng: Box<dyn RandomSource>) -> Self {
        let mut menu = Menu::new();
        menu.select_mode(config.default_category());

        Self {
            config,
            config_path: None,
            theme,
            router: Router::new("/"),
            session: SessionState::new(),
            selector: ContentSelector::new(pools),
            rng,
            drill: None,
            drill_source: DrillSource::Untitled,
            last_result: None,
            menu,
            username: LineInput::new(InputKind::Plain),
            password: LineInput::new(InputKind::Secret),
            auth_focus: AuthField::Username,
            auth_error: None,
            custom_editing: false,
            custom_input: LineInput::new(InputKind::Plain),
            upload_input: LineInput::new(InputKind::Path),
            upload_error: None,
            should_quit: false,
        }
    }

    pub fn screen(&self) -> View {
        self.router.current()
    }

    /// Mode used for custom text and retries when nothing was picked yet.
    pub fn current_mode(&self) -> PracticeCategory {
        self.session
            .selected_mode
            .unwrap_or_else(|| self.config.default_category())
    }

    pub fn toggle_auth_focus(&mut self) {
        self.auth_focus = match self.auth_focus {
            AuthField::Username => AuthField::Password,
            AuthField::Password => AuthField::Username,
        };
    }

    pub fn focused_auth_input(&mut self) -> &mut LineInput {
        match self.auth_focus {
            AuthField::Username => &mut self.username,
            AuthField::Password => &mut self.password,
        }
    }

    pub fn submit_login(&mut self) {
        let username = self.username.value().to_string();
        let password = self.password.value().to_string();
        self.login(&username, &password);
    }

    pub fn login(&mut self, username: &str, password: &str) {
        match AuthStub::login(&mut self.session, username, password) {
            Ok(()) => {
                self.auth_error = None;
                self.password.clear();
                self.auth_focus = AuthField::Username;
                self.router.push("/mode-selector");
            }
            Err(e) => self.auth_error = Some(e),
        }
    }

    pub fn logout(&mut self) {
        AuthStub::logout(&mut self.session);
        self.clear_drill();
        self.custom_editing = false;
        self.username.clear();
        self.password.clear();
        self.router.push("/auth");
    }

    pub fn activate(&mut self, action: MenuAction) {
        match action {
            MenuAction::Practice(category) => self.start_practice(category),
            MenuAction::CustomText => {
                self.custom_editing = true;
            }
            MenuAction::FileUpload => {
                self.upload_error = None;
                self.router.push("/file-upload");
            }
            MenuAction::ToggleLanguage => self.toggle_language(),
            MenuAction::Logout => self.logout(),
        }
    }

    pub fn start_practice(&mut self, category: PracticeCategory) {
        self.session.set_mode(category);
        self.menu.select_mode(category);
        self.begin_drill(None);
    }

    /// Blank text falls through to the pool of the current mode.
    pub fn start_custom(&mut self, text: &str) {
        self.session.set_mode(self.current_mode());
        self.custom_editing = false;
        self.begin_drill(Some(text));
    }

    pub fn submit_custom(&mut self) {
        let text = self.custom_input.value().to_string();
        self.start_custom(&text);
    }

    pub fn submit_upload(&mut self) {
        let path = upload::expand_home(self.upload_input.value().trim());
        match upload::load_custom_text(&path, self.config.max_upload_bytes) {
            Ok(text) => {
                self.upload_error = None;
                self.start_custom(&text);
            }
            Err(e) => self.upload_error = Some(e),
        }
    }

    /// Another text in the mode of the last drill.
    pub fn next_text(&mut self) {
        self.begin_drill(None);
    }

    fn begin_drill(&mut self, custom_text: Option<&str>) {
        let category = self.current_mode();
        let mut request = ContentRequest::new(category.as_str());
        if let Some(text) = custom_text {
            request = request.with_custom_text(text);
        }
        let selection =
            self.session
                .load_practice_content(&self.selector, request, self.rng.as_mut());

        self.drill_source = match selection.source {
            SelectionSource::Custom => DrillSource::Custom,
            SelectionSource::Pool(id) => self
                .selector
                .pools()
                .get(id)
                .title_of(&selection.text)
                .map(|t| DrillSource::Titled(t.to_string()))
                .unwrap_or(DrillSource::Untitled),
            SelectionSource::Placeholder => DrillSource::Untitled,
        };
        self.drill = Some(DrillState::new(&selection.text));
        self.router.push("/typing-practice");
    }

    pub fn type_char(&mut self, ch: char) {
        let Some(drill) = self.drill.as_mut() else {
            return;
        };
        input::process_char(drill, ch);
        if drill.is_complete() {
            self.finish_drill(false);
        }
    }

    pub fn backspace(&mut self) {
        if let Some(drill) = self.drill.as_mut() {
            input::process_backspace(drill);
        }
    }

    /// Esc during a drill: score what was typed, or leave if nothing was.
    pub fn end_drill(&mut self) {
        let has_progress = self.drill.as_ref().is_some_and(|d| d.cursor > 0);
        if has_progress {
            self.finish_drill(true);
        } else {
            self.go_to_modes();
        }
    }

    fn finish_drill(&mut self, partial: bool) {
        let Some(drill) = self.drill.as_mut() else {
            return;
        };
        if drill.finished_at.is_none() && drill.started_at.is_some() {
            drill.finished_at = Some(std::time::Instant::now());
        }
        let result = DrillResult::from_drill(drill, self.session.selected_mode, partial);
        let summary = PracticeResults::from_drill(&result);
        info!(
            mode = self.session.selected_mode.map(|m| m.as_str()),
            speed = summary.speed,
            accuracy = summary.accuracy,
            partial,
            "drill finished"
        );
        self.session.update_results(summary);
        self.last_result = Some(result);
        self.router.push("/results");
    }

    pub fn go_to_modes(&mut self) {
        self.clear_drill();
        self.custom_editing = false;
        self.router.push("/mode-selector");
    }

    fn clear_drill(&mut self) {
        self.drill = None;
    }

    pub fn toggle_language(&mut self) {
        self.config.toggle_ui_language();
        rust_i18n::set_locale(&self.config.ui_language);
        info!(language = self.config.ui_language.as_str(), "switched UI language");
        if let Some(path) = &self.config_path
            && let Err(e) = self.config.save_to(path)
        {
            warn!(path = %path.display(), error = %e, "could not save config");
        }
    }

    /// Text delivered by a bracketed paste goes to whatever has focus.
    pub fn paste(&mut self, text: &str) {
        match self.screen() {
            View::Auth => self.focused_auth_input().insert_str(text),
            View::ModeSelector if self.custom_editing => self.custom_input.insert_str(text),
            View::FileUpload => self.upload_input.insert_str(text),
            View::TypingPractice => {
                for ch in text.chars().filter(|&c| c != '\r') {
                    if self.screen() != View::TypingPractice {
                        break;
                    }
                    self.type_char(ch);
                }
            }
            _ => {}
        }
    }
}
