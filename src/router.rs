use tracing::{info, warn};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum View {
    Auth,
    ModeSelector,
    TypingPractice,
    Results,
    FileUpload,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Target {
    View(View),
    Redirect(&'static str),
}

#[derive(Clone, Copy, Debug)]
pub struct Route {
    pub path: &'static str,
    pub name: Option<&'static str>,
    pub target: Target,
}

pub const ROUTES: &[Route] = &[
    Route {
        path: "/",
        name: None,
        target: Target::Redirect("/auth"),
    },
    Route {
        path: "/auth",
        name: Some("Auth"),
        target: Target::View(View::Auth),
    },
    Route {
        path: "/mode-selector",
        name: Some("ModeSelector"),
        target: Target::View(View::ModeSelector),
    },
    Route {
        path: "/typing-practice",
        name: Some("TypingPractice"),
        target: Target::View(View::TypingPractice),
    },
    Route {
        path: "/results",
        name: Some("Results"),
        target: Target::View(View::Results),
    },
    Route {
        path: "/file-upload",
        name: Some("FileUpload"),
        target: Target::View(View::FileUpload),
    },
];

const MAX_REDIRECTS: usize = 8;

/// Follows redirects until a view is reached. `None` for unknown paths or redirect loops.
pub fn resolve(path: &str) -> Option<View> {
    resolve_in(ROUTES, path)
}

fn resolve_in(routes: &[Route], path: &str) -> Option<View> {
    let mut current = path;
    for _ in 0..=MAX_REDIRECTS {
        let route = routes.iter().find(|r| r.path == current)?;
        match route.target {
            Target::View(view) => return Some(view),
            Target::Redirect(to) => current = to,
        }
    }
    None
}

pub fn path_of(view: View) -> &'static str {
    ROUTES
        .iter()
        .find(|r| r.target == Target::View(view))
        .map(|r| r.path)
        .unwrap_or("/")
}

pub fn name_of(view: View) -> &'static str {
    ROUTES
        .iter()
        .find(|r| r.target == Target::View(view))
        .and_then(|r| r.name)
        .unwrap_or("")
}

#[derive(Debug)]
pub struct Router {
    current: View,
}

impl Router {
    pub fn new(start_path: &str) -> Self {
        Self {
            current: resolve(start_path).unwrap_or(View::Auth),
        }
    }

    pub fn current(&self) -> View {
        self.current
    }

    pub fn current_path(&self) -> &'static str {
        path_of(self.current)
    }

    /// Unknown paths leave the current view in place and return `false`.
    pub fn push(&mut self, path: &str) -> bool {
        match resolve(path) {
            Some(view) => {
                if view != self.current {
                    info!(
                        from = self.current_path(),
                        to = path_of(view),
                        view = name_of(view),
                        "navigate"
                    );
                    self.current = view;
                }
                true
            }
            None => {
                warn!(path, "no route for path");
                false
            }
        }
    }
}
