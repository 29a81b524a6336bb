use dazi::app::{App, DrillSource};
use dazi::config::Config;
use dazi::content::PracticeCategory;
use dazi::content::catalog::Catalog;
use dazi::content::pool::PoolTable;
use dazi::content::selector::ScriptedSource;
use dazi::router::View;
use dazi::ui::components::menu::MenuAction;
use dazi::ui::line_input::{InputKind, LineInput};
use dazi::ui::theme::Theme;

fn app_with_catalog(json: &str, picks: Vec<usize>) -> App {
    let catalog = Catalog::from_json(json).unwrap();
    let pools = PoolTable::from_config(&Config::default(), catalog);
    App::new(
        Config::default(),
        Theme::default(),
        pools,
        Box::new(ScriptedSource::new(picks)),
    )
}

const CATALOG: &str = r#"{
    "chinese": [
        { "title": "春", "content": "春眠不觉晓" },
        { "title": "静夜思", "content": "床前明月光" }
    ],
    "english": [
        { "title": "Short", "content": "go" },
        { "content": "no title" }
    ]
}"#;

fn type_text(app: &mut App, text: &str) {
    for ch in text.chars() {
        app.type_char(ch);
    }
}

#[test]
fn sign_in_practice_and_retry() {
    let mut app = app_with_catalog(CATALOG, vec![0]);
    assert_eq!(app.screen(), View::Auth);

    app.login("  小明 ", "whatever");
    assert_eq!(app.screen(), View::ModeSelector);
    assert_eq!(app.session.user.as_deref(), Some("小明"));

    app.activate(MenuAction::Practice(PracticeCategory::Chinese));
    assert_eq!(app.screen(), View::TypingPractice);
    assert_eq!(app.session.practice_content.as_deref(), Some("春眠不觉晓"));
    assert_eq!(app.drill_source, DrillSource::Titled("春".to_string()));

    type_text(&mut app, "春眠不觉晓");
    assert_eq!(app.screen(), View::Results);
    let result = app.last_result.as_ref().unwrap();
    assert_eq!(result.category, Some(PracticeCategory::Chinese));
    assert_eq!(result.accuracy, 100.0);

    // Same mode, different text.
    app.next_text();
    assert_eq!(app.screen(), View::TypingPractice);
    assert_eq!(app.session.practice_content.as_deref(), Some("床前明月光"));
    assert_eq!(app.session.selected_mode, Some(PracticeCategory::Chinese));
}

#[test]
fn wubi_draws_chinese_text_and_scores_in_characters() {
    let mut app = app_with_catalog(CATALOG, vec![1]);
    app.login("u", "");
    app.start_practice(PracticeCategory::Wubi);
    assert_eq!(app.session.practice_content.as_deref(), Some("床前明月光"));

    type_text(&mut app, "床前明月光");
    let result = app.last_result.as_ref().unwrap();
    assert_eq!(app.session.practice_results.speed, result.cpm);
}

#[test]
fn english_results_use_words_per_minute() {
    let mut app = app_with_catalog(CATALOG, vec![0]);
    app.start_practice(PracticeCategory::English);
    type_text(&mut app, "go");
    let result = app.last_result.as_ref().unwrap();
    assert_eq!(app.session.practice_results.speed, result.wpm);
}

#[test]
fn mistakes_count_even_when_corrected() {
    let mut app = app_with_catalog(CATALOG, vec![0]);
    app.start_practice(PracticeCategory::English);
    app.type_char('x');
    app.backspace();
    type_text(&mut app, "go");
    let result = app.last_result.as_ref().unwrap();
    assert_eq!(result.incorrect, 1);
    assert_eq!(result.accuracy, 50.0);
}

#[test]
fn custom_text_overrides_pool_then_pool_resumes() {
    let mut app = app_with_catalog(CATALOG, vec![0]);
    app.login("u", "");
    app.activate(MenuAction::CustomText);
    assert!(app.custom_editing);
    app.custom_input.insert_str("  自己的文字 ");
    app.submit_custom();

    assert!(!app.custom_editing);
    assert_eq!(app.session.practice_content.as_deref(), Some("自己的文字"));
    assert_eq!(app.session.last_used_text.as_deref(), Some("自己的文字"));
    assert_eq!(app.drill_source, DrillSource::Custom);

    app.end_drill();
    app.start_practice(PracticeCategory::Chinese);
    assert_eq!(app.session.practice_content.as_deref(), Some("春眠不觉晓"));
}

#[test]
fn uploaded_file_becomes_practice_text() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("lesson.txt");
    std::fs::write(&path, "hello\r\nworld\r\n").unwrap();

    let mut app = app_with_catalog(CATALOG, vec![0]);
    app.login("u", "");
    app.activate(MenuAction::FileUpload);
    assert_eq!(app.screen(), View::FileUpload);

    app.upload_input = LineInput::with_text(&path.display().to_string(), InputKind::Path);
    app.submit_upload();
    assert_eq!(app.screen(), View::TypingPractice);
    assert_eq!(app.session.practice_content.as_deref(), Some("hello\nworld"));

    // Enter is typed as a newline.
    type_text(&mut app, "hello\nworld");
    assert_eq!(app.screen(), View::Results);
}

#[test]
fn oversized_upload_is_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("big.txt");
    std::fs::write(&path, "字".repeat(100)).unwrap();

    let mut app = app_with_catalog(CATALOG, vec![0]);
    app.config.max_upload_bytes = 16;
    app.activate(MenuAction::FileUpload);
    app.upload_input = LineInput::with_text(&path.display().to_string(), InputKind::Path);
    app.submit_upload();
    assert_eq!(app.screen(), View::FileUpload);
    assert!(app.upload_error.is_some());
    assert!(app.drill.is_none());
}

#[test]
fn empty_catalog_serves_placeholder() {
    let mut app = app_with_catalog("{}", vec![0]);
    app.start_practice(PracticeCategory::English);
    assert_eq!(
        app.session.practice_content.as_deref(),
        Some(dazi::content::DEFAULT_TEXT)
    );
    assert_eq!(app.drill_source, DrillSource::Untitled);
}

#[test]
fn logout_returns_to_sign_in() {
    let mut app = app_with_catalog(CATALOG, vec![0]);
    app.login("u", "");
    app.start_practice(PracticeCategory::Chinese);
    app.go_to_modes();
    app.activate(MenuAction::Logout);
    assert_eq!(app.screen(), View::Auth);
    assert!(app.session.user.is_none());
    assert!(app.drill.is_none());
}
