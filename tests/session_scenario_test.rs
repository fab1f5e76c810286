//! ワークシートセッションのシナリオテスト
//!
//! 写真2枚 → 編集 → グリッド → JSON書き出し → 再読み込み の一連の流れ

use circle_grid::export::html::render_grid_html;
use circle_grid_common::{
    ExtractionResult, PhotoPurpose, Screen, Session, SessionError, UploadMode, WorksheetDraft,
};
use serde_json::json;

fn extraction(title: &str, words: &[&str]) -> ExtractionResult {
    ExtractionResult {
        title: title.to_string(),
        words: words.iter().map(|w| w.to_string()).collect(),
        usage: json!({"input_tokens": 1000, "output_tokens": 30}),
    }
}

#[test]
fn test_photo_merge_edit_and_generate() {
    let mut session = Session::new();
    session.choose_mode(UploadMode::Photo).unwrap();
    assert_eq!(session.screen(), Screen::PhotoUpload);

    // 1枚目: 置換
    Session::validate_photo("image/jpeg", 300_000).unwrap();
    let purpose = session.begin_photo_analysis("data:image/jpeg;base64,AAAA").unwrap();
    assert_eq!(purpose, PhotoPurpose::Replace);
    assert!(session.is_analyzing());
    session
        .complete_photo_analysis(&extraction("動物篇", &["狗", "貓"]))
        .unwrap();
    assert_eq!(session.screen(), Screen::ReviewEdit);
    assert_eq!(session.title(), "動物篇");

    // 2枚目: マージ（タイトルは変わらない）
    let purpose = session.begin_photo_analysis("data:image/png;base64,BBBB").unwrap();
    assert_eq!(purpose, PhotoPurpose::Merge);
    session
        .complete_photo_analysis(&extraction("其他", &["貓", "魚"]))
        .unwrap();
    assert_eq!(session.title(), "動物篇");
    assert_eq!(session.words(), ["狗", "貓", "魚"]);
    assert_eq!(session.photo_preview(), None);

    // 編集
    session.add_word().unwrap();
    session.edit_word(3, "鳥").unwrap();
    session.remove_word(0).unwrap();
    assert_eq!(session.words(), ["貓", "魚", "鳥"]);

    session.generate_grid().unwrap();
    assert_eq!(session.screen(), Screen::Grid);

    let html = render_grid_html(session.draft());
    assert!(html.contains("<h1>動物篇</h1>"));
    assert_eq!(html.matches("class=\"cell\"").count(), 3);

    // 書き出したJSONを新しいセッションで読み込む
    let exported = session.draft().to_json();
    let mut next = Session::new();
    next.choose_mode(UploadMode::Json).unwrap();
    next.import_json(&exported).unwrap();
    assert_eq!(next.screen(), Screen::Grid);
    assert_eq!(next.draft(), session.draft());
}

#[test]
fn test_failed_analysis_keeps_words() {
    let mut session = Session::new();
    session.choose_mode(UploadMode::Photo).unwrap();
    session.begin_photo_analysis("data:image/png;base64,AAAA").unwrap();
    session.complete_photo_analysis(&extraction("水果", &["蘋果"])).unwrap();

    session.begin_photo_analysis("data:image/png;base64,BBBB").unwrap();
    let err = session.fail_photo_analysis("upstream_failure");

    assert_eq!(err.to_string(), "Failed to analyze photo. Please try again.");
    assert_eq!(session.screen(), Screen::ReviewEdit);
    assert_eq!(session.words(), ["蘋果"]);
    assert!(!session.is_analyzing());
}

#[test]
fn test_generate_rejected_when_empty() {
    let mut session = Session::new();
    session.choose_mode(UploadMode::Photo).unwrap();
    session.begin_photo_analysis("data:image/png;base64,AAAA").unwrap();
    session.complete_photo_analysis(&extraction("空", &[])).unwrap();

    assert_eq!(session.generate_grid(), Err(SessionError::EmptyWordListOnGenerate));
    assert_eq!(session.screen(), Screen::ReviewEdit);
}

#[test]
fn test_reset_discards_late_result() {
    let mut session = Session::new();
    session.choose_mode(UploadMode::Photo).unwrap();
    session.begin_photo_analysis("data:image/png;base64,AAAA").unwrap();
    session.reset();

    let late = session.complete_photo_analysis(&extraction("遲到", &["x"]));
    assert!(matches!(late, Err(SessionError::InvalidTransition { .. })));
    assert_eq!(session.draft(), &WorksheetDraft::default());
    assert_eq!(session.screen(), Screen::Landing);
}

#[test]
fn test_bad_json_file_stays_on_upload() {
    let mut session = Session::new();
    session.choose_mode(UploadMode::Json).unwrap();

    assert!(matches!(
        session.import_json("{not json"),
        Err(SessionError::JsonParseFailed(_))
    ));
    assert_eq!(
        session.import_json(r#"{"title": "x"}"#),
        Err(SessionError::JsonShapeInvalid)
    );
    assert_eq!(session.screen(), Screen::JsonUpload);
}
