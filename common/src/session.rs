//! セッション状態遷移
//!
//! 画面は5つ（Landing / JsonUpload / PhotoUpload / ReviewEdit / Grid）で、
//! 操作ごとに許可される画面が決まっている。失敗した操作は状態を一切変更しない。
//!
//! ```text
//! Landing ─┬─ choose_mode(Json) ──► JsonUpload ── import_json ──────────► Grid
//!          └─ choose_mode(Photo) ─► PhotoUpload ─ photo (Replace) ─► ReviewEdit
//!                                        ▲                  │  ▲ photo (Merge)
//!                                        └── cancel_review ─┘  └──────┘
//! ReviewEdit ── generate_grid ──► Grid ── reset ──► Landing
//! Grid ── edit_grid ──► ReviewEdit（JSONモードの cancel_review は Grid へ戻る）
//! ```

use thiserror::Error;

use crate::draft::DraftError;
use crate::import::{parse_word_list, ImportError};
use crate::types::{ExtractionResult, UploadMode, WorksheetDraft};

/// 写真サイズの上限（5 MiB）
pub const MAX_PHOTO_BYTES: u64 = 5 * 1024 * 1024;

/// 画面
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Screen {
    #[default]
    Landing,
    JsonUpload,
    PhotoUpload,
    ReviewEdit,
    Grid,
}

impl Screen {
    pub fn as_str(&self) -> &'static str {
        match self {
            Screen::Landing => "landing",
            Screen::JsonUpload => "json-upload",
            Screen::PhotoUpload => "photo-upload",
            Screen::ReviewEdit => "review-edit",
            Screen::Grid => "grid",
        }
    }
}

impl std::fmt::Display for Screen {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// 写真解析結果の反映方法
///
/// 最初の写真は置換、レビュー画面から追加した写真はマージ
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PhotoPurpose {
    Replace,
    Merge,
}

/// UIに表示するエラー
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SessionError {
    #[error("Please select an image file")]
    FileTypeRejected(String),

    #[error("Image size must be less than 5MB")]
    FileTooLarge { size: u64 },

    #[error("Error parsing JSON file. Please check the file format.")]
    JsonParseFailed(String),

    #[error("Invalid JSON format. Please provide an array of words or an object with a 'words' array.")]
    JsonShapeInvalid,

    #[error("Failed to analyze photo. Please try again.")]
    GatewayCallFailed(String),

    #[error("Please add at least one word")]
    EmptyWordListOnGenerate,

    #[error("A photo is still being analyzed")]
    AnalysisInProgress,

    #[error("`{action}` is not available on the {screen} screen")]
    InvalidTransition { action: &'static str, screen: Screen },

    #[error(transparent)]
    Draft(#[from] DraftError),
}

impl From<ImportError> for SessionError {
    fn from(err: ImportError) -> Self {
        match err {
            ImportError::Parse(msg) => SessionError::JsonParseFailed(msg),
            ImportError::Shape => SessionError::JsonShapeInvalid,
        }
    }
}

/// ページ1回分のセッション
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Session {
    screen: Screen,
    mode: Option<UploadMode>,
    draft: WorksheetDraft,
    photo_preview: Option<String>,
    is_analyzing: bool,
    pending: Option<PhotoPurpose>,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn screen(&self) -> Screen {
        self.screen
    }

    pub fn draft(&self) -> &WorksheetDraft {
        &self.draft
    }

    pub fn title(&self) -> &str {
        &self.draft.title
    }

    pub fn words(&self) -> &[String] {
        &self.draft.words
    }

    pub fn photo_preview(&self) -> Option<&str> {
        self.photo_preview.as_deref()
    }

    pub fn is_analyzing(&self) -> bool {
        self.is_analyzing
    }

    fn ensure(&self, action: &'static str, allowed: &[Screen]) -> Result<(), SessionError> {
        if allowed.contains(&self.screen) {
            Ok(())
        } else {
            Err(SessionError::InvalidTransition {
                action,
                screen: self.screen,
            })
        }
    }

    fn ensure_idle(&self) -> Result<(), SessionError> {
        if self.is_analyzing {
            Err(SessionError::AnalysisInProgress)
        } else {
            Ok(())
        }
    }

    // =============================================
    // 画面遷移
    // =============================================

    pub fn choose_mode(&mut self, mode: UploadMode) -> Result<(), SessionError> {
        self.ensure("choose_mode", &[Screen::Landing])?;
        self.mode = Some(mode);
        self.screen = match mode {
            UploadMode::Json => Screen::JsonUpload,
            UploadMode::Photo => Screen::PhotoUpload,
        };
        Ok(())
    }

    /// アップロード画面からトップへ戻る（下書きは保持）
    pub fn back_to_landing(&mut self) -> Result<(), SessionError> {
        self.ensure("back_to_landing", &[Screen::JsonUpload, Screen::PhotoUpload])?;
        self.ensure_idle()?;
        self.mode = None;
        self.photo_preview = None;
        self.screen = Screen::Landing;
        Ok(())
    }

    /// JSONを読み込んでそのままグリッドへ
    pub fn import_json(&mut self, text: &str) -> Result<(), SessionError> {
        self.ensure("import_json", &[Screen::JsonUpload])?;
        let draft = parse_word_list(text)?;
        self.draft = draft;
        self.screen = Screen::Grid;
        Ok(())
    }

    // =============================================
    // 写真解析
    // =============================================

    /// ネットワーク呼び出し前のファイル検証
    pub fn validate_photo(mime_type: &str, size: u64) -> Result<(), SessionError> {
        if !mime_type.starts_with("image/") {
            return Err(SessionError::FileTypeRejected(mime_type.to_string()));
        }
        if size > MAX_PHOTO_BYTES {
            return Err(SessionError::FileTooLarge { size });
        }
        Ok(())
    }

    /// 解析開始。プレビューを表示し、反映方法を返す
    pub fn begin_photo_analysis(
        &mut self,
        data_uri: impl Into<String>,
    ) -> Result<PhotoPurpose, SessionError> {
        self.ensure("begin_photo_analysis", &[Screen::PhotoUpload, Screen::ReviewEdit])?;
        self.ensure_idle()?;
        let purpose = if self.screen == Screen::ReviewEdit {
            PhotoPurpose::Merge
        } else {
            PhotoPurpose::Replace
        };
        self.photo_preview = Some(data_uri.into());
        self.is_analyzing = true;
        self.pending = Some(purpose);
        Ok(purpose)
    }

    /// 解析成功。置換ならレビュー画面へ、マージなら単語だけ追加
    pub fn complete_photo_analysis(
        &mut self,
        result: &ExtractionResult,
    ) -> Result<PhotoPurpose, SessionError> {
        let purpose = self.pending.ok_or(SessionError::InvalidTransition {
            action: "complete_photo_analysis",
            screen: self.screen,
        })?;

        match purpose {
            PhotoPurpose::Replace => {
                self.draft.replace_with(result);
                self.screen = Screen::ReviewEdit;
            }
            PhotoPurpose::Merge => {
                self.draft.merge_words(&result.words);
                self.photo_preview = None;
            }
        }
        self.is_analyzing = false;
        self.pending = None;
        Ok(purpose)
    }

    /// 解析失敗。プレビューを消して元の画面に留まる
    pub fn fail_photo_analysis(&mut self, message: impl Into<String>) -> SessionError {
        self.photo_preview = None;
        self.is_analyzing = false;
        self.pending = None;
        SessionError::GatewayCallFailed(message.into())
    }

    // =============================================
    // レビュー・編集
    // =============================================

    pub fn set_title(&mut self, title: impl Into<String>) -> Result<(), SessionError> {
        self.ensure("set_title", &[Screen::ReviewEdit])?;
        self.draft.title = title.into();
        Ok(())
    }

    pub fn edit_word(&mut self, index: usize, value: impl Into<String>) -> Result<(), SessionError> {
        self.ensure("edit_word", &[Screen::ReviewEdit])?;
        self.draft.edit_word(index, value)?;
        Ok(())
    }

    pub fn add_word(&mut self) -> Result<(), SessionError> {
        self.ensure("add_word", &[Screen::ReviewEdit])?;
        self.draft.add_blank_word();
        Ok(())
    }

    pub fn remove_word(&mut self, index: usize) -> Result<(), SessionError> {
        self.ensure("remove_word", &[Screen::ReviewEdit])?;
        self.draft.remove_word(index)?;
        Ok(())
    }

    /// レビューをやめる
    ///
    /// 写真モードはアップロード画面へ（次の写真は置換になる）。
    /// JSONモードは読み込んだグリッドへ戻る。
    pub fn cancel_review(&mut self) -> Result<(), SessionError> {
        self.ensure("cancel_review", &[Screen::ReviewEdit])?;
        self.ensure_idle()?;
        self.photo_preview = None;
        self.screen = match self.mode {
            Some(UploadMode::Json) => Screen::Grid,
            _ => Screen::PhotoUpload,
        };
        Ok(())
    }

    pub fn generate_grid(&mut self) -> Result<(), SessionError> {
        self.ensure("generate_grid", &[Screen::ReviewEdit])?;
        self.ensure_idle()?;
        if self.draft.is_empty() {
            return Err(SessionError::EmptyWordListOnGenerate);
        }
        self.photo_preview = None;
        self.screen = Screen::Grid;
        Ok(())
    }

    /// グリッドからレビュー画面へ戻って編集を続ける（JSON読み込み後の手直し用）
    pub fn edit_grid(&mut self) -> Result<(), SessionError> {
        self.ensure("edit_grid", &[Screen::Grid])?;
        self.screen = Screen::ReviewEdit;
        Ok(())
    }

    /// すべて初期状態に戻す
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}
