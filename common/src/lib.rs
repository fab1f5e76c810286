//! Circle Grid Common Library
//!
//! ゲートウェイ・CLI・Web(WASM)で共有される型とロジック

pub mod types;
pub mod error;
pub mod data_uri;
pub mod prompts;
pub mod parser;
pub mod draft;
pub mod import;
pub mod session;
pub mod grid;

pub use types::{ExtractionResult, UploadMode, WorksheetDraft};
pub use error::{Error, Result};
pub use data_uri::{parse_data_uri, to_data_uri, ImageDataUri, ImageEncoding};
pub use prompts::{PROMPT_VERSION, WORKSHEET_PROMPT};
pub use parser::{dedup_preserving_order, extract_json_object, parse_worksheet_reply, ParsedWorksheet};
pub use draft::DraftError;
pub use import::{parse_word_list, ImportError};
pub use session::{PhotoPurpose, Screen, Session, SessionError, MAX_PHOTO_BYTES};
pub use grid::{GridLayout, GRID_COLUMNS};
