use crate::config::Config;
use crate::error::{CircleGridError, Result};
use crate::gateway::{extract, VisionModel};
use crate::scanner::PhotoFile;
use circle_grid_common::WorksheetDraft;
use tracing::warn;

/// 解析できなかった写真
#[derive(Debug)]
pub struct PhotoFailure {
    pub file_name: String,
    pub error: CircleGridError,
}

/// 複数写真の解析結果。失敗した写真があっても下書きは残る
#[derive(Debug)]
pub struct PhotoAnalysis {
    pub draft: WorksheetDraft,
    pub failures: Vec<PhotoFailure>,
}

/// 写真を順番に解析して1つの下書きにまとめる
///
/// 最初に成功した写真でタイトルと単語を置き換え、以降は新しい単語だけを追加する
/// （Web UIの「写真を追加」と同じ挙動）。途中の失敗はそれまでの下書きを消さない。
/// 1枚も成功しなければ最後のエラーを返す。
pub async fn analyze_photos(
    model: &dyn VisionModel,
    config: &Config,
    photos: &[PhotoFile],
    verbose: bool,
) -> Result<PhotoAnalysis> {
    let mut draft: Option<WorksheetDraft> = None;
    let mut failures = Vec::new();

    for (idx, photo) in photos.iter().enumerate() {
        if verbose {
            eprintln!("  写真 {}/{}: {}", idx + 1, photos.len(), photo.file_name);
        }

        let result = match analyze_one(model, config, photo).await {
            Ok(result) => result,
            Err(error) => {
                warn!(file = %photo.file_name, %error, "photo analysis failed");
                eprintln!("  ✗ {}: {}", photo.file_name, error);
                failures.push(PhotoFailure {
                    file_name: photo.file_name.clone(),
                    error,
                });
                continue;
            }
        };

        match draft.as_mut() {
            None => {
                let mut first = WorksheetDraft::default();
                first.replace_with(&result);
                if verbose {
                    eprintln!("    タイトル: {} / {}語", first.title, first.words.len());
                }
                draft = Some(first);
            }
            Some(draft) => {
                let added = draft.merge_words(&result.words);
                if verbose {
                    eprintln!("    {}語を追加", added);
                }
            }
        }
    }

    match draft {
        Some(draft) => Ok(PhotoAnalysis { draft, failures }),
        None => Err(failures
            .pop()
            .map(|f| f.error)
            .unwrap_or_else(|| CircleGridError::NoImagesFound("解析対象がありません".into()))),
    }
}

async fn analyze_one(
    model: &dyn VisionModel,
    config: &Config,
    photo: &PhotoFile,
) -> Result<circle_grid_common::ExtractionResult> {
    let data_uri = photo.to_data_uri()?;
    Ok(extract(model, config, Some(&data_uri)).await?)
}
