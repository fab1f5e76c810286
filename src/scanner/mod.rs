use crate::error::{CircleGridError, Result};
use circle_grid_common::{to_data_uri, ImageEncoding, MAX_PHOTO_BYTES};
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// ワークシート写真1枚
#[derive(Debug, Clone)]
pub struct PhotoFile {
    pub path: PathBuf,
    pub file_name: String,
    pub encoding: ImageEncoding,
    pub size: u64,
}

impl PhotoFile {
    pub fn from_path(path: &Path) -> Result<Self> {
        if !path.is_file() {
            return Err(CircleGridError::FileNotFound(path.display().to_string()));
        }

        let encoding = path
            .extension()
            .and_then(|ext| ImageEncoding::from_extension(&ext.to_string_lossy()))
            .ok_or_else(|| CircleGridError::UnsupportedImage(path.display().to_string()))?;

        let size = std::fs::metadata(path)?.len();
        let file_name = path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_default();

        Ok(Self {
            path: path.to_path_buf(),
            file_name,
            encoding,
            size,
        })
    }

    /// 5MB上限を確認してData URIに変換
    pub fn to_data_uri(&self) -> Result<String> {
        if self.size > MAX_PHOTO_BYTES {
            return Err(CircleGridError::ImageTooLarge(format!(
                "{} ({} bytes)",
                self.file_name, self.size
            )));
        }
        let bytes = std::fs::read(&self.path)?;
        Ok(to_data_uri(&bytes, self.encoding))
    }
}

/// ファイル・フォルダの混在リストから写真を集める
///
/// フォルダは直下のみ、ファイル名順。ファイル指定は指定順のまま。
pub fn collect_photos(paths: &[PathBuf]) -> Result<Vec<PhotoFile>> {
    let mut photos = Vec::new();
    for path in paths {
        if path.is_dir() {
            photos.extend(scan_folder(path)?);
        } else {
            photos.push(PhotoFile::from_path(path)?);
        }
    }
    Ok(photos)
}

pub fn scan_folder(folder: &Path) -> Result<Vec<PhotoFile>> {
    if !folder.exists() {
        return Err(CircleGridError::FileNotFound(folder.display().to_string()));
    }

    let mut photos: Vec<PhotoFile> = WalkDir::new(folder)
        .max_depth(1)  // 直下のみ（再帰しない）
        .into_iter()
        .filter_map(|e| e.ok())
        .filter(|e| e.path().is_file())
        .filter_map(|e| PhotoFile::from_path(e.path()).ok())
        .collect();

    photos.sort_by(|a, b| a.file_name.cmp(&b.file_name));

    Ok(photos)
}
