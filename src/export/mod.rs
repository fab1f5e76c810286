pub mod html;

use crate::cli::ExportFormat;
use crate::error::Result;
use circle_grid_common::WorksheetDraft;
use std::path::{Path, PathBuf};

const DEFAULT_STEM: &str = "word-grid";

/// Windowsでもファイル名に使えない文字
const RESERVED_CHARS: [char; 9] = ['/', '\\', ':', '*', '?', '"', '<', '>', '|'];

/// タイトルをファイル名に使う（使えない文字は `_` に置き換える）
fn file_stem(draft: &WorksheetDraft) -> String {
    let stem: String = draft
        .title
        .trim()
        .chars()
        .map(|c| if RESERVED_CHARS.contains(&c) || c.is_control() { '_' } else { c })
        .collect();
    // 末尾のドット・空白はWindowsで落とされる
    let stem = stem.trim_end_matches(['.', ' ']);

    if stem.is_empty() {
        DEFAULT_STEM.to_string()
    } else {
        stem.to_string()
    }
}

fn output_path_for_format(output: &Path, stem: &str, extension: &str) -> PathBuf {
    if output.is_dir() || output.extension().is_none() {
        output.join(format!("{}.{}", stem, extension))
    } else {
        output.with_extension(extension)
    }
}

/// 下書きを印刷用HTML / JSONに書き出す。書き出したパスを返す
pub fn export_draft(
    draft: &WorksheetDraft,
    format: &ExportFormat,
    output: &Path,
) -> Result<Vec<PathBuf>> {
    let stem = file_stem(draft);
    let stem = stem.as_str();
    let mut written = Vec::new();

    if matches!(format, ExportFormat::Html | ExportFormat::Both) {
        let path = output_path_for_format(output, stem, "html");
        println!("- グリッドHTMLを生成中...");
        std::fs::write(&path, html::render_grid_html(draft))?;
        println!("✔ HTML出力: {}", path.display());
        written.push(path);
    }

    if matches!(format, ExportFormat::Json | ExportFormat::Both) {
        let path = output_path_for_format(output, stem, "json");
        std::fs::write(&path, draft.to_json())?;
        println!("✔ JSON出力: {}", path.display());
        written.push(path);
    }

    Ok(written)
}
