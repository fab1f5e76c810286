//! 画像Data URIの検証
//!
//! `data:image/{jpeg|jpg|png|webp};base64,<payload>` のみ受理する。
//! 形式の判定は正規表現、本体はbase64としてデコードできることまで確認する。

use base64::{engine::general_purpose, Engine as _};
use regex::Regex;

use crate::error::{Error, Result};

/// 受理する画像エンコーディング
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageEncoding {
    Jpeg,
    Jpg,
    Png,
    Webp,
}

impl ImageEncoding {
    /// Data URI中のサブタイプ名から判定
    pub fn from_subtype(subtype: &str) -> Option<Self> {
        match subtype {
            "jpeg" => Some(ImageEncoding::Jpeg),
            "jpg" => Some(ImageEncoding::Jpg),
            "png" => Some(ImageEncoding::Png),
            "webp" => Some(ImageEncoding::Webp),
            _ => None,
        }
    }

    /// ファイル拡張子から判定（大文字小文字は無視）
    pub fn from_extension(ext: &str) -> Option<Self> {
        Self::from_subtype(&ext.to_ascii_lowercase())
    }

    /// 正規化されたメディアタイプ。jpg と jpeg は同じ `image/jpeg`
    pub fn media_type(&self) -> &'static str {
        match self {
            ImageEncoding::Jpeg | ImageEncoding::Jpg => "image/jpeg",
            ImageEncoding::Png => "image/png",
            ImageEncoding::Webp => "image/webp",
        }
    }

    pub fn subtype(&self) -> &'static str {
        match self {
            ImageEncoding::Jpeg => "jpeg",
            ImageEncoding::Jpg => "jpg",
            ImageEncoding::Png => "png",
            ImageEncoding::Webp => "webp",
        }
    }
}

/// 検証済みの画像Data URI
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageDataUri {
    pub encoding: ImageEncoding,
    /// base64本体（`base64,` 以降）
    pub data: String,
}

impl ImageDataUri {
    pub fn media_type(&self) -> &'static str {
        self.encoding.media_type()
    }

    /// デコード後のバイト数（概算ではなく実サイズ）
    pub fn decoded_len(&self) -> usize {
        let padding = self.data.bytes().rev().take_while(|b| *b == b'=').count();
        self.data.len() / 4 * 3 - padding
    }
}

lazy_static::lazy_static! {
    static ref DATA_URI_RE: Regex =
        Regex::new(r"^data:image/(jpeg|jpg|png|webp);base64,([A-Za-z0-9+/]+={0,2})$").unwrap();
}

/// Data URIをパース
///
/// # Errors
/// スキーム違い・未対応形式・`;base64,` 欠落・base64として不正な本体は
/// すべて `Error::InvalidFormat`
pub fn parse_data_uri(input: &str) -> Result<ImageDataUri> {
    let caps = DATA_URI_RE
        .captures(input)
        .ok_or_else(|| Error::InvalidFormat("Must be base64 encoded image".into()))?;

    let encoding = ImageEncoding::from_subtype(&caps[1])
        .ok_or_else(|| Error::InvalidFormat(format!("Unsupported image type: {}", &caps[1])))?;
    let data = &caps[2];

    general_purpose::STANDARD
        .decode(data)
        .map_err(|e| Error::InvalidFormat(format!("base64 decode error: {}", e)))?;

    Ok(ImageDataUri {
        encoding,
        data: data.to_string(),
    })
}

/// バイト列からData URIを組み立てる
pub fn to_data_uri(bytes: &[u8], encoding: ImageEncoding) -> String {
    format!(
        "data:image/{};base64,{}",
        encoding.subtype(),
        general_purpose::STANDARD.encode(bytes)
    )
}
