use std::path::PathBuf;

use enum_display::EnumDisplay;

use macros::DomainPrimitive;

use crate::{DomainError, DomainResult};

/// 日記の画像の形式
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumDisplay)]
#[enum_display(case = "Lower")]
pub enum ImageFormat {
    Png,
    Jpeg,
}

impl ImageFormat {
    /// 画像ファイルの拡張子を返す。
    pub fn extension(self) -> &'static str {
        match self {
            ImageFormat::Png => "png",
            ImageFormat::Jpeg => "jpg",
        }
    }
}

/// 日記の画像のデータ
#[derive(Debug, Clone)]
pub struct ImageData {
    /// 画像の形式
    pub format: ImageFormat,
    /// 画像のバイト列
    pub bytes: Vec<u8>,
}

impl ImageData {
    /// 日記の画像のデータを構築する。
    ///
    /// 画像のバイト列は空であってはならない。
    pub fn new(format: ImageFormat, bytes: Vec<u8>) -> DomainResult<Self> {
        if bytes.is_empty() {
            return Err(DomainError::validation().with_message("画像のデータが空です。"));
        }

        Ok(Self { format, bytes })
    }
}

/// キャッシュ領域に保存した日記の画像のパス
///
/// 日記を登録するまでの間、画像はキャッシュ領域に保存する。
#[derive(Debug, Clone, PartialEq, Eq, Hash, DomainPrimitive)]
pub struct CachedImagePath {
    #[value_getter(ret = "ref", rty = "&std::path::Path")]
    value: PathBuf,
}

impl CachedImagePath {
    pub fn new(value: PathBuf) -> Self {
        Self { value }
    }
}

/// 保存領域に保存した日記の画像のパス
///
/// 日記を登録するとき、画像はキャッシュ領域から保存領域に移動する。
#[derive(Debug, Clone, PartialEq, Eq, Hash, DomainPrimitive)]
pub struct StoredImagePath {
    #[value_getter(ret = "ref", rty = "&std::path::Path")]
    value: PathBuf,
}

impl StoredImagePath {
    pub fn new(value: PathBuf) -> Self {
        Self { value }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// 空でないバイト列から画像のデータを構築できることを確認
    #[test]
    fn image_data_can_be_constructed_from_non_empty_bytes() {
        let data = ImageData::new(ImageFormat::Png, vec![0x89, 0x50, 0x4e, 0x47]);

        assert!(data.is_ok());
    }

    /// 空のバイト列から画像のデータを構築できないことを確認
    #[test]
    fn image_data_can_not_be_constructed_from_empty_bytes() {
        let data = ImageData::new(ImageFormat::Jpeg, vec![]);

        assert!(data.is_err());
    }

    /// 画像の形式から拡張子を取得できることを確認
    #[test]
    fn image_format_extension_works() {
        assert_eq!("png", ImageFormat::Png.extension());
        assert_eq!("jpg", ImageFormat::Jpeg.extension());
    }
}
