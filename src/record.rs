//! 行データの型定義とトークン分割
//!
//! 1行 = `<image> <label>` の2トークン。

use std::fmt;

/// 入力ファイルの種別
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    Truth,
    Predictions,
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Side::Truth => write!(f, "truth"),
            Side::Predictions => write!(f, "predictions"),
        }
    }
}

/// 1行分のレコード（画像IDとラベル）
///
/// UTF-8として不正なバイト列も扱えるよう、比較はバイト単位で行う。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Record {
    pub image_id: Vec<u8>,
    pub label: Vec<u8>,
}

impl Record {
    /// 行を空白で分割してレコードにする
    ///
    /// トークン数がちょうど2でなければ `None`。
    /// 前後の空白と末尾の `\r` は無視される。
    ///
    /// # Examples
    /// ```
    /// use label_validator::record::Record;
    ///
    /// let record = Record::parse(b"img1.jpg  cat\r").unwrap();
    /// assert_eq!(record.image_id, b"img1.jpg");
    /// assert_eq!(record.label, b"cat");
    /// assert!(Record::parse(b"img1.jpg").is_none());
    /// ```
    pub fn parse(line: &[u8]) -> Option<Self> {
        let mut tokens = line.split(|&b| is_space(b)).filter(|t| !t.is_empty());
        let image_id = tokens.next()?;
        let label = tokens.next()?;
        if tokens.next().is_some() {
            return None;
        }

        Some(Self {
            image_id: image_id.to_vec(),
            label: label.to_vec(),
        })
    }

    pub fn image_id_lossy(&self) -> String {
        String::from_utf8_lossy(&self.image_id).into_owned()
    }

    pub fn label_lossy(&self) -> String {
        String::from_utf8_lossy(&self.label).into_owned()
    }
}

/// 表示用に行を文字列化する（改行コード除去、不正なUTF-8は置換文字）
pub fn display_line(line: &[u8]) -> String {
    let line = line.strip_suffix(b"\r").unwrap_or(line);
    String::from_utf8_lossy(line).into_owned()
}

// 垂直タブ・改ページも区切りとして扱う
fn is_space(b: u8) -> bool {
    matches!(b, b' ' | b'\t' | b'\n' | b'\r' | 0x0b | 0x0c)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_two_tokens() {
        let record = Record::parse(b"img1 cat").unwrap();
        assert_eq!(record.image_id, b"img1");
        assert_eq!(record.label, b"cat");
    }

    #[test]
    fn test_parse_tabs_and_padding() {
        let record = Record::parse(b"  img2\t\x0bdog  ").unwrap();
        assert_eq!(record.image_id, b"img2");
        assert_eq!(record.label, b"dog");
    }

    #[test]
    fn test_parse_rejects_wrong_token_count() {
        assert!(Record::parse(b"").is_none());
        assert!(Record::parse(b"   ").is_none());
        assert!(Record::parse(b"img1").is_none());
        assert!(Record::parse(b"img1 cat extra").is_none());
    }

    #[test]
    fn test_parse_latin1_label() {
        let record = Record::parse(b"img2 caf\xe9").unwrap();
        assert_eq!(record.label, b"caf\xe9");
        assert_eq!(record.label_lossy(), "caf\u{FFFD}");
    }

    #[test]
    fn test_display_line_strips_cr() {
        assert_eq!(display_line(b"img1 cat\r"), "img1 cat");
        assert_eq!(display_line(b"img1 caf\xe9"), "img1 caf\u{FFFD}");
    }

    #[test]
    fn test_side_display() {
        assert_eq!(Side::Truth.to_string(), "truth");
        assert_eq!(Side::Predictions.to_string(), "predictions");
    }
}
