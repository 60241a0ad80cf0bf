use crate::record::Side;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ValidatorError {
    #[error("設定エラー: {0}")]
    Config(String),

    #[error("ファイルが見つかりません: {0}")]
    FileNotFound(String),

    #[error("{side} ファイルが見つかりません: {path}")]
    InputNotFound { side: Side, path: String },

    #[error("{side} ファイルを開けません: {path}: {source}")]
    Open {
        side: Side,
        path: String,
        source: std::io::Error,
    },

    #[error("{side} {line}行目の読み込みに失敗: {source}")]
    Read {
        side: Side,
        line: usize,
        source: std::io::Error,
    },

    #[error("不正な行 ({side} {line}行目): {content:?} は \"<image> <label>\" 形式ではありません")]
    MalformedLine {
        side: Side,
        /// 1始まりの行番号
        line: usize,
        content: String,
    },

    #[error("比較可能な画像が0件のため精度を計算できません")]
    EmptyComparisonSet,

    #[error("JSON解析エラー: {0}")]
    JsonParse(#[from] serde_json::Error),

    #[error("IOエラー: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, ValidatorError>;
