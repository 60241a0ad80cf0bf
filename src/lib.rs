//! 画像分類の予測結果を正解ラベルと照合するライブラリ
//!
//! 正解ファイルと予測ファイル（どちらも1行 `<image> <label>`）を
//! 行番号で対応付けて比較し、一致件数と精度を集計する。

pub mod cli;
pub mod config;
pub mod error;
pub mod paired;
pub mod record;
pub mod report;
pub mod validator;
