use clap::Parser;
use serde::Deserialize;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "label-validator")]
#[command(
    about = "validate classification predictions line by line in format \"<image> <label>\"",
    long_about = None
)]
pub struct Cli {
    /// 正解ラベルファイル
    #[arg(long, required = true)]
    pub truth: PathBuf,

    /// 予測結果ファイル
    #[arg(long, required = true)]
    pub predictions: PathBuf,

    /// 一致しなかったラベルを報告
    #[arg(short, long)]
    pub verbose: bool,

    /// 不正な行の扱い (fatal/skip)
    #[arg(long)]
    pub on_malformed: Option<MalformedPolicy>,

    /// 出力形式 (text/json)
    #[arg(short, long)]
    pub format: Option<OutputFormat>,

    /// ラベルごとの内訳を出力
    #[arg(long)]
    pub per_label: bool,

    /// 設定ファイル（省略時は ~/.config/label-validator/config.json）
    #[arg(long)]
    pub config: Option<PathBuf>,
}

/// `<image> <label>` 形式でない行の扱い
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MalformedPolicy {
    /// エラーで終了
    #[default]
    Fatal,
    /// 警告を出して読み飛ばす
    Skip,
}

impl std::str::FromStr for MalformedPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "fatal" | "error" => Ok(MalformedPolicy::Fatal),
            "skip" | "warn" => Ok(MalformedPolicy::Skip),
            _ => Err(format!("Unknown policy: {}. Use fatal or skip", s)),
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

impl std::str::FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "text" | "txt" => Ok(OutputFormat::Text),
            "json" => Ok(OutputFormat::Json),
            _ => Err(format!("Unknown format: {}. Use text or json", s)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_required_flags() {
        let cli = Cli::try_parse_from([
            "label-validator",
            "--truth",
            "truth.txt",
            "--predictions",
            "pred.txt",
        ])
        .unwrap();
        assert_eq!(cli.truth, PathBuf::from("truth.txt"));
        assert_eq!(cli.predictions, PathBuf::from("pred.txt"));
        assert!(!cli.verbose);
        assert!(cli.on_malformed.is_none());
        assert!(cli.format.is_none());
    }

    #[test]
    fn test_missing_predictions_is_error() {
        let result = Cli::try_parse_from(["label-validator", "--truth", "truth.txt"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_optional_flags() {
        let cli = Cli::try_parse_from([
            "label-validator",
            "--truth",
            "t",
            "--predictions",
            "p",
            "--verbose",
            "--on-malformed",
            "skip",
            "--format",
            "JSON",
            "--per-label",
        ])
        .unwrap();
        assert!(cli.verbose);
        assert_eq!(cli.on_malformed, Some(MalformedPolicy::Skip));
        assert_eq!(cli.format, Some(OutputFormat::Json));
        assert!(cli.per_label);
    }

    #[test]
    fn test_unknown_policy() {
        assert!("lenient".parse::<MalformedPolicy>().is_err());
        assert_eq!("warn".parse::<MalformedPolicy>().unwrap(), MalformedPolicy::Skip);
    }
}
