use crate::cli::{Cli, MalformedPolicy, OutputFormat};
use crate::error::{Result, ValidatorError};
use crate::validator::Options;
use serde::Deserialize;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct Config {
    pub verbose: bool,
    pub on_malformed: MalformedPolicy,
    pub format: OutputFormat,
    pub per_label: bool,
}

impl Config {
    /// 既定の設定ファイルを読み込む。存在しなければデフォルト値
    pub fn load() -> Result<Self> {
        let config_path = Self::config_path()?;

        if config_path.exists() {
            Self::load_from(&config_path)
        } else {
            Ok(Self::default())
        }
    }

    /// 指定パスの設定ファイルを読み込む（存在しなければエラー）
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(ValidatorError::FileNotFound(path.display().to_string()));
        }

        let content = std::fs::read_to_string(path)?;
        let config: Config = serde_json::from_str(&content)?;
        Ok(config)
    }

    pub fn config_path() -> Result<PathBuf> {
        let home = dirs::home_dir()
            .ok_or_else(|| ValidatorError::Config("ホームディレクトリが見つかりません".into()))?;
        Ok(home.join(".config").join("label-validator").join("config.json"))
    }

    /// コマンドライン引数で上書きする
    ///
    /// フラグは有効化のみ、値付きオプションは指定された場合に置き換える。
    pub fn merge_cli(mut self, cli: &Cli) -> Self {
        self.verbose |= cli.verbose;
        self.per_label |= cli.per_label;
        if let Some(policy) = cli.on_malformed {
            self.on_malformed = policy;
        }
        if let Some(format) = cli.format {
            self.format = format;
        }
        self
    }

    pub fn validator_options(&self) -> Options {
        Options {
            verbose: self.verbose,
            on_malformed: self.on_malformed,
        }
    }
}
