//! 正解ファイルと予測ファイルの照合
//!
//! 2ファイルを行番号で対応付けて1パスで走査し、
//! 一致件数・比較件数をローカルに集計して `Summary` として返す。

use crate::cli::MalformedPolicy;
use crate::error::{Result, ValidatorError};
use crate::paired::{LinePair, Paired};
use crate::record::{display_line, Record, Side};
use crate::report::{LabelTally, Summary};
use std::collections::BTreeMap;
use std::fmt;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

/// 照合オプション
#[derive(Debug, Clone, Default)]
pub struct Options {
    /// ラベル不一致を1件ずつ報告する
    pub verbose: bool,
    pub on_malformed: MalformedPolicy,
}

/// 走査中に報告する事象
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Diagnostic {
    /// 行数が一致しない。これ以降は読まない
    AlignmentBroken {
        line: usize,
        truth: Option<String>,
        predictions: Option<String>,
    },
    /// 同じ行で画像IDが異なる。この行は集計から除外
    ImageMismatch {
        line: usize,
        truth_image: String,
        predicted_image: String,
    },
    /// 画像IDは一致、ラベルが異なる（verbose時のみ）
    LabelMismatch {
        image: String,
        truth_label: String,
        predicted_label: String,
    },
    /// `MalformedPolicy::Skip` で読み飛ばした行
    MalformedSkipped {
        side: Side,
        line: usize,
        content: String,
    },
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Diagnostic::AlignmentBroken { line, truth, predictions } => write!(
                f,
                "mismatch for line {}: truth {} / predictions {} - skipping",
                line,
                truth.as_deref().unwrap_or("<missing>"),
                predictions.as_deref().unwrap_or("<missing>"),
            ),
            Diagnostic::ImageMismatch { truth_image, predicted_image, .. } => write!(
                f,
                "image mismatch, please check that files are aligned {} {}",
                truth_image, predicted_image
            ),
            Diagnostic::LabelMismatch { image, truth_label, predicted_label } => write!(
                f,
                "label mismatch for {} : {} {}",
                image, truth_label, predicted_label
            ),
            Diagnostic::MalformedSkipped { side, line, content } => write!(
                f,
                "skipping malformed line {} in {}: {:?}",
                line, side, content
            ),
        }
    }
}

/// ファイルパスを開いて照合する
pub fn validate_files<F>(
    truth_path: &Path,
    predictions_path: &Path,
    options: &Options,
    sink: F,
) -> Result<Summary>
where
    F: FnMut(&Diagnostic),
{
    let truth = open(truth_path, Side::Truth)?;
    let predictions = open(predictions_path, Side::Predictions)?;
    validate_readers(truth, predictions, options, sink)
}

fn open(path: &Path, side: Side) -> Result<BufReader<File>> {
    if !path.exists() {
        return Err(ValidatorError::InputNotFound {
            side,
            path: path.display().to_string(),
        });
    }
    let file = File::open(path).map_err(|source| ValidatorError::Open {
        side,
        path: path.display().to_string(),
        source,
    })?;
    Ok(BufReader::new(file))
}

/// 2つのリーダーを行単位で照合する
///
/// 行はバイト列のまま読み、UTF-8として不正な入力もバイト単位で比較する。
/// 診断は発生順に `sink` へ渡される。
/// 行数不一致は最初の不一致行で打ち切り、それまでの集計を返す。
/// 比較件数が0でもエラーにはせず、`Summary::accuracy` が `None` になる。
pub fn validate_readers<T, P, F>(
    truth: T,
    predictions: P,
    options: &Options,
    mut sink: F,
) -> Result<Summary>
where
    T: BufRead,
    P: BufRead,
    F: FnMut(&Diagnostic),
{
    let mut nb_matches = 0usize;
    let mut nb_total = 0usize;
    let mut per_label: BTreeMap<String, LabelTally> = BTreeMap::new();
    let mut truncated = false;

    let pairs = Paired::new(truth.split(b'\n'), predictions.split(b'\n'));
    for (index, pair) in pairs.enumerate() {
        let line = index + 1;

        let pair = pair.map_err(|(side, source)| ValidatorError::Read { side, line, source })?;
        let (t, p) = match pair {
            LinePair::Both(t, p) => (t, p),
            LinePair::TruthOnly(t) => {
                sink(&Diagnostic::AlignmentBroken {
                    line,
                    truth: Some(display_line(&t)),
                    predictions: None,
                });
                truncated = true;
                break;
            }
            LinePair::PredictionsOnly(p) => {
                sink(&Diagnostic::AlignmentBroken {
                    line,
                    truth: None,
                    predictions: Some(display_line(&p)),
                });
                truncated = true;
                break;
            }
        };

        // 両側とも先にパースし、読み飛ばす行はすべて報告する
        let truth_record = parse_line(&t, Side::Truth, line, options, &mut sink)?;
        let predicted = parse_line(&p, Side::Predictions, line, options, &mut sink)?;
        let (Some(truth_record), Some(predicted)) = (truth_record, predicted) else {
            continue;
        };

        if truth_record.image_id != predicted.image_id {
            sink(&Diagnostic::ImageMismatch {
                line,
                truth_image: truth_record.image_id_lossy(),
                predicted_image: predicted.image_id_lossy(),
            });
            continue;
        }

        let matched = truth_record.label == predicted.label;
        nb_total += 1;
        if matched {
            nb_matches += 1;
        }
        per_label
            .entry(truth_record.label_lossy())
            .or_default()
            .record(matched);

        if options.verbose && !matched {
            sink(&Diagnostic::LabelMismatch {
                image: truth_record.image_id_lossy(),
                truth_label: truth_record.label_lossy(),
                predicted_label: predicted.label_lossy(),
            });
        }
    }

    Ok(Summary::new(nb_matches, nb_total, truncated, per_label))
}

/// 1行をパースする。Skipポリシーで読み飛ばした場合は `Ok(None)`
fn parse_line<F>(
    content: &[u8],
    side: Side,
    line: usize,
    options: &Options,
    sink: &mut F,
) -> Result<Option<Record>>
where
    F: FnMut(&Diagnostic),
{
    if let Some(record) = Record::parse(content) {
        return Ok(Some(record));
    }

    match options.on_malformed {
        MalformedPolicy::Fatal => Err(ValidatorError::MalformedLine {
            side,
            line,
            content: display_line(content),
        }),
        MalformedPolicy::Skip => {
            sink(&Diagnostic::MalformedSkipped {
                side,
                line,
                content: display_line(content),
            });
            Ok(None)
        }
    }
}
