//! 集計結果とその出力形式

use crate::error::{Result, ValidatorError};
use serde::Serialize;
use std::collections::BTreeMap;
use std::fmt::Write;

/// 正解ラベルごとの集計
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct LabelTally {
    pub matches: usize,
    pub total: usize,
}

impl LabelTally {
    pub fn record(&mut self, matched: bool) {
        self.total += 1;
        if matched {
            self.matches += 1;
        }
    }
}

/// 1回の照合結果
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Summary {
    pub matches: usize,
    pub total: usize,
    /// 比較件数が0なら `None`
    pub accuracy: Option<f64>,
    /// 行数不一致で途中終了したか
    pub truncated: bool,
    pub per_label: BTreeMap<String, LabelTally>,
}

impl Summary {
    pub fn new(
        matches: usize,
        total: usize,
        truncated: bool,
        per_label: BTreeMap<String, LabelTally>,
    ) -> Self {
        let accuracy = if total == 0 {
            None
        } else {
            Some(matches as f64 / total as f64)
        };

        Self {
            matches,
            total,
            accuracy,
            truncated,
            per_label,
        }
    }

    /// 精度を返す。比較件数0なら `EmptyComparisonSet`
    pub fn require_accuracy(&self) -> Result<f64> {
        self.accuracy.ok_or(ValidatorError::EmptyComparisonSet)
    }
}

/// 有効桁数12桁（C の `%.12g` 相当）で整形する
///
/// 整数になる場合は `.0` を付ける（`1.0`, `0.5`, `0.666666666667`）。
pub fn format_accuracy(accuracy: f64) -> String {
    let s = format_12g(accuracy);
    if s.bytes().all(|b| b.is_ascii_digit() || b == b'-') {
        format!("{}.0", s)
    } else {
        s
    }
}

const SIGNIFICANT_DIGITS: usize = 12;

fn format_12g(v: f64) -> String {
    if !v.is_finite() {
        return format!("{}", v);
    }
    if v == 0.0 {
        return "0".to_string();
    }

    let p = SIGNIFICANT_DIGITS;
    // 丸め後の指数で表記を決める（0.9999999999999 → 1 など）
    let sci = format!("{:.prec$e}", v, prec = p - 1);
    let (mantissa, exponent) = sci.split_once('e').unwrap_or((sci.as_str(), "0"));
    let exp: i32 = exponent.parse().unwrap_or(0);

    if exp < -4 || exp >= p as i32 {
        let mantissa = mantissa.trim_end_matches('0').trim_end_matches('.');
        let sign = if exp < 0 { '-' } else { '+' };
        format!("{}e{}{:02}", mantissa, sign, exp.abs())
    } else {
        let decimals = (p as i32 - 1 - exp).max(0) as usize;
        let fixed = format!("{:.prec$}", v, prec = decimals);
        if fixed.contains('.') {
            fixed.trim_end_matches('0').trim_end_matches('.').to_string()
        } else {
            fixed
        }
    }
}

/// テキスト形式のサマリ
///
/// 先頭に空行、続いて一致件数と精度の2行。
/// `per_label` 指定時はラベルごとの内訳を追加する。
pub fn render_text(summary: &Summary, per_label: bool) -> String {
    let mut out = String::new();
    out.push('\n');
    let _ = writeln!(
        out,
        "number of correct matches {} for {} images",
        summary.matches, summary.total
    );
    match summary.accuracy {
        Some(accuracy) => {
            let _ = writeln!(out, "accuracy {}", format_accuracy(accuracy));
        }
        None => out.push_str("accuracy undefined (no comparable images)\n"),
    }

    if per_label {
        for (label, tally) in &summary.per_label {
            let _ = writeln!(out, "  {}: {}/{}", label, tally.matches, tally.total);
        }
    }

    out
}

/// JSON形式のサマリ
pub fn render_json(summary: &Summary) -> Result<String> {
    Ok(serde_json::to_string_pretty(summary)?)
}
