//! 2つの行ストリームを同時に進めるイテレータ
//!
//! 片方だけが終端に達した場合は `TruthOnly` / `PredictionsOnly` を返す。
//! 呼び出し側はそこでループを打ち切る。
//! 読み込みエラーはどちらのファイルで起きたかを添えて返す。

use crate::record::Side;

/// 同じ行番号の2行の組
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LinePair<T> {
    Both(T, T),
    TruthOnly(T),
    PredictionsOnly(T),
}

pub struct Paired<A, B> {
    truth: A,
    predictions: B,
    done: bool,
}

impl<A, B> Paired<A, B> {
    pub fn new(truth: A, predictions: B) -> Self {
        Self {
            truth,
            predictions,
            done: false,
        }
    }
}

impl<A, B, T, E> Iterator for Paired<A, B>
where
    A: Iterator<Item = Result<T, E>>,
    B: Iterator<Item = Result<T, E>>,
{
    type Item = Result<LinePair<T>, (Side, E)>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }

        let truth = match self.truth.next().transpose() {
            Ok(t) => t,
            Err(e) => {
                self.done = true;
                return Some(Err((Side::Truth, e)));
            }
        };
        let predictions = match self.predictions.next().transpose() {
            Ok(p) => p,
            Err(e) => {
                self.done = true;
                return Some(Err((Side::Predictions, e)));
            }
        };

        let pair = match (truth, predictions) {
            (Some(t), Some(p)) => LinePair::Both(t, p),
            (Some(t), None) => LinePair::TruthOnly(t),
            (None, Some(p)) => LinePair::PredictionsOnly(p),
            (None, None) => {
                self.done = true;
                return None;
            }
        };

        // 長さ不一致は最初の1組だけ返して終了
        if !matches!(pair, LinePair::Both(..)) {
            self.done = true;
        }

        Some(Ok(pair))
    }
}
