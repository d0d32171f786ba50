//! Terminal rendering of the run report

use super::{FeatureImportanceChart, ReportSink, StageEvent};
use crate::error::Result;
use crate::evaluation::{ConfusionMatrix, RocCurve};
use colored::*;
use std::io::{self, Write};

// ─── Styling helpers ───────────────────────────────────────────────────────────

fn dim(s: &str) -> ColoredString    { s.truecolor(100, 100, 100) }
fn accent(s: &str) -> ColoredString { s.truecolor(120, 170, 255) }
fn muted(s: &str) -> ColoredString  { s.truecolor(140, 140, 140) }
fn ok(s: &str) -> ColoredString     { s.truecolor(100, 210, 120) }

const SHADES: [char; 5] = [' ', '░', '▒', '▓', '█'];
const ROC_WIDTH: usize = 41;
const ROC_HEIGHT: usize = 17;
const BAR_WIDTH: usize = 40;
const MAX_ROC_ROWS: usize = 12;

/// Writes the run report as styled text
pub struct TerminalReporter<W: Write> {
    out: W,
}

impl TerminalReporter<io::Stdout> {
    /// Reporter on standard output
    pub fn stdout() -> Self {
        Self::new(io::stdout())
    }
}

impl<W: Write> TerminalReporter<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    /// Recover the underlying writer
    pub fn into_inner(self) -> W {
        self.out
    }

    fn section(&mut self, title: &str) -> io::Result<()> {
        writeln!(self.out)?;
        writeln!(self.out, "  {}", title.white().bold())?;
        writeln!(self.out, "  {}", dim(&"─".repeat(56)))
    }

    fn step_ok(&mut self, msg: &str) -> io::Result<()> {
        writeln!(self.out, "  {} {}", ok("✓"), msg)
    }

    fn note(&mut self, msg: &str) -> io::Result<()> {
        writeln!(self.out, "    {}", muted(msg))
    }

    fn warning(&mut self, msg: &str) -> io::Result<()> {
        writeln!(self.out, "  {} {}", "!".yellow().bold(), msg.yellow())
    }

    fn block(&mut self, lines: &[String]) -> io::Result<()> {
        for line in lines {
            writeln!(self.out, "  {}", line)?;
        }
        Ok(())
    }

    fn metric(&mut self, name: &str, value: f64) -> io::Result<()> {
        writeln!(
            self.out,
            "  {:<16} {}",
            muted(name),
            format!("{:.4}", value).white().bold()
        )
    }
}

impl<W: Write> ReportSink for TerminalReporter<W> {
    fn stage(&mut self, event: &StageEvent) -> Result<()> {
        match event {
            StageEvent::Loaded { rows, columns, preview, elapsed } => {
                self.section("Load")?;
                self.step_ok(&format!(
                    "{} rows × {} cols in {:?}",
                    rows,
                    columns.len(),
                    elapsed
                ))?;
                self.note(&format!("columns: {}", columns.join(", ")))?;
                writeln!(self.out)?;
                writeln!(self.out, "{}", preview)?;
            }
            StageEvent::Cleaned { rows, columns, dropped } => {
                self.section("Prepare")?;
                self.step_ok(&format!(
                    "Dropped {} incomplete rows → {} rows × {} cols",
                    dropped, rows, columns
                ))?;
            }
            StageEvent::Encoded { columns } => {
                self.step_ok(&format!("Label encoded {} columns", columns.len()))?;
                for col in columns {
                    self.note(&format!("{} ({} classes)", col.name, col.n_classes))?;
                }
            }
            StageEvent::HeadersNormalized { columns } => {
                self.step_ok("Normalized column names")?;
                self.note(&columns.join(", "))?;
            }
            StageEvent::Scaled { rows, features } => {
                self.step_ok(&format!(
                    "Standardized {} features over {} rows",
                    features, rows
                ))?;
            }
            StageEvent::Split { train, test } => {
                self.section("Train")?;
                self.step_ok(&format!(
                    "Train {} × {}   Test {} × {}",
                    train.0, train.1, test.0, test.1
                ))?;
            }
            StageEvent::Trained { n_trees, degenerate, elapsed } => {
                self.step_ok(&format!(
                    "Fitted {} in {:?}",
                    accent(&format!("random forest ({} trees)", n_trees)),
                    elapsed
                ))?;
                if *degenerate {
                    self.warning("Training labels hold a single class; scores set to zero")?;
                }
            }
            StageEvent::Evaluated { metrics, report } => {
                self.section("Evaluate")?;
                self.metric("Accuracy", metrics.accuracy)?;
                self.metric("Precision", metrics.precision)?;
                self.metric("Recall", metrics.recall)?;
                self.metric("F1 Score", metrics.f1_score)?;
                self.metric("ROC-AUC Score", metrics.roc_auc)?;
                writeln!(self.out)?;
                writeln!(self.out, "{}", muted("Classification Report:"))?;
                write!(self.out, "{}", report)?;
            }
        }
        Ok(())
    }

    fn confusion_matrix(&mut self, matrix: &ConfusionMatrix) -> Result<()> {
        self.section("Confusion Matrix")?;
        self.block(&render_confusion_matrix(matrix))?;
        writeln!(self.out)?;
        self.note(&format!("counts (rows actual, columns predicted): {}", matrix.counts()))?;
        Ok(())
    }

    fn roc_curve(&mut self, curve: &RocCurve, auc: f64) -> Result<()> {
        self.section("ROC Curve")?;
        self.block(&render_roc_curve(curve, auc, ROC_WIDTH, ROC_HEIGHT))?;
        writeln!(self.out)?;

        self.note(&format!("{:>10} {:>10} {:>12}", "fpr", "tpr", "threshold"))?;
        for k in sample_positions(curve.len(), MAX_ROC_ROWS) {
            self.note(&format!(
                "{:>10.4} {:>10.4} {:>12.4}",
                curve.fpr[k], curve.tpr[k], curve.thresholds[k]
            ))?;
        }
        if curve.len() > MAX_ROC_ROWS {
            self.note(&format!("… {} points in total", curve.len()))?;
        }
        Ok(())
    }

    fn feature_importance(&mut self, chart: &FeatureImportanceChart) -> Result<()> {
        self.section("Feature Importance")?;
        if let FeatureImportanceChart::Empty { warning } = chart {
            self.warning(warning)?;
        }
        self.block(&render_feature_importance(chart, BAR_WIDTH))?;
        self.out.flush()?;
        Ok(())
    }
}

/// Up to `max` evenly spaced indices into `0..len`, both ends included
fn sample_positions(len: usize, max: usize) -> Vec<usize> {
    if len <= max {
        return (0..len).collect();
    }
    if max < 2 {
        return (0..max).collect();
    }
    let mut positions: Vec<usize> = (0..max)
        .map(|k| k * (len - 1) / (max - 1))
        .collect();
    positions.dedup();
    positions
}

fn shade(count: usize, max: usize) -> char {
    if max == 0 {
        return SHADES[0];
    }
    SHADES[(count * 4 + max / 2) / max]
}

/// Confusion matrix as a shaded grid; rows actual, columns predicted
pub fn render_confusion_matrix(matrix: &ConfusionMatrix) -> Vec<String> {
    let labels: Vec<String> = matrix.labels().iter().map(f64::to_string).collect();
    let counts = matrix.counts();
    let max = counts.iter().copied().max().unwrap_or(0);

    let num_w = counts
        .iter()
        .map(|c| c.to_string().len())
        .chain(labels.iter().map(String::len))
        .max()
        .unwrap_or(1);
    let cell_w = num_w + 4;
    let label_w = labels.iter().map(String::len).max().unwrap_or(1);
    let prefix_w = "Actual".len() + 1 + label_w;

    let header = labels
        .iter()
        .map(|l| format!("{:>cell_w$}", l))
        .collect::<Vec<_>>()
        .join(" ");

    let mut lines = vec![
        format!("{:prefix_w$}   {}", "", "Predicted"),
        format!("{:prefix_w$}   {}", "", header),
    ];

    for (i, label) in labels.iter().enumerate() {
        let axis = if i == 0 { "Actual" } else { "" };
        let cells = (0..labels.len())
            .map(|j| {
                let count = counts[[i, j]];
                let s = shade(count, max);
                format!("{s}{s}{s} {:>num_w$}", count)
            })
            .collect::<Vec<_>>()
            .join(" ");
        lines.push(format!("{:<6} {:>label_w$} │ {}", axis, label, cells));
    }

    lines
}

/// ROC curve on a character grid with the chance diagonal.
///
/// An undefined curve (NaN rates) draws only the diagonal.
pub fn render_roc_curve(curve: &RocCurve, auc: f64, width: usize, height: usize) -> Vec<String> {
    let width = width.max(8);
    let height = height.max(3);
    let mut grid = vec![vec![' '; width]; height];

    let col_of = |x: f64| ((x * (width - 1) as f64).round() as usize).min(width - 1);
    let row_of = |y: f64| height - 1 - ((y * (height - 1) as f64).round() as usize).min(height - 1);

    for c in 0..width {
        let x = c as f64 / (width - 1) as f64;
        grid[row_of(x)][c] = '·';
    }

    let defined = curve
        .fpr
        .iter()
        .chain(curve.tpr.iter())
        .all(|v| v.is_finite());

    if defined {
        let steps = 2 * width.max(height);
        for k in 1..curve.len() {
            let (x0, y0) = (curve.fpr[k - 1], curve.tpr[k - 1]);
            let (x1, y1) = (curve.fpr[k], curve.tpr[k]);
            for s in 0..=steps {
                let t = s as f64 / steps as f64;
                let x = x0 + (x1 - x0) * t;
                let y = y0 + (y1 - y0) * t;
                grid[row_of(y)][col_of(x)] = '●';
            }
        }
    }

    let mut lines = vec!["True Positive Rate".to_string()];
    for (r, row) in grid.iter().enumerate() {
        let tick = if r == 0 {
            "1.0"
        } else if r == height / 2 {
            "0.5"
        } else if r == height - 1 {
            "0.0"
        } else {
            ""
        };
        let axis = if tick.is_empty() { '│' } else { '┤' };
        lines.push(format!("{:>4} {}{}", tick, axis, row.iter().collect::<String>()));
    }
    lines.push(format!("{:>4} └{}", "", "─".repeat(width)));

    let half = width / 2;
    lines.push(format!(
        "{:>5}{:<half$}{:<w2$}{}",
        "",
        "0.0",
        "0.5",
        "1.0",
        w2 = width - half - 2
    ));
    lines.push(format!("{:>5}{:^width$}", "", "False Positive Rate"));

    let legend = if defined {
        format!("● ROC curve (AUC = {:.2})   · chance", auc)
    } else {
        format!("ROC curve undefined (AUC = {:.2})   · chance", auc)
    };
    lines.push(String::new());
    lines.push(legend);
    lines
}

/// Horizontal bars, longest first, scaled to `bar_width` characters
pub fn render_feature_importance(chart: &FeatureImportanceChart, bar_width: usize) -> Vec<String> {
    match chart {
        FeatureImportanceChart::Ranked(bars) => {
            let name_w = bars
                .iter()
                .map(|(name, _)| name.chars().count())
                .chain(std::iter::once("Feature".len()))
                .max()
                .unwrap_or(0);
            let max = bars.first().map_or(0.0, |(_, v)| *v);

            let mut lines = vec![
                format!("{:<name_w$}  {}", "Feature", "Importance"),
                format!("{:<name_w$}  {}", "", "─".repeat(bar_width + 7)),
            ];
            for (name, value) in bars {
                let len = if max > 0.0 {
                    ((value / max) * bar_width as f64).round() as usize
                } else {
                    0
                };
                lines.push(format!(
                    "{:<name_w$}  {:<bar_width$} {:.4}",
                    name,
                    "█".repeat(len),
                    value
                ));
            }
            lines
        }
        FeatureImportanceChart::Empty { warning } => vec![
            format!("{}  {}", "Feature", "Importance"),
            format!("{:7}  {}", "", "─".repeat(bar_width + 7)),
            format!("{:7}  ({})", "", warning),
        ],
    }
}
