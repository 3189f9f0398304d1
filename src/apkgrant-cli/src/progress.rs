//! In-place textual progress bar.

use std::io::{self, Write};

/// Number of cells in the bar.
pub const BAR_WIDTH: usize = 60;

/// Render `[=====-----] 50.0% ...<suffix>\r`.
///
/// Returns `None` when `total` is zero.
pub fn render_progress(count: usize, total: usize, suffix: &str) -> Option<String> {
    if total == 0 {
        return None;
    }

    let (count, total) = (count as f64, total as f64);
    let filled = ((BAR_WIDTH as f64 * count / total).round_ties_even() as usize).min(BAR_WIDTH);
    let percent = 100.0 * count / total;

    Some(format!(
        "[{}{}] {:.1}% ...{}\r",
        "=".repeat(filled),
        "-".repeat(BAR_WIDTH - filled),
        percent,
        suffix
    ))
}

/// Redraws the bar on the same line after each completed package.
#[derive(Debug, Clone, Copy)]
pub struct ProgressReporter {
    total: usize,
}

impl ProgressReporter {
    pub fn new(total: usize) -> Self {
        Self { total }
    }

    pub fn update<W: Write>(&self, out: &mut W, count: usize) -> io::Result<()> {
        if let Some(line) = render_progress(count, self.total, "") {
            out.write_all(line.as_bytes())?;
            out.flush()?;
        }
        Ok(())
    }

    /// Move past the bar so following output starts on a fresh line.
    pub fn finish<W: Write>(&self, out: &mut W) -> io::Result<()> {
        if self.total > 0 {
            writeln!(out)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_half_way() {
        let line = render_progress(1, 2, "").unwrap();
        assert_eq!(
            line,
            format!("[{}{}] 50.0% ...\r", "=".repeat(30), "-".repeat(30))
        );
    }

    #[test]
    fn test_complete() {
        let line = render_progress(3, 3, "").unwrap();
        assert_eq!(line, format!("[{}] 100.0% ...\r", "=".repeat(60)));
    }

    #[test]
    fn test_start_and_suffix() {
        let line = render_progress(0, 7, "com.a").unwrap();
        assert_eq!(line, format!("[{}] 0.0% ...com.a\r", "-".repeat(60)));
    }

    #[test]
    fn test_rounding() {
        // 60 / 3 = 20 cells, 33.333..% shown with one decimal.
        let line = render_progress(1, 3, "").unwrap();
        assert!(line.starts_with(&format!("[{}{}]", "=".repeat(20), "-".repeat(40))));
        assert!(line.contains(" 33.3% "));
    }

    #[test]
    fn test_half_cells_round_to_even() {
        // 60 * 3 / 8 = 22.5 cells, 60 * 5 / 8 = 37.5 cells.
        let line = render_progress(3, 8, "").unwrap();
        assert!(line.starts_with(&format!("[{}{}]", "=".repeat(22), "-".repeat(38))));
        let line = render_progress(5, 8, "").unwrap();
        assert!(line.starts_with(&format!("[{}{}]", "=".repeat(38), "-".repeat(22))));
    }

    #[test]
    fn test_bar_always_sixty_cells() {
        for total in 1..=13 {
            for count in 0..=total {
                let line = render_progress(count, total, "").unwrap();
                let bar = &line[1..=BAR_WIDTH];
                assert_eq!(bar.len(), BAR_WIDTH);
                assert_eq!(&line[BAR_WIDTH + 1..BAR_WIDTH + 2], "]");
            }
        }
    }

    #[test]
    fn test_zero_total_renders_nothing() {
        assert!(render_progress(0, 0, "").is_none());

        let mut out = Vec::new();
        let reporter = ProgressReporter::new(0);
        reporter.update(&mut out, 0).unwrap();
        reporter.finish(&mut out).unwrap();
        assert!(out.is_empty());
    }

    #[test]
    fn test_update_overwrites_in_place() {
        let mut out = Vec::new();
        let reporter = ProgressReporter::new(2);
        reporter.update(&mut out, 1).unwrap();
        reporter.update(&mut out, 2).unwrap();

        let text = String::from_utf8(out).unwrap();
        assert_eq!(text.matches('\r').count(), 2);
        assert!(!text.contains('\n'));
    }
}
