use crate::error::{Error, Result};
use crate::solver::SolveReport;
use std::fs;
use std::path::Path;

/// Reads a batch file of puzzles, one digit string per line.
///
/// Line endings are stripped and blank lines are skipped. The digit strings
/// themselves are not validated here; that happens when each one is solved.
pub fn read_puzzle_file(path: &Path) -> Result<Vec<String>> {
    let content = fs::read_to_string(path).map_err(|source| Error::Io {
        operation: format!("read puzzle file {}", path.display()),
        source,
    })?;
    Ok(parse_puzzle_lines(&content))
}

/// Splits the contents of a batch file into digit strings.
///
/// # Examples
/// ```
/// use eight_puzzle::utils::parse_puzzle_lines;
///
/// let lines = parse_puzzle_lines("102345678\n\n312475680\r\n");
/// assert_eq!(lines, vec!["102345678", "312475680"]);
/// ```
pub fn parse_puzzle_lines(content: &str) -> Vec<String> {
    content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect()
}

/// Running totals over a batch of solved puzzles.
///
/// Only solved puzzles contribute to the move and tested-state totals.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct BatchSummary {
    pub attempted: usize,
    pub solved: usize,
    pub total_moves: usize,
    pub total_tested: usize,
}

impl BatchSummary {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, report: &SolveReport) {
        self.attempted += 1;
        if let Some(solution) = &report.solution {
            self.solved += 1;
            self.total_moves += solution.num_moves();
            self.total_tested += report.num_tested;
        }
    }

    /// Average solution length, `None` until something has been solved.
    pub fn average_moves(&self) -> Option<f64> {
        (self.solved > 0).then(|| self.total_moves as f64 / self.solved as f64)
    }

    /// Average number of states tested per solved puzzle.
    pub fn average_tested(&self) -> Option<f64> {
        (self.solved > 0).then(|| self.total_tested as f64 / self.solved as f64)
    }

    /// The closing `averages: ...` line of a batch run, `None` if nothing was solved.
    ///
    /// Whole averages keep their `.0`.
    pub fn averages_line(&self) -> Option<String> {
        let moves = self.average_moves()?;
        let tested = self.average_tested()?;
        Some(format!("averages: {:?} moves, {:?} states tested", moves, tested))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::searcher::SearchStatus;
    use crate::solver::{solve, SearchParam};
    use std::env;
    use std::process;

    #[test]
    fn test_parse_puzzle_lines_strips_line_endings() {
        let lines = parse_puzzle_lines("012345678\r\n  102345678 \n\n\n");
        assert_eq!(lines, vec!["012345678", "102345678"]);
        assert!(parse_puzzle_lines("").is_empty());
    }

    #[test]
    fn test_read_puzzle_file() {
        let path = env::temp_dir().join(format!("eight_puzzle_batch_{}.txt", process::id()));
        fs::write(&path, "102345678\n312475680\n").unwrap();
        let lines = read_puzzle_file(&path).unwrap();
        fs::remove_file(&path).unwrap();
        assert_eq!(lines, vec!["102345678", "312475680"]);
    }

    #[test]
    fn test_read_missing_file_is_io_error() {
        let path = env::temp_dir().join("eight_puzzle_no_such_file.txt");
        let err = read_puzzle_file(&path).unwrap_err();
        assert!(matches!(err, Error::Io { .. }));
        assert!(err.to_string().contains("read puzzle file"));
    }

    #[test]
    fn test_batch_summary_averages_over_solved_only() {
        let mut summary = BatchSummary::new();
        assert_eq!(summary.average_moves(), None);

        for digits in ["102345678", "312475680"] {
            let report = solve(digits, "BFS", Some(SearchParam::DepthLimit(-1))).unwrap();
            summary.record(&report);
        }
        let unsolved = solve("312475680", "BFS", Some(SearchParam::DepthLimit(2))).unwrap();
        assert_eq!(unsolved.status, SearchStatus::Exhausted);
        summary.record(&unsolved);

        assert_eq!(summary.attempted, 3);
        assert_eq!(summary.solved, 2);
        assert_eq!(summary.total_moves, 5);
        assert_eq!(summary.total_tested, 3 + 26);
        assert_eq!(summary.average_moves(), Some(2.5));
        assert_eq!(summary.average_tested(), Some(14.5));
        assert_eq!(
            summary.averages_line().as_deref(),
            Some("averages: 2.5 moves, 14.5 states tested")
        );
    }

    #[test]
    fn test_averages_line_keeps_fraction_for_whole_numbers() {
        let mut summary = BatchSummary::new();
        assert_eq!(summary.averages_line(), None);

        for _ in 0..2 {
            let report = solve("102345678", "BFS", Some(SearchParam::DepthLimit(-1))).unwrap();
            summary.record(&report);
        }
        assert_eq!(
            summary.averages_line().as_deref(),
            Some("averages: 1.0 moves, 3.0 states tested")
        );
    }
}
