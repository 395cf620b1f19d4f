//! Command implementations.

mod analyze;
mod inspect;
mod snapshot;

pub use analyze::execute as analyze_execute;
pub use inspect::execute as inspect_execute;
pub use snapshot::execute as snapshot_execute;

use modscope_graph::Position;

use crate::error::{CliError, Result};

/// Parse a `LINE:COL` argument into a 1-based position.
pub(crate) fn parse_position(value: &str) -> Result<Position> {
    let (line, column) = value
        .split_once(':')
        .ok_or_else(|| CliError::InvalidArgument(format!("expected LINE:COL, got '{value}'")))?;

    let line: u32 = line
        .trim()
        .parse()
        .map_err(|_| CliError::InvalidArgument(format!("invalid line number '{line}'")))?;
    let column: u32 = column
        .trim()
        .parse()
        .map_err(|_| CliError::InvalidArgument(format!("invalid column number '{column}'")))?;

    if line == 0 || column == 0 {
        return Err(CliError::InvalidArgument(
            "positions are 1-based; line and column must be at least 1".to_string(),
        ));
    }

    Ok(Position::new(line, column))
}
