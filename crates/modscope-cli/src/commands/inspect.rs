//! `modscope inspect` - offline position lookup in a saved result.

use modscope_graph::ExtractionResult;
use modscope_highlight::LocationIndex;

use crate::cli::InspectArgs;
use crate::commands::parse_position;
use crate::error::{CliError, Result};

pub fn execute(args: InspectArgs) -> Result<()> {
    if !args.result.exists() {
        return Err(CliError::FileNotFound(args.result.clone()));
    }
    let text = std::fs::read_to_string(&args.result)?;
    let result: ExtractionResult = serde_json::from_str(&text)?;

    let pos = parse_position(&args.at)?;
    let index = LocationIndex::new(&result);

    match index.record_at(pos) {
        Some((record_index, record)) => {
            println!(
                "#{record_index} {} {}",
                record.kind(),
                record
                    .span()
                    .map(|s| format!(
                        "@{}:{}-{}:{}",
                        s.start.line, s.start.column, s.end.line, s.end.column
                    ))
                    .unwrap_or_else(|| "@?".to_string())
            );
        }
        None => println!("no record at {}:{}", pos.line, pos.column),
    }
    Ok(())
}
