//! The analysis process spawned inside the sandbox.
//!
//! Contract with the orchestrator: exit 0 means stdout holds exactly one
//! JSON document in the extraction-result shape; any other exit code means
//! stdout/stderr holds human-readable error text and no JSON is guaranteed.

use std::process::ExitCode;

use modscope_analyzer::{Compiler, CompilerOptions, ExtractionPlugin};

/// Entry module location, fixed relative to the sandbox working directory.
const ENTRY_PATH: &str = "src/index.js";

fn run() -> anyhow::Result<String> {
    let options = CompilerOptions::new(ENTRY_PATH);
    let plugin = ExtractionPlugin::for_options(&options);

    let mut compiler = Compiler::new(options);
    compiler.register(Box::new(plugin.clone()));
    compiler.run()?;

    let result = plugin.take_result();
    Ok(serde_json::to_string(&result)?)
}

fn main() -> ExitCode {
    match run() {
        Ok(json) => {
            println!("{json}");
            ExitCode::SUCCESS
        }
        Err(err) => {
            eprintln!("{err:#}");
            ExitCode::FAILURE
        }
    }
}
