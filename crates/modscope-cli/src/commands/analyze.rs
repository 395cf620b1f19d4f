//! `modscope analyze` - run the full sandboxed pipeline on one snippet.

use std::io::Read;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use modscope_compiler::{CompileOutcome, Compiler, CompilerConfig};
use modscope_graph::ExtractionResult;
use modscope_highlight::{LocationIndex, RecordView};
use modscope_sandbox::{FilesystemImage, ImageSource, Sandbox, SandboxConfig};

use crate::cli::AnalyzeArgs;
use crate::commands::parse_position;
use crate::error::{CliError, Result};

pub async fn execute(args: AnalyzeArgs) -> Result<()> {
    let source = read_source(&args.input)?;

    let image = match &args.image {
        Some(path) => ImageSource::File(path.clone()),
        None => ImageSource::Inline(Arc::new(FilesystemImage::new())),
    };
    let sandbox = Arc::new(Sandbox::new(SandboxConfig { image }));

    let analyzer = args.analyzer.clone().unwrap_or_else(default_analyzer_program);
    let compiler = Compiler::new(Arc::clone(&sandbox), CompilerConfig::new(analyzer));

    tracing::info!("analyzing {} bytes of source", source.len());
    let outcome = compiler.compile(&source).await;
    sandbox.teardown().await;

    let result = match outcome {
        CompileOutcome::Success(result) => result,
        CompileOutcome::Failure(err) => return Err(CliError::Compile(err.to_string())),
    };

    if args.json {
        println!("{}", serde_json::to_string_pretty(&result)?);
    } else {
        print_records(&result);
    }

    if let Some(at) = &args.at {
        let pos = parse_position(at)?;
        let index = LocationIndex::new(&result);
        match index.record_at(pos) {
            Some((record_index, record)) => {
                println!();
                println!("record at {}:{} -> #{record_index}", pos.line, pos.column);
                print_record_line(record_index, record);
            }
            None => println!("\nno record at {}:{}", pos.line, pos.column),
        }
    }

    Ok(())
}

fn read_source(input: &Path) -> Result<String> {
    if input == Path::new("-") {
        let mut source = String::new();
        std::io::stdin().read_to_string(&mut source)?;
        return Ok(source);
    }
    if !input.exists() {
        return Err(CliError::FileNotFound(input.to_path_buf()));
    }
    Ok(std::fs::read_to_string(input)?)
}

/// The analyzer ships next to the CLI binary; fall back to PATH lookup.
fn default_analyzer_program() -> PathBuf {
    if let Ok(exe) = std::env::current_exe() {
        if let Some(dir) = exe.parent() {
            let sibling = dir.join("modscope-analyze");
            if sibling.exists() {
                return sibling;
            }
        }
    }
    PathBuf::from("modscope-analyze")
}

fn print_records(result: &ExtractionResult) {
    if result.is_empty() {
        println!("no dependencies");
        return;
    }

    let index = LocationIndex::new(result);
    for (record_index, record) in index.iter() {
        print_record_line(record_index, record);
        if let RecordView::AsyncBlock(block) = record {
            for nested in &block.dependencies {
                println!(
                    "      - {} {} {}",
                    nested.kind,
                    nested.identifiers.join(","),
                    format_span(nested.span)
                );
            }
        }
    }
}

fn print_record_line(record_index: usize, record: RecordView<'_>) {
    match record {
        RecordView::Dependency(dep) => println!(
            "  #{record_index} {} [{}] ids=[{}] {}",
            dep.kind,
            dep.category.as_deref().unwrap_or("-"),
            dep.identifiers.join(","),
            format_span(dep.span)
        ),
        RecordView::Presentational(dep) => println!(
            "  #{record_index} {} (presentational) ids=[{}] {}",
            dep.kind,
            dep.identifiers.join(","),
            format_span(dep.span)
        ),
        RecordView::AsyncBlock(block) => println!(
            "  #{record_index} async block {} ({}) {}",
            block.id,
            block.kind,
            format_span(block.span)
        ),
    }
}

fn format_span(span: Option<modscope_graph::Span>) -> String {
    match span {
        Some(span) => format!(
            "@{}:{}-{}:{}",
            span.start.line, span.start.column, span.end.line, span.end.column
        ),
        None => "@?".to_string(),
    }
}
