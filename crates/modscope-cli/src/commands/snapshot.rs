//! `modscope snapshot` - pack a directory tree into a filesystem image.

use modscope_sandbox::FilesystemImage;

use crate::cli::SnapshotArgs;
use crate::error::{CliError, Result};

pub fn execute(args: SnapshotArgs) -> Result<()> {
    if !args.dir.is_dir() {
        return Err(CliError::FileNotFound(args.dir.clone()));
    }

    let image = FilesystemImage::pack_dir(&args.dir)
        .map_err(|err| CliError::InvalidArgument(err.to_string()))?;
    let bytes = image
        .to_bytes()
        .map_err(|err| CliError::InvalidArgument(err.to_string()))?;
    std::fs::write(&args.output, &bytes)?;

    tracing::info!(
        files = image.len(),
        bytes = bytes.len(),
        output = %args.output.display(),
        "snapshot written"
    );
    println!(
        "packed {} files ({} bytes) into {}",
        image.len(),
        bytes.len(),
        args.output.display()
    );
    Ok(())
}
