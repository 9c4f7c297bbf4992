use std::fs;
use std::path::Path;
use std::process::Command;

use crate::config::Config;
use crate::data::loader;
use crate::data::model::Dataset;
use crate::error::PipelineError;

// ---------------------------------------------------------------------------
// File boundary
// ---------------------------------------------------------------------------

/// Copy a user-chosen CSV to the path the clustering process reads,
/// replacing whatever was there.
pub fn copy_dataset(src: &Path, dest: &Path) -> Result<(), PipelineError> {
    let copy_err = |source: std::io::Error| PipelineError::FileCopy {
        from: src.to_path_buf(),
        to: dest.to_path_buf(),
        source,
    };

    if dest.exists() {
        fs::remove_file(dest).map_err(copy_err)?;
    }
    if let Some(parent) = dest.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(copy_err)?;
    }
    fs::copy(src, dest).map_err(copy_err)?;

    log::info!("Copied {} to {}", src.display(), dest.display());
    Ok(())
}

// ---------------------------------------------------------------------------
// Process boundary
// ---------------------------------------------------------------------------

/// Run the clustering command to completion. Success is a zero exit status;
/// there is no retry.
pub fn run_clustering(command: &[String], workdir: &Path) -> Result<(), PipelineError> {
    let (program, args) = command.split_first().ok_or(PipelineError::EmptyCommand)?;
    let display = command.join(" ");

    log::info!("Running '{display}' in {}", workdir.display());
    let status = Command::new(program)
        .args(args)
        .current_dir(workdir)
        .status()
        .map_err(|source| PipelineError::Spawn {
            command: display.clone(),
            source,
        })?;

    if !status.success() {
        return Err(PipelineError::ExternalProcess {
            command: display,
            status,
        });
    }

    log::info!("Clustering finished, dataset regenerated");
    Ok(())
}

// ---------------------------------------------------------------------------
// Composite steps
// ---------------------------------------------------------------------------

/// Re-run clustering and load the freshly written dataset.
pub fn regenerate(config: &Config) -> Result<Dataset, PipelineError> {
    run_clustering(&config.clustering_command, &config.clustering_dir)?;
    Ok(loader::load(&config.dataset_path)?)
}

/// Hand a new source CSV to the clustering process, then regenerate.
pub fn upload(config: &Config, src: &Path) -> Result<Dataset, PipelineError> {
    copy_dataset(src, &config.upload_destination)?;
    regenerate(config)
}
