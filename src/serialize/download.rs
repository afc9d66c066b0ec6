use crate::error::Result;
use crate::serialize::CsvConfig;
use std::fs;
use std::path::{Path, PathBuf};

/// Saves a generated CSV payload where the user can pick it up
pub trait Downloader {
    fn download(&self, config: &CsvConfig, payload: &str) -> Result<PathBuf>;
}

/// Downloads into a directory on the local filesystem
#[derive(Debug, Clone)]
pub struct FileDownloader {
    output_dir: PathBuf,
}

impl FileDownloader {
    pub fn new<P: AsRef<Path>>(output_dir: P) -> Self {
        FileDownloader {
            output_dir: output_dir.as_ref().to_path_buf(),
        }
    }

    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }
}

impl Downloader for FileDownloader {
    fn download(&self, config: &CsvConfig, payload: &str) -> Result<PathBuf> {
        fs::create_dir_all(&self.output_dir)?;

        let path = self.output_dir.join(config.file_name());
        fs::write(&path, payload)?;

        tracing::info!(path = %path.display(), bytes = payload.len(), "CSV file saved");
        Ok(path)
    }
}
