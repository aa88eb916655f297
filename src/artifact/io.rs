//! Encoding the artifact and replacing the file on disk in one step.

use crate::artifact::error::ArtifactError;
use crate::artifact::{Artifact, ArtifactFormat};
use log::info;
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;
use tokio::{fs, task};

const JS_PREFIX: &str = "const DATA = ";
const JS_SUFFIX: &str = ";\n";

impl Artifact {
    /// Serializes the artifact. The output depends only on the artifact's contents.
    pub fn to_bytes(&self, format: ArtifactFormat) -> Result<Vec<u8>, ArtifactError> {
        let json = serde_json::to_string_pretty(self).map_err(ArtifactError::Encode)?;
        Ok(match format {
            ArtifactFormat::Json => {
                let mut bytes = json.into_bytes();
                bytes.push(b'\n');
                bytes
            }
            ArtifactFormat::Js => format!("{JS_PREFIX}{json}{JS_SUFFIX}").into_bytes(),
        })
    }

    /// Parses either layout; `path` is only used in errors.
    pub fn from_bytes(bytes: &[u8], path: &Path) -> Result<Artifact, ArtifactError> {
        let text = std::str::from_utf8(bytes)
            .map_err(|_| ArtifactError::UnrecognizedFormat(path.to_path_buf()))?
            .trim();
        let json = match text.strip_prefix(JS_PREFIX) {
            Some(rest) => rest.trim_end().strip_suffix(';').unwrap_or(rest),
            None if text.starts_with('{') => text,
            None => return Err(ArtifactError::UnrecognizedFormat(path.to_path_buf())),
        };
        serde_json::from_str(json).map_err(|e| ArtifactError::Decode(path.to_path_buf(), e))
    }

    pub async fn read(path: &Path) -> Result<Artifact, ArtifactError> {
        let bytes = fs::read(path)
            .await
            .map_err(|e| ArtifactError::Read(path.to_path_buf(), e))?;
        Self::from_bytes(&bytes, path)
    }

    /// Writes the artifact so that `path` holds either the previous file or the
    /// complete new one, never a partial write.
    pub async fn write_atomic(
        &self,
        path: &Path,
        format: ArtifactFormat,
    ) -> Result<(), ArtifactError> {
        let bytes = self.to_bytes(format)?;
        let size = bytes.len();
        let path_buf = path.to_path_buf();
        task::spawn_blocking(move || replace_file(&path_buf, &bytes)).await??;
        info!("Wrote {} ({} KB)", path.display(), size / 1024);
        Ok(())
    }
}

fn parent_dir(path: &Path) -> PathBuf {
    match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => PathBuf::from("."),
    }
}

/// Writes to a temporary file next to `path` and renames it over `path`.
fn replace_file(path: &Path, bytes: &[u8]) -> Result<(), ArtifactError> {
    let dir = parent_dir(path);
    std::fs::create_dir_all(&dir).map_err(|e| ArtifactError::DirCreation(dir.clone(), e))?;

    let mut temp_file =
        NamedTempFile::new_in(&dir).map_err(|e| ArtifactError::TempWrite(dir.clone(), e))?;
    let write = |file: &mut NamedTempFile| -> std::io::Result<()> {
        file.write_all(bytes)?;
        file.flush()?;
        file.as_file().sync_all()
    };
    write(&mut temp_file).map_err(|e| ArtifactError::TempWrite(dir.clone(), e))?;

    // tempfile creates files as 0600
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        temp_file
            .as_file()
            .set_permissions(std::fs::Permissions::from_mode(0o644))
            .map_err(|e| ArtifactError::TempWrite(dir.clone(), e))?;
    }

    temp_file
        .persist(path)
        .map_err(|e| ArtifactError::Persist(path.to_path_buf(), e.error))?;
    Ok(())
}
