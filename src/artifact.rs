use std::fs::File;
use std::io::{ErrorKind, Read, Write as _};
use std::path::Path;

use crate::portal::PortalError;

pub const DOWNLOAD_CHUNK_BYTES: usize = 8 * 1024;

/// `cause_list_{court_code}_{date}.pdf`; the same court and date always map
/// to the same file.
pub fn artifact_file_name(court_code: &str, date: &str) -> Result<String, PortalError> {
    check_name_component("court code", court_code)?;
    check_name_component("date", date)?;
    Ok(format!("cause_list_{court_code}_{date}.pdf"))
}

fn check_name_component(field: &'static str, value: &str) -> Result<(), PortalError> {
    let invalid = value.trim().is_empty()
        || value.contains(['/', '\\', '\0'])
        || value.contains("..");
    if invalid {
        return Err(PortalError::InvalidArtifactName {
            field,
            value: value.to_owned(),
        });
    }
    Ok(())
}

/// Create or truncate `path` and copy `body` into it chunk by chunk.
///
/// Writes in place: an interrupted download leaves a partial file behind.
pub fn write_artifact(path: &Path, mut body: impl Read) -> std::io::Result<u64> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }

    let mut file = File::create(path)?;
    let mut buf = vec![0_u8; DOWNLOAD_CHUNK_BYTES];
    let mut written = 0_u64;
    loop {
        let n = match body.read(&mut buf) {
            Ok(0) => break,
            Ok(n) => n,
            Err(err) if err.kind() == ErrorKind::Interrupted => continue,
            Err(err) => return Err(err),
        };
        file.write_all(&buf[..n])?;
        written += n as u64;
    }
    file.flush()?;
    Ok(written)
}

#[cfg(test)]
mod tests {
    use std::io::Cursor;

    use super::*;

    #[test]
    fn file_name_is_deterministic() -> anyhow::Result<()> {
        assert_eq!(
            artifact_file_name("3", "2024-01-15")?,
            "cause_list_3_2024-01-15.pdf"
        );
        assert_eq!(
            artifact_file_name("3", "2024-01-15")?,
            artifact_file_name("3", "2024-01-15")?
        );
        Ok(())
    }

    #[test]
    fn rejects_path_like_components() {
        for (court, date) in [
            ("../etc", "2024-01-15"),
            ("3", "2024/01/15"),
            ("3", ""),
            ("  ", "2024-01-15"),
            ("a\\b", "2024-01-15"),
        ] {
            assert!(
                matches!(
                    artifact_file_name(court, date),
                    Err(PortalError::InvalidArtifactName { .. })
                ),
                "court={court:?} date={date:?}"
            );
        }
    }

    #[test]
    fn writes_bodies_larger_than_one_chunk() -> anyhow::Result<()> {
        let temp = tempfile::TempDir::new()?;
        let path = temp.path().join("nested").join("out.pdf");
        let body = (0..DOWNLOAD_CHUNK_BYTES * 3 + 17)
            .map(|i| (i % 251) as u8)
            .collect::<Vec<_>>();

        let written = write_artifact(&path, Cursor::new(body.clone()))?;
        assert_eq!(written, body.len() as u64);
        assert_eq!(std::fs::read(&path)?, body);
        Ok(())
    }

    #[test]
    fn rewrite_truncates_previous_content() -> anyhow::Result<()> {
        let temp = tempfile::TempDir::new()?;
        let path = temp.path().join("out.pdf");
        write_artifact(&path, Cursor::new(b"a much longer first body".to_vec()))?;
        write_artifact(&path, Cursor::new(b"short".to_vec()))?;
        assert_eq!(std::fs::read(&path)?, b"short");
        Ok(())
    }
}
