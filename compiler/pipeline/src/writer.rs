//! Scoped atomic file writes.

use std::io::Write;
use std::path::Path;

use tempfile::NamedTempFile;
use tracing::debug;

use crate::Result;

/// Write `content` to `path`, creating missing parent directories.
///
/// The content is written to a temporary file in the target directory and then
/// renamed over `path`, so readers see either the old file or the complete new
/// one. The temporary file is removed if any step fails.
pub fn write_spec_file(path: &Path, content: &str) -> Result<()> {
    let parent = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    std::fs::create_dir_all(parent)?;

    let mut tmp = NamedTempFile::new_in(parent)?;
    tmp.write_all(content.as_bytes())?;
    tmp.as_file().sync_all()?;
    tmp.persist(path)?;

    debug!(path = %path.display(), bytes = content.len(), "wrote spec file");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn creates_parent_directories() {
        let dir = tempfile::tempdir().expect("tempdir");
        let target = dir.path().join("spec/classes/config/server/connector_spec.rb");
        write_spec_file(&target, "describe 'x' do\nend\n").expect("write");
        assert_eq!(std::fs::read_to_string(&target).expect("read"), "describe 'x' do\nend\n");
    }

    #[test]
    fn overwrites_and_leaves_no_temporaries() {
        let dir = tempfile::tempdir().expect("tempdir");
        let target = dir.path().join("one_spec.rb");
        write_spec_file(&target, "first").expect("first write");
        write_spec_file(&target, "second").expect("second write");

        assert_eq!(std::fs::read_to_string(&target).expect("read"), "second");
        let entries = std::fs::read_dir(dir.path()).expect("read_dir").count();
        assert_eq!(entries, 1);
    }
}
