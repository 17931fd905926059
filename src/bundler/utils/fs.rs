//! File system utilities for staging and output collection.
//!
//! Provides idempotent directory handling, permission-preserving copies,
//! symlink-preserving tree copies and zip extraction, all with path context
//! on failure.

use crate::bundler::error::{Error, ErrorExt, Result};
use std::{io, path::Path};
use tokio::fs;

/// Creates all of the directories of the specified path, erasing it first if specified.
pub async fn create_dir_all(path: &Path, erase: bool) -> Result<()> {
    if erase {
        remove_dir_all(path).await?;
    }

    // create_dir_all is already idempotent - succeeds even if dir exists
    fs::create_dir_all(path)
        .await
        .fs_context("creating directory", path)
}

/// Removes the directory and its contents if it exists.
pub async fn remove_dir_all(path: &Path) -> Result<()> {
    match fs::remove_dir_all(path).await {
        Ok(()) => Ok(()),
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()), // Idempotent
        Err(e) => Err(Error::Fs {
            context: "removing directory",
            path: path.to_path_buf(),
            error: e,
        }),
    }
}

/// Makes a symbolic link to a directory.
#[cfg(unix)]
fn symlink_dir(src: &Path, dst: &Path) -> io::Result<()> {
    std::os::unix::fs::symlink(src, dst)
}

/// Makes a symbolic link to a directory.
#[cfg(windows)]
fn symlink_dir(src: &Path, dst: &Path) -> io::Result<()> {
    std::os::windows::fs::symlink_dir(src, dst)
}

/// Makes a symbolic link to a file.
#[cfg(unix)]
fn symlink_file(src: &Path, dst: &Path) -> io::Result<()> {
    std::os::unix::fs::symlink(src, dst)
}

/// Makes a symbolic link to a file.
#[cfg(windows)]
fn symlink_file(src: &Path, dst: &Path) -> io::Result<()> {
    std::os::windows::fs::symlink_file(src, dst)
}

/// Copies a regular file from one path to another, creating any parent
/// directories of the destination path as necessary.
///
/// Overwrites an existing destination. Permission bits travel with the
/// contents, so launchers stay executable.
///
/// Fails if the source path is a directory or doesn't exist.
pub async fn copy_file(from: &Path, to: &Path) -> Result<()> {
    if !from.exists() {
        return Err(Error::GenericError(format!("{from:?} does not exist")));
    }
    if !from.is_file() {
        return Err(Error::GenericError(format!("{from:?} is not a file")));
    }
    if let Some(dest_dir) = to.parent() {
        fs::create_dir_all(dest_dir)
            .await
            .fs_context("creating directory", dest_dir)?;
    }
    fs::copy(from, to).await.fs_context("copying file to", to)?;
    Ok(())
}

/// Recursively copies a directory from one path to another, creating any
/// parent directories of the destination path as necessary.
///
/// Preserves symlinks on platforms that support them.
/// Fails if the source path is not a directory or doesn't exist.
pub async fn copy_dir(from: &Path, to: &Path) -> Result<()> {
    if !from.exists() {
        return Err(Error::GenericError(format!("{from:?} does not exist")));
    }
    if !from.is_dir() {
        return Err(Error::GenericError(format!("{from:?} is not a Directory")));
    }

    let from = from.to_path_buf();
    let to = to.to_path_buf();

    tokio::task::spawn_blocking(move || -> Result<()> {
        if let Some(parent) = to.parent() {
            std::fs::create_dir_all(parent).fs_context("creating directory", parent)?;
        }

        for entry in walkdir::WalkDir::new(&from).sort_by_file_name() {
            let entry = entry?;
            let rel_path = entry.path().strip_prefix(&from)?;
            let dest_path = to.join(rel_path);

            if entry.file_type().is_symlink() {
                let target = std::fs::read_link(entry.path())
                    .fs_context("reading symlink", entry.path())?;
                let linked = if entry.path().is_dir() {
                    symlink_dir(&target, &dest_path)
                } else {
                    symlink_file(&target, &dest_path)
                };
                linked.fs_context("creating symlink", &dest_path)?;
            } else if entry.file_type().is_dir() {
                std::fs::create_dir_all(&dest_path).fs_context("creating directory", &dest_path)?;
            } else {
                std::fs::copy(entry.path(), &dest_path).fs_context("copying file to", &dest_path)?;
            }
        }

        Ok(())
    })
    .await
    .map_err(|e| Error::GenericError(format!("Directory copy task panicked: {}", e)))?
}

/// Returns true if the file starts with a zip local-file or empty-archive signature.
pub async fn is_zip_archive(path: &Path) -> Result<bool> {
    use tokio::io::AsyncReadExt;

    let mut file = fs::File::open(path)
        .await
        .fs_context("opening artifact", path)?;
    let mut magic = [0u8; 4];
    match file.read_exact(&mut magic).await {
        Ok(_) => Ok(magic == *b"PK\x03\x04" || magic == *b"PK\x05\x06"),
        Err(e) if e.kind() == io::ErrorKind::UnexpectedEof => Ok(false),
        Err(e) => Err(Error::Fs {
            context: "reading artifact header",
            path: path.to_path_buf(),
            error: e,
        }),
    }
}

/// Extracts a zip archive (a `.jar` included) into a directory.
///
/// Entries whose names would escape the destination are rejected by the
/// archive reader. Unix modes stored in the archive are restored.
///
/// Returns the number of archive entries.
pub async fn extract_zip(archive: &Path, to: &Path) -> Result<usize> {
    let archive = archive.to_path_buf();
    let to = to.to_path_buf();

    tokio::task::spawn_blocking(move || -> Result<usize> {
        let file = std::fs::File::open(&archive).fs_context("opening archive", &archive)?;
        let mut zip = zip::ZipArchive::new(io::BufReader::new(file))?;
        std::fs::create_dir_all(&to).fs_context("creating directory", &to)?;
        zip.extract(&to)?;
        Ok(zip.len())
    })
    .await
    .map_err(|e| Error::GenericError(format!("Archive extraction task panicked: {}", e)))?
}

/// Total size in bytes of a file, or of every regular file under a directory.
pub fn disk_size(path: &Path) -> Result<u64> {
    let metadata = std::fs::metadata(path).fs_context("reading metadata", path)?;
    if metadata.is_file() {
        return Ok(metadata.len());
    }

    let mut total = 0u64;
    for entry in walkdir::WalkDir::new(path).follow_links(false) {
        let entry = entry?;
        if entry.file_type().is_file() {
            total += entry.metadata()?.len();
        }
    }
    Ok(total)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::TempDir;

    fn write_jar(path: &Path, entries: &[(&str, &[u8])]) {
        let file = std::fs::File::create(path).unwrap();
        let mut writer = zip::ZipWriter::new(file);
        let options = zip::write::SimpleFileOptions::default()
            .compression_method(zip::CompressionMethod::Stored);
        for (name, contents) in entries {
            writer.start_file(*name, options).unwrap();
            writer.write_all(contents).unwrap();
        }
        writer.finish().unwrap();
    }

    #[tokio::test]
    async fn create_dir_all_with_erase_drops_stale_content() {
        let temp = TempDir::new().unwrap();
        let dir = temp.path().join("stage");
        std::fs::create_dir_all(&dir).unwrap();
        std::fs::write(dir.join("stale.txt"), "old").unwrap();

        create_dir_all(&dir, true).await.unwrap();

        assert!(dir.is_dir());
        assert!(!dir.join("stale.txt").exists());
    }

    #[tokio::test]
    async fn remove_dir_all_is_idempotent() {
        let temp = TempDir::new().unwrap();
        remove_dir_all(&temp.path().join("never-created")).await.unwrap();
    }

    #[tokio::test]
    async fn copy_file_overwrites_and_creates_parents() {
        let temp = TempDir::new().unwrap();
        let src = temp.path().join("icon.png");
        let dst = temp.path().join("a/b/icon.png");
        std::fs::write(&src, "new").unwrap();
        std::fs::create_dir_all(dst.parent().unwrap()).unwrap();
        std::fs::write(&dst, "old").unwrap();

        copy_file(&src, &dst).await.unwrap();

        assert_eq!(std::fs::read_to_string(&dst).unwrap(), "new");
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn copy_file_preserves_executable_bit() {
        use std::os::unix::fs::PermissionsExt;

        let temp = TempDir::new().unwrap();
        let src = temp.path().join("launcher");
        std::fs::write(&src, "#!/bin/sh\n").unwrap();
        std::fs::set_permissions(&src, std::fs::Permissions::from_mode(0o755)).unwrap();

        let dst = temp.path().join("bin/launcher");
        copy_file(&src, &dst).await.unwrap();

        let mode = std::fs::metadata(&dst).unwrap().permissions().mode();
        assert_eq!(mode & 0o111, 0o111);
    }

    #[tokio::test]
    async fn copy_file_rejects_missing_source() {
        let temp = TempDir::new().unwrap();
        let result = copy_file(&temp.path().join("missing"), &temp.path().join("out")).await;
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn copy_dir_copies_nested_tree() {
        let temp = TempDir::new().unwrap();
        let src = temp.path().join("Peakaboo.app");
        std::fs::create_dir_all(src.join("Contents/MacOS")).unwrap();
        std::fs::write(src.join("Contents/Info.plist"), "<plist/>").unwrap();
        std::fs::write(src.join("Contents/MacOS/Peakaboo.jar"), "jar").unwrap();

        let dst = temp.path().join("build/Peakaboo.app");
        copy_dir(&src, &dst).await.unwrap();

        assert_eq!(
            std::fs::read_to_string(dst.join("Contents/Info.plist")).unwrap(),
            "<plist/>"
        );
        assert!(dst.join("Contents/MacOS/Peakaboo.jar").is_file());
    }

    #[tokio::test]
    async fn extract_zip_unpacks_entries() {
        let temp = TempDir::new().unwrap();
        let jar = temp.path().join("app.jar");
        write_jar(
            &jar,
            &[
                ("META-INF/MANIFEST.MF", b"Manifest-Version: 1.0\n".as_slice()),
                ("peakaboo/Main.class", b"\xca\xfe\xba\xbe".as_slice()),
            ],
        );

        let dest = temp.path().join("out");
        let count = extract_zip(&jar, &dest).await.unwrap();

        assert_eq!(count, 2);
        assert!(dest.join("META-INF/MANIFEST.MF").is_file());
        assert_eq!(
            std::fs::read(dest.join("peakaboo/Main.class")).unwrap(),
            b"\xca\xfe\xba\xbe"
        );
    }

    #[tokio::test]
    async fn zip_detection_uses_magic_bytes() {
        let temp = TempDir::new().unwrap();
        let jar = temp.path().join("app.jar");
        write_jar(&jar, &[("a.txt", b"a".as_slice())]);
        let blob = temp.path().join("blob.jar");
        std::fs::write(&blob, "not an archive").unwrap();
        let tiny = temp.path().join("tiny.jar");
        std::fs::write(&tiny, "PK").unwrap();

        assert!(is_zip_archive(&jar).await.unwrap());
        assert!(!is_zip_archive(&blob).await.unwrap());
        assert!(!is_zip_archive(&tiny).await.unwrap());
    }

    #[test]
    fn disk_size_sums_directory_files() {
        let temp = TempDir::new().unwrap();
        std::fs::create_dir_all(temp.path().join("d/e")).unwrap();
        std::fs::write(temp.path().join("d/a"), "12345").unwrap();
        std::fs::write(temp.path().join("d/e/b"), "123").unwrap();

        assert_eq!(disk_size(&temp.path().join("d")).unwrap(), 8);
        assert_eq!(disk_size(&temp.path().join("d/a")).unwrap(), 5);
    }
}
