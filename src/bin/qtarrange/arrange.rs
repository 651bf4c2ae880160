//! Sorting movie files into per-format directories.

use std::{
    fs,
    io,
    path::{Path, PathBuf},
};

use tracing::debug;

/// How a file is transferred into its target directory.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transfer {
    /// Symbolic link to the source file.
    Link,
    Copy,
    Move,
}

/// Returns `true` if the file name ends in `mov`, ignoring case.
pub fn is_movie(path: &Path) -> bool {
    path.file_name()
        .map(|name| {
            let name = name.as_encoded_bytes();
            name.len() >= 3 && name[name.len() - 3 ..].eq_ignore_ascii_case(b"mov")
        })
        .unwrap_or(false)
}

/// Movie files in `dir`, sorted by path.
/// Sub-directories are not searched.
pub fn movies(dir: &Path) -> io::Result<Vec<PathBuf>> {
    let mut paths = Vec::new();
    for entry in fs::read_dir(dir)? {
        let path = entry?.path();
        if path.is_file() && is_movie(&path) {
            paths.push(path);
        }
    }
    paths.sort();
    Ok(paths)
}

/// Transfers `file` to `target/dir_name/file_name`, creating
/// `target/dir_name` if it does not exist.
/// Existing files are never overwritten.
/// Returns the path of the created file or link.
pub fn transfer(
    transfer: Transfer,
    file: &Path,
    target: &Path,
    dir_name: &str,
    file_name: &str,
) -> io::Result<PathBuf> {
    let dir = target.join(dir_name);
    if !dir.is_dir() {
        debug!(dir = %dir.display(), "create directory");
        fs::create_dir_all(&dir)?;
    }

    let dest = dir.join(file_name);
    if dest.symlink_metadata().is_ok() {
        return Err(io::Error::new(
            io::ErrorKind::AlreadyExists,
            format!("{} already exists", dest.display())
        ))
    }

    match transfer {
        Transfer::Link => symlink(&file.canonicalize()?, &dest)?,
        Transfer::Copy => {
            fs::copy(file, &dest)?;
        },
        Transfer::Move => {
            // rename fails across file systems
            if let Err(err) = fs::rename(file, &dest) {
                debug!(%err, "rename failed, copying instead");
                fs::copy(file, &dest)?;
                fs::remove_file(file)?;
            }
        },
    }

    Ok(dest)
}

#[cfg(unix)]
fn symlink(original: &Path, link: &Path) -> io::Result<()> {
    std::os::unix::fs::symlink(original, link)
}

#[cfg(windows)]
fn symlink(original: &Path, link: &Path) -> io::Result<()> {
    std::os::windows::fs::symlink_file(original, link)
}

#[cfg(test)]
mod tests {
    use std::{
        fs,
        io,
        path::{Path, PathBuf},
    };

    use super::{is_movie, movies, transfer, Transfer};

    fn temp_dir(name: &str) -> PathBuf {
        let dir = std::env::temp_dir()
            .join(format!("qtarrange-{}", std::process::id()))
            .join(name);
        let _ = fs::remove_dir_all(&dir);
        fs::create_dir_all(&dir).unwrap();
        dir
    }

    #[test]
    fn movie_names() {
        assert!(is_movie(Path::new("a/MVI_0001.MOV")));
        assert!(is_movie(Path::new("clip.mov")));
        assert!(is_movie(Path::new("clip.MoV")));
        assert!(!is_movie(Path::new("clip.mp4")));
        assert!(!is_movie(Path::new("mo")));
        assert!(!is_movie(Path::new("/")));
    }

    #[test]
    fn lists_sorted_movies() {
        let dir = temp_dir("list");
        for name in ["b.MOV", "a.mov", "c.mp4"] {
            fs::write(dir.join(name), b"").unwrap();
        }
        fs::create_dir(dir.join("sub.mov")).unwrap();

        let names: Vec<String> = movies(&dir).unwrap()
            .iter()
            .map(|p| p.file_name().unwrap().to_string_lossy().to_string())
            .collect();
        assert_eq!(names, vec!["a.mov", "b.MOV"]);
    }

    #[test]
    fn copy_and_move() {
        let source = temp_dir("source");
        let target = temp_dir("target");
        let file = source.join("a.mov");
        fs::write(&file, b"data").unwrap();

        let copied = transfer(Transfer::Copy, &file, &target, "1920x1080@24", "a.mov").unwrap();
        assert_eq!(copied, target.join("1920x1080@24").join("a.mov"));
        assert_eq!(fs::read(&copied).unwrap(), b"data");
        assert!(file.exists());

        // never overwrites
        let err = transfer(Transfer::Copy, &file, &target, "1920x1080@24", "a.mov").unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::AlreadyExists);

        let moved = transfer(Transfer::Move, &file, &target, "640x480@30", "a.mov").unwrap();
        assert_eq!(fs::read(&moved).unwrap(), b"data");
        assert!(!file.exists());
    }

    #[cfg(unix)]
    #[test]
    fn link() {
        let source = temp_dir("link_source");
        let target = temp_dir("link_target");
        let file = source.join("a.mov");
        fs::write(&file, b"data").unwrap();

        let link = transfer(Transfer::Link, &file, &target, "1280x720@25", "a.mov").unwrap();
        assert!(link.symlink_metadata().unwrap().file_type().is_symlink());
        assert_eq!(fs::read(&link).unwrap(), b"data");
    }
}
