//! Persisting rendered badges.

use std::fs;
use std::io::{BufWriter, Write};
use std::path::Path;

use image::codecs::png::PngEncoder;
use image::{ExtendedColorType, ImageEncoder, RgbaImage};
use tempfile::NamedTempFile;

use crate::error::{BadgeError, Result};

/// Encodes `image` as an RGBA PNG at `path`.
///
/// The PNG is written to a temporary file beside `path` and renamed into
/// place once complete, so a failed write never leaves a truncated image
/// under the final name. Missing parent directories are created.
pub fn save_png(image: &RgbaImage, path: &Path) -> Result<()> {
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    fs::create_dir_all(dir).map_err(|e| BadgeError::io(dir, e))?;

    let mut tmp = NamedTempFile::new_in(dir).map_err(|e| BadgeError::io(path, e))?;
    {
        let mut writer = BufWriter::new(tmp.as_file_mut());
        PngEncoder::new(&mut writer)
            .write_image(
                image.as_raw(),
                image.width(),
                image.height(),
                ExtendedColorType::Rgba8,
            )
            .map_err(|source| BadgeError::Encode {
                path: path.to_path_buf(),
                source,
            })?;
        writer.flush().map_err(|e| BadgeError::io(path, e))?;
    }

    set_shared_permissions(tmp.as_file()).map_err(|e| BadgeError::io(path, e))?;
    tmp.persist(path).map_err(|e| BadgeError::io(path, e.error))?;
    Ok(())
}

/// Mode given to every written PNG on Unix: owner read/write, others read.
#[cfg(unix)]
pub const OUTPUT_MODE: u32 = 0o644;

/// Temp files are created owner-only; icons are meant to be served.
#[cfg(unix)]
fn set_shared_permissions(file: &fs::File) -> std::io::Result<()> {
    use std::os::unix::fs::PermissionsExt;
    file.set_permissions(fs::Permissions::from_mode(OUTPUT_MODE))
}

#[cfg(not(unix))]
fn set_shared_permissions(_file: &fs::File) -> std::io::Result<()> {
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgba;

    #[test]
    fn writes_rgba_png_and_creates_parents() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested/out/badge.png");
        let image = RgbaImage::from_pixel(3, 2, Rgba([255, 255, 255, 0]));

        save_png(&image, &path).unwrap();

        let decoded = image::open(&path).unwrap();
        assert_eq!(decoded.color(), image::ColorType::Rgba8);
        assert_eq!(decoded.to_rgba8(), image);
    }

    #[test]
    fn leaves_no_temp_files_behind() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("a.png");
        save_png(&RgbaImage::new(1, 1), &path).unwrap();

        let names: Vec<_> = fs::read_dir(dir.path())
            .unwrap()
            .map(|e| e.unwrap().file_name())
            .collect();
        assert_eq!(names, vec![std::ffi::OsString::from("a.png")]);
    }

    #[test]
    fn overwrites_existing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("a.png");
        save_png(&RgbaImage::new(1, 1), &path).unwrap();
        save_png(&RgbaImage::new(4, 4), &path).unwrap();

        assert_eq!(image::open(&path).unwrap().width(), 4);
    }

    #[cfg(unix)]
    #[test]
    fn written_png_is_world_readable() {
        use std::os::unix::fs::PermissionsExt;

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("S.png");
        save_png(&RgbaImage::new(2, 2), &path).unwrap();

        let mode = fs::metadata(&path).unwrap().permissions().mode() & 0o777;
        assert_eq!(mode, OUTPUT_MODE);
        assert_ne!(mode & 0o004, 0, "others must be able to read the icon");
    }

    #[test]
    fn unwritable_destination_reports_path() {
        let dir = tempfile::tempdir().unwrap();
        // A regular file where a directory is expected.
        let blocker = dir.path().join("blocker");
        fs::write(&blocker, b"x").unwrap();
        let path = blocker.join("badge.png");

        let err = save_png(&RgbaImage::new(1, 1), &path).unwrap_err();
        match err {
            BadgeError::Io { path: failed, .. } => assert!(failed.starts_with(&blocker)),
            other => panic!("unexpected error: {other}"),
        }
    }
}
