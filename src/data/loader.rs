use std::fs;
use std::path::Path;

use anyhow::{Context, Result, bail};
use log::{debug, info, warn};

use super::labels;
use super::model::{AnnotationImage, AnnotationPackage, AnnotationPackageInfo, BoundingBox};
use super::paths::{is_image_file, label_path};

// ---------------------------------------------------------------------------
// Reading packages
// ---------------------------------------------------------------------------

/// A package as it sits on disk: extracted directories are opened, a `.zip`
/// archive is listed as not yet extracted (it is never unpacked here).
pub fn list_package(path: &Path) -> Result<AnnotationPackage> {
    if path.is_dir() {
        return open_package(path);
    }

    let is_zip = path
        .extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case("zip"));
    if path.is_file() && is_zip {
        debug!("Listing unextracted package {}", path.display());
        return Ok(AnnotationPackage::new(path, false));
    }

    bail!("Not a package directory or .zip archive: {}", path.display())
}

/// Open an extracted package directory: collect its images, read their
/// label sidecars and recompute the annotation status.
///
/// A directory without images yields a package whose `images` stay `None`.
pub fn open_package(dir: &Path) -> Result<AnnotationPackage> {
    if !dir.is_dir() {
        bail!("Package is not an extracted directory: {}", dir.display());
    }

    let mut package = AnnotationPackage::new(dir, true);
    let images = open_images(dir)?;

    if images.is_empty() {
        warn!("No images found in {}", dir.display());
        return Ok(package);
    }

    package.images = Some(images);
    package.update_annotation_status();
    info!(
        "Opened {} ({} images, {:.1}% annotated)",
        package.display_name,
        package.image_count(),
        package.info.annotation_percentage
    );
    Ok(package)
}

/// Top-level images of `dir`, sorted by file name, with their boxes.
pub fn open_images(dir: &Path) -> Result<Vec<AnnotationImage>> {
    let entries = fs::read_dir(dir)
        .with_context(|| format!("reading package directory {}", dir.display()))?;

    let mut paths = Vec::new();
    for entry in entries {
        let path = entry.context("reading directory entry")?.path();
        if path.is_file() && is_image_file(&path) {
            paths.push(path);
        }
    }
    paths.sort();

    paths
        .into_iter()
        .map(|path| -> Result<AnnotationImage> {
            let boxes = read_boxes(&label_path(&path))?;
            Ok(AnnotationImage::new(path, boxes))
        })
        .collect()
}

/// Boxes stored in a label sidecar. A missing file means no boxes.
pub fn read_boxes(label_path: &Path) -> Result<Vec<BoundingBox>> {
    if !label_path.exists() {
        debug!("No label file at {}", label_path.display());
        return Ok(Vec::new());
    }
    let text = fs::read_to_string(label_path)
        .with_context(|| format!("reading label file {}", label_path.display()))?;
    labels::parse(&text).with_context(|| format!("parsing label file {}", label_path.display()))
}

// ---------------------------------------------------------------------------
// Writing labels shipped with a package
// ---------------------------------------------------------------------------

/// Load package metadata (status plus shipped labels) from a JSON file.
pub fn load_package_info(path: &Path) -> Result<AnnotationPackageInfo> {
    let text = fs::read_to_string(path).context("reading package info JSON")?;
    serde_json::from_str(&text).context("parsing package info JSON")
}

/// Write one label sidecar per shipped image. Relative image paths are
/// resolved against `base_dir`. Returns the number of files written.
pub fn write_labels(info: &AnnotationPackageInfo, base_dir: &Path) -> Result<usize> {
    let Some(images) = &info.images else {
        debug!("Package info carries no labels");
        return Ok(0);
    };

    for image in images {
        let target = label_path(&base_dir.join(&image.file_path));
        fs::write(&target, labels::serialize(&image.bounding_boxes))
            .with_context(|| format!("writing label file {}", target.display()))?;
        debug!("Wrote {} box(es) to {}", image.bounding_boxes.len(), target.display());
    }

    info!("Wrote {} label file(s)", images.len());
    Ok(images.len())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn scratch_dir(name: &str) -> PathBuf {
        let dir = std::env::temp_dir()
            .join(format!("yolo-packages-loader-{name}-{}", std::process::id()));
        let _ = fs::remove_dir_all(&dir);
        fs::create_dir_all(&dir).unwrap();
        dir
    }

    #[test]
    fn open_package_reads_sidecars() {
        let dir = scratch_dir("open");
        for name in ["a.png", "b.jpg", "c.png", "d.png"] {
            fs::write(dir.join(name), b"").unwrap();
        }
        fs::write(dir.join("a.txt"), "0 0.5 0.5 0.1 0.1\n").unwrap();
        fs::write(dir.join("b.txt"), "1 0.2 0.2 0.1 0.1\n2 0.7 0.7 0.2 0.2\n").unwrap();
        fs::write(dir.join("c.txt"), "").unwrap();
        fs::write(dir.join("notes.md"), "ignored").unwrap();

        let pkg = open_package(&dir).unwrap();
        let images = pkg.images.as_ref().unwrap();
        assert_eq!(images.len(), 4);
        assert_eq!(images[0].display_name, "a.png");
        assert_eq!(images[1].bounding_boxes.len(), 2);
        assert_eq!(pkg.info.annotation_percentage, 50.0);
        assert!(pkg.info.is_annotated);
        assert!(pkg.extracted);

        fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn empty_directory_leaves_images_unset() {
        let dir = scratch_dir("empty");
        let pkg = open_package(&dir).unwrap();
        assert!(pkg.images.is_none());
        assert!(!pkg.info.is_annotated);
        fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn missing_directory_is_an_error() {
        let dir = std::env::temp_dir().join("yolo-packages-loader-does-not-exist");
        assert!(open_package(&dir).is_err());
    }

    #[test]
    fn zip_is_listed_as_pending() {
        use crate::data::status::PackageState;

        let dir = scratch_dir("zip");
        let extracted = dir.join("batch_01");
        fs::create_dir_all(&extracted).unwrap();
        fs::write(extracted.join("a.png"), b"").unwrap();
        fs::write(extracted.join("a.txt"), "0 0.5 0.5 0.1 0.1\n").unwrap();
        let archive = dir.join("batch_02.ZIP");
        fs::write(&archive, b"PK").unwrap();

        let opened = list_package(&extracted).unwrap();
        assert_eq!(PackageState::of(&opened), PackageState::Annotated);

        let pending = list_package(&archive).unwrap();
        assert!(!pending.extracted);
        assert!(pending.images.is_none());
        assert_eq!(pending.display_name, "batch_02.ZIP");
        assert_eq!(PackageState::of(&pending), PackageState::Pending);

        fs::write(dir.join("notes.txt"), "x").unwrap();
        assert!(list_package(&dir.join("notes.txt")).is_err());
        assert!(list_package(&dir.join("missing.zip")).is_err());

        fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn malformed_label_is_reported() {
        let dir = scratch_dir("malformed");
        fs::write(dir.join("a.png"), b"").unwrap();
        fs::write(dir.join("a.txt"), "0 0.5\n").unwrap();
        let err = open_package(&dir).unwrap_err();
        assert!(format!("{err:#}").contains("expected 5 fields"));
        fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn write_labels_materialises_sidecars() {
        let dir = scratch_dir("write");
        let info = AnnotationPackageInfo {
            images: Some(vec![
                AnnotationImage::new("a.png", vec![BoundingBox::new(0, 0.512, 0.304, 0.2, 0.15)]),
                AnnotationImage::new("b.png", Vec::new()),
            ]),
            ..Default::default()
        };

        assert_eq!(write_labels(&info, &dir).unwrap(), 2);
        assert_eq!(fs::read_to_string(dir.join("a.txt")).unwrap(), "0 0.512 0.304 0.2 0.15\n");
        assert_eq!(fs::read_to_string(dir.join("b.txt")).unwrap(), "");

        fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn write_labels_without_images() {
        let dir = scratch_dir("noimages");
        assert_eq!(write_labels(&AnnotationPackageInfo::default(), &dir).unwrap(), 0);
        fs::remove_dir_all(&dir).unwrap();
    }
}
