use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use super::status;

// ---------------------------------------------------------------------------
// BoundingBox – one labelled object
// ---------------------------------------------------------------------------

/// A normalised (0–1) rectangle around one object, referencing a class index.
/// Coordinates are not range-checked.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BoundingBox {
    pub object_index: i32,
    pub center_x: f64,
    pub center_y: f64,
    pub width: f64,
    pub height: f64,
}

impl BoundingBox {
    pub fn new(object_index: i32, center_x: f64, center_y: f64, width: f64, height: f64) -> Self {
        Self {
            object_index,
            center_x,
            center_y,
            width,
            height,
        }
    }
}

// ---------------------------------------------------------------------------
// AnnotationImage – one image of a package
// ---------------------------------------------------------------------------

/// An image on disk together with its boxes, kept in annotation order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnnotationImage {
    pub file_path: PathBuf,
    #[serde(default)]
    pub display_name: String,
    #[serde(default)]
    pub bounding_boxes: Vec<BoundingBox>,
    #[serde(default, skip_serializing)]
    pub selected: bool,
}

impl AnnotationImage {
    /// Build an image entry; the display name is the file name.
    pub fn new(file_path: impl Into<PathBuf>, bounding_boxes: Vec<BoundingBox>) -> Self {
        let file_path = file_path.into();
        let display_name = file_name_of(&file_path);
        Self {
            file_path,
            display_name,
            bounding_boxes,
            selected: false,
        }
    }

    /// An image counts as annotated once it has at least one box.
    pub fn is_annotated(&self) -> bool {
        !self.bounding_boxes.is_empty()
    }
}

// ---------------------------------------------------------------------------
// AnnotationPackageInfo – derived status plus shipped labels
// ---------------------------------------------------------------------------

/// Package metadata. `annotation_percentage` and `is_annotated` are derived
/// from the package images; `images` holds the labels that came with a
/// downloaded package, if any.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnnotationPackageInfo {
    #[serde(default)]
    pub annotation_percentage: f64,
    #[serde(default)]
    pub is_annotated: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub images: Option<Vec<AnnotationImage>>,
}

// ---------------------------------------------------------------------------
// AnnotationPackage – one labelling batch
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq)]
pub struct AnnotationPackage {
    /// Zip archive path, or the extracted directory once `extracted` is set.
    pub package_path: PathBuf,
    pub display_name: String,
    pub extracted: bool,
    pub selected: bool,
    /// `None` until the package has been opened.
    pub images: Option<Vec<AnnotationImage>>,
    pub info: AnnotationPackageInfo,
}

impl AnnotationPackage {
    pub fn new(package_path: impl Into<PathBuf>, extracted: bool) -> Self {
        let package_path = package_path.into();
        let display_name = file_name_of(&package_path);
        Self {
            package_path,
            display_name,
            extracted,
            selected: false,
            images: None,
            info: AnnotationPackageInfo::default(),
        }
    }

    /// Recompute the derived status from the opened images.
    /// A package that was never opened keeps its current info.
    pub fn update_annotation_status(&mut self) {
        let Some(images) = &self.images else {
            return;
        };
        let derived = status::classify(images);
        self.info.annotation_percentage = derived.annotation_percentage;
        self.info.is_annotated = derived.is_annotated;
    }

    /// Number of opened images carrying at least one box.
    pub fn annotated_image_count(&self) -> usize {
        self.images
            .as_deref()
            .map(|imgs| imgs.iter().filter(|img| img.is_annotated()).count())
            .unwrap_or(0)
    }

    pub fn image_count(&self) -> usize {
        self.images.as_ref().map_or(0, Vec::len)
    }
}

fn file_name_of(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default()
}
