use std::fmt;

use serde::Serialize;

use super::model::{AnnotationImage, AnnotationPackage, AnnotationPackageInfo};

/// Share of annotated images (in percent) a package needs to count as done.
/// Inclusive.
pub const REQUIRED_PERCENTAGE: f64 = 50.0;

// ---------------------------------------------------------------------------
// Annotation completeness
// ---------------------------------------------------------------------------

/// Derive annotation percentage and flag from a package's images.
///
/// An empty collection yields `0.0` and not annotated.
pub fn classify(images: &[AnnotationImage]) -> AnnotationPackageInfo {
    if images.is_empty() {
        return AnnotationPackageInfo::default();
    }

    let annotated = images.iter().filter(|img| img.is_annotated()).count();
    let annotation_percentage = annotated as f64 / images.len() as f64 * 100.0;

    AnnotationPackageInfo {
        annotation_percentage,
        is_annotated: annotation_percentage >= REQUIRED_PERCENTAGE,
        images: None,
    }
}

// ---------------------------------------------------------------------------
// Package state for listings
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum PackageState {
    Annotated,
    Extracted,
    Pending,
}

impl PackageState {
    /// Annotated wins over extracted; anything else is still pending.
    pub fn of(package: &AnnotationPackage) -> Self {
        if package.info.is_annotated {
            PackageState::Annotated
        } else if package.extracted {
            PackageState::Extracted
        } else {
            PackageState::Pending
        }
    }
}

impl fmt::Display for PackageState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PackageState::Annotated => write!(f, "annotated"),
            PackageState::Extracted => write!(f, "extracted"),
            PackageState::Pending => write!(f, "pending"),
        }
    }
}
