//! Annotation packages: YOLO label sidecar files and annotation status.

pub mod data;
pub mod report;
pub mod state;

pub use data::labels::{FormatError, LabelError, LabelFormat, parse, serialize, serialize_with};
pub use data::model::{AnnotationImage, AnnotationPackage, AnnotationPackageInfo, BoundingBox};
pub use data::status::{PackageState, REQUIRED_PERCENTAGE, classify};
pub use state::PackageList;
