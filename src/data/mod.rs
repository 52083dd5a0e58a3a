/// Data layer: core types, label files, loading, and status.
///
/// Architecture:
/// ```text
///  package dir / info .json
///        │
///        ▼
///   ┌──────────┐
///   │  loader   │  scan images, read/write label sidecars
///   └──────────┘
///        │
///        ▼
///   ┌──────────────────┐
///   │ AnnotationPackage │  Vec<AnnotationImage>, derived info
///   └──────────────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  status   │  annotated images → percentage / flag
///   └──────────┘
/// ```

pub mod labels;
pub mod loader;
pub mod model;
pub mod paths;
pub mod status;
