use std::path::{Path, PathBuf};

/// Image extensions picked up when scanning a package.
pub const IMAGE_EXTENSIONS: [&str; 2] = ["png", "jpg"];

/// Label sidecar for an image: same path, `.txt` extension.
pub fn label_path(image_path: &Path) -> PathBuf {
    image_path.with_extension("txt")
}

pub fn is_image_file(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|e| {
            let ext = e.to_ascii_lowercase();
            IMAGE_EXTENSIONS.contains(&ext.as_str())
        })
        .unwrap_or(false)
}
