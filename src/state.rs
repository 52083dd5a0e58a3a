use crate::data::model::{AnnotationImage, AnnotationPackage};

// ---------------------------------------------------------------------------
// Package list state
// ---------------------------------------------------------------------------

/// The loaded packages and their selection, independent of any front end.
#[derive(Debug, Default)]
pub struct PackageList {
    packages: Vec<AnnotationPackage>,
}

impl PackageList {
    pub fn new(packages: Vec<AnnotationPackage>) -> Self {
        Self { packages }
    }

    /// Replace the list. An empty batch keeps what is already loaded.
    pub fn set_packages(&mut self, packages: Vec<AnnotationPackage>) {
        if !packages.is_empty() {
            self.packages = packages;
        }
    }

    pub fn all_packages(&self) -> &[AnnotationPackage] {
        &self.packages
    }

    pub fn selected_packages(&self) -> Vec<&AnnotationPackage> {
        self.packages.iter().filter(|p| p.selected).collect()
    }

    /// Images of every extracted package that has been opened.
    pub fn all_images(&self) -> Vec<&AnnotationImage> {
        self.packages
            .iter()
            .filter(|p| p.extracted)
            .filter_map(|p| p.images.as_deref())
            .flatten()
            .collect()
    }

    /// Selected images of selected, extracted packages.
    pub fn selected_images(&self) -> Vec<&AnnotationImage> {
        self.packages
            .iter()
            .filter(|p| p.extracted && p.selected)
            .filter_map(|p| p.images.as_deref())
            .flatten()
            .filter(|img| img.selected)
            .collect()
    }

    pub fn select_all(&mut self) {
        for p in &mut self.packages {
            p.selected = true;
        }
    }

    pub fn deselect_all(&mut self) {
        for p in &mut self.packages {
            p.selected = false;
        }
    }

    /// Flip the selection of one package. Returns the new state, or `None`
    /// when the index is out of range.
    pub fn toggle_selected(&mut self, index: usize) -> Option<bool> {
        let p = self.packages.get_mut(index)?;
        p.selected = !p.selected;
        Some(p.selected)
    }

    /// Recompute the status of every opened package.
    pub fn refresh_status(&mut self) {
        for p in &mut self.packages {
            p.update_annotation_status();
        }
    }

    pub fn len(&self) -> usize {
        self.packages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.packages.is_empty()
    }
}
