use std::io::Write;

use anyhow::{Context, Result};
use clap::ValueEnum;
use serde::Serialize;

use crate::data::model::AnnotationPackage;
use crate::data::status::PackageState;

// ---------------------------------------------------------------------------
// Status rows
// ---------------------------------------------------------------------------

/// One line of a package status listing.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StatusRow {
    pub name: String,
    pub path: String,
    pub state: PackageState,
    pub images: usize,
    pub annotated_images: usize,
    pub annotation_percentage: f64,
    pub is_annotated: bool,
}

impl StatusRow {
    pub fn from_package(package: &AnnotationPackage) -> Self {
        Self {
            name: package.display_name.clone(),
            path: package.package_path.display().to_string(),
            state: PackageState::of(package),
            images: package.image_count(),
            annotated_images: package.annotated_image_count(),
            annotation_percentage: package.info.annotation_percentage,
            is_annotated: package.info.is_annotated,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum ReportFormat {
    #[default]
    Table,
    Json,
    Csv,
}

// ---------------------------------------------------------------------------
// Rendering
// ---------------------------------------------------------------------------

pub fn write_report<W: Write>(out: &mut W, rows: &[StatusRow], format: ReportFormat) -> Result<()> {
    match format {
        ReportFormat::Table => write_table(out, rows),
        ReportFormat::Json => {
            serde_json::to_writer_pretty(&mut *out, rows).context("writing JSON report")?;
            writeln!(out)?;
            Ok(())
        }
        ReportFormat::Csv => write_csv(out, rows),
    }
}

fn write_table<W: Write>(out: &mut W, rows: &[StatusRow]) -> Result<()> {
    let name_width = rows
        .iter()
        .map(|r| r.name.chars().count())
        .max()
        .unwrap_or(0)
        .max("PACKAGE".len());

    writeln!(
        out,
        "{:<name_width$}  {:<9}  {:>6}  {:>9}  {:>7}",
        "PACKAGE", "STATE", "IMAGES", "ANNOTATED", "PERCENT"
    )?;
    for r in rows {
        writeln!(
            out,
            "{:<name_width$}  {:<9}  {:>6}  {:>9}  {:>6.1}%",
            r.name,
            r.state.to_string(),
            r.images,
            r.annotated_images,
            r.annotation_percentage
        )?;
    }
    Ok(())
}

fn write_csv<W: Write>(out: &mut W, rows: &[StatusRow]) -> Result<()> {
    let mut writer = csv::Writer::from_writer(out);
    for r in rows {
        writer.serialize(r).context("writing CSV row")?;
    }
    writer.flush().context("flushing CSV report")?;
    Ok(())
}
