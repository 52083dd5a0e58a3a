use std::io;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use log::{info, warn};

use yolo_packages::PackageList;
use yolo_packages::data::{labels, loader, paths};
use yolo_packages::report::{self, ReportFormat, StatusRow};

#[derive(Debug, Parser)]
#[command(
    name = "yolo-packages",
    version,
    about = "Annotation package status and YOLO label files"
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Print the annotation status of package directories and `.zip` archives.
    Status {
        #[arg(required = true)]
        dirs: Vec<PathBuf>,
        #[arg(short, long, value_enum, default_value_t = ReportFormat::Table)]
        format: ReportFormat,
    },
    /// Write label sidecar files from a package info JSON file.
    WriteLabels {
        info: PathBuf,
        /// Directory relative image paths are resolved against
        /// (defaults to the JSON file's directory).
        #[arg(long)]
        base_dir: Option<PathBuf>,
    },
    /// Print the labels of one image in normalised form.
    Show { image: PathBuf },
}

fn main() -> Result<()> {
    env_logger::init();

    match Cli::parse().command {
        Command::Status { dirs, format } => status(&dirs, format),
        Command::WriteLabels { info, base_dir } => write_labels(info, base_dir),
        Command::Show { image } => show(image),
    }
}

fn status(dirs: &[PathBuf], format: ReportFormat) -> Result<()> {
    let mut packages = Vec::with_capacity(dirs.len());
    for dir in dirs {
        packages.push(loader::list_package(dir)?);
    }

    let mut list = PackageList::default();
    list.set_packages(packages);
    info!(
        "{} package(s), {} image(s)",
        list.len(),
        list.all_images().len()
    );

    let rows: Vec<StatusRow> = list.all_packages().iter().map(StatusRow::from_package).collect();
    let stdout = io::stdout();
    report::write_report(&mut stdout.lock(), &rows, format)
}

fn write_labels(info_path: PathBuf, base_dir: Option<PathBuf>) -> Result<()> {
    let info = loader::load_package_info(&info_path)
        .with_context(|| format!("loading {}", info_path.display()))?;
    let base_dir = base_dir
        .or_else(|| info_path.parent().map(PathBuf::from))
        .unwrap_or_default();

    let written = loader::write_labels(&info, &base_dir)?;
    if written == 0 {
        warn!("{} contains no image labels", info_path.display());
    }
    println!("{written} label file(s) written");
    Ok(())
}

fn show(image: PathBuf) -> Result<()> {
    let boxes = loader::read_boxes(&paths::label_path(&image))?;
    print!("{}", labels::serialize(&boxes));
    Ok(())
}
