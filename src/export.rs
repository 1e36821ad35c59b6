//! Writing the rendered figure to disk and handing it to a viewer.

use crate::render::Figure;
use image::codecs::png::PngEncoder;
use image::{ColorType, ImageEncoder, ImageError};
use probcond_common::{ProbcondError, Result};
use std::ffi::OsStr;
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

/// Suffix replacing the input file's extension.
pub const OUTPUT_SUFFIX: &str = "_plots.png";

/// Output image path for an input dataset: `dir/results.csv` becomes
/// `dir/results_plots.png`.
pub fn output_path(input: &Path) -> PathBuf {
    let stem = input.file_stem().unwrap_or_else(|| OsStr::new("results"));
    let mut name = stem.to_os_string();
    name.push(OUTPUT_SUFFIX);
    input.with_file_name(name)
}

/// Encode the figure as PNG at `path`, replacing any existing file.
///
/// The file is flushed and closed before this returns.
pub fn write_png(figure: &Figure, path: &Path) -> Result<()> {
    let expected = figure.width as usize * figure.height as usize * 3;
    if figure.pixels.len() != expected {
        return Err(ProbcondError::render(format!(
            "pixel buffer holds {} bytes, expected {expected} for {}x{}",
            figure.pixels.len(),
            figure.width,
            figure.height
        )));
    }

    let context = || format!("writing {}", path.display());
    let file = File::create(path).map_err(|e| ProbcondError::io(context(), e))?;
    let mut writer = BufWriter::new(file);

    PngEncoder::new(&mut writer)
        .write_image(&figure.pixels, figure.width, figure.height, ColorType::Rgb8)
        .map_err(|e| match e {
            ImageError::IoError(source) => ProbcondError::io(context(), source),
            other => ProbcondError::render(other),
        })?;

    writer.flush().map_err(|e| ProbcondError::io(context(), e))
}

/// Why the interactive viewer was not opened.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewerSkip {
    /// `--no-show` was given
    Disabled,
    /// Standard output is not a terminal
    NotInteractive,
    /// No graphical session is available
    NoDisplay,
}

impl ViewerSkip {
    pub fn reason(self) -> &'static str {
        match self {
            Self::Disabled => "display disabled by --no-show",
            Self::NotInteractive => "output is not a terminal",
            Self::NoDisplay => "no graphical display available",
        }
    }
}

/// Decide whether to open a viewer. `None` means go ahead.
pub fn viewer_skip(no_show: bool, interactive: bool, has_display: bool) -> Option<ViewerSkip> {
    if no_show {
        Some(ViewerSkip::Disabled)
    } else if !interactive {
        Some(ViewerSkip::NotInteractive)
    } else if !has_display {
        Some(ViewerSkip::NoDisplay)
    } else {
        None
    }
}

/// Whether a graphical session is reachable from this process.
pub fn display_available() -> bool {
    if cfg!(target_os = "linux") {
        ["DISPLAY", "WAYLAND_DISPLAY"].iter().any(|var| std::env::var_os(var).is_some_and(|v| !v.is_empty()))
    } else {
        true
    }
}

/// Launch the platform image viewer on `path` without waiting for it.
pub fn open_viewer(path: &Path) -> io::Result<()> {
    let mut command = viewer_command(path);
    command.stdin(Stdio::null()).stdout(Stdio::null()).stderr(Stdio::null());
    command.spawn().map(drop)
}

fn viewer_command(path: &Path) -> Command {
    if cfg!(target_os = "windows") {
        let mut command = Command::new("cmd");
        command.args(["/C", "start", ""]).arg(path);
        command
    } else if cfg!(target_os = "macos") {
        let mut command = Command::new("open");
        command.arg(path);
        command
    } else {
        let mut command = Command::new("xdg-open");
        command.arg(path);
        command
    }
}
