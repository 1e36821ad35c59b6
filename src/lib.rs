//! # probcond-viz
//!
//! Performance analysis for a conditional-probability inference engine.
//!
//! The engine's benchmark mode exports one CSV row per query with the number
//! of interest, conditioned and (optionally) marginalized variables, the wall
//! time in microseconds and the number of joint states evaluated. This crate
//! turns such a file into a four-panel summary figure and a statistics report.
//!
//! ```text
//! dataset::load ─► Analysis::from_dataset ─┬─► Renderer::render ─► export::write_png
//!                                          └─► report::render_text
//! ```
//!
//! ## Example
//!
//! ```no_run
//! use probcond_viz::{dataset, export, report, Analysis, Renderer};
//! use std::path::Path;
//!
//! let input = Path::new("results.csv");
//! let analysis = Analysis::from_dataset(&dataset::load(input)?);
//!
//! let figure = Renderer::default().render(&analysis)?;
//! export::write_png(&figure, &export::output_path(input))?;
//! println!("{}", report::render_text(&analysis));
//! # Ok::<(), probcond_common::ProbcondError>(())
//! ```

pub mod aggregate;
pub mod cli;
pub mod dataset;
pub mod export;
pub mod render;
pub mod report;
pub mod stats;

pub use aggregate::{Analysis, ConfigurationStat, GroupKey, GroupedStat, PivotTable, ScatterPoint};
pub use dataset::{Dataset, Measurement};
pub use render::{Figure, PlotTheme, Renderer};
pub use stats::Summary;
