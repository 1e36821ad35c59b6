//! Command-line front end.
//!
//! One run loads the dataset, computes every view, renders and saves the
//! figure, offers it to a viewer, and prints the report. Any failure stops the
//! run before later stages execute.

mod logging;

pub use logging::log;

use crate::aggregate::Analysis;
use crate::dataset;
use crate::export;
use crate::render::{PlotTheme, Renderer};
use crate::report;
use clap::Parser;
use probcond_common::cli::styles;
use probcond_common::{CommonArgs, OutputFormat, ProbcondError, Result, Verbosity};
use std::io::IsTerminal;
use std::path::{Path, PathBuf};

/// Plot and summarize conditional-inference benchmark results.
#[derive(Parser, Debug, Clone, PartialEq)]
#[command(name = "probcond-viz")]
#[command(about = "Plot and summarize conditional-inference benchmark results")]
#[command(version)]
pub struct Cli {
    /// Benchmark results CSV exported by the inference program
    pub input: Option<PathBuf>,

    /// YAML file overriding figure theme settings
    #[arg(long, value_name = "FILE")]
    pub theme: Option<PathBuf>,

    /// Save the figure without opening a viewer
    #[arg(long)]
    pub no_show: bool,

    #[command(flatten)]
    pub common: CommonArgs,
}

/// Parse CLI arguments from a string slice (for testing)
pub fn parse_args<I, T>(args: I) -> std::result::Result<Cli, clap::Error>
where
    I: IntoIterator<Item = T>,
    T: Into<std::ffi::OsString> + Clone,
{
    Cli::try_parse_from(args)
}

/// Short usage shown when no input file is given.
pub fn usage() -> String {
    [
        "Uso: probcond-viz <archivo_csv>",
        "",
        "Ejemplo: probcond-viz results.csv",
        "",
        "Ejecuta 'probcond-viz --help' para ver todas las opciones.",
    ]
    .join("\n")
}

/// Extra guidance for errors the user can fix by producing data first.
pub fn remediation(err: &ProbcondError) -> Option<&'static str> {
    match err {
        ProbcondError::DatasetNotFound { .. } => Some(
            "Para generar el archivo CSV:\n  \
             1. Ejecuta el programa principal\n  \
             2. Selecciona opción 4 (Performance Analysis)\n  \
             3. Exporta los resultados a CSV",
        ),
        _ => None,
    }
}

/// Run the whole pipeline on `input`. Returns the path of the saved figure.
pub fn run(input: &Path, args: &Cli) -> Result<PathBuf> {
    let config = args.common.to_cli();
    // JSON goes to stdout unmixed with progress lines.
    let progress = match config.format {
        OutputFormat::Json => Verbosity::Quiet,
        OutputFormat::Table => config.verbosity,
    };

    let theme = match &args.theme {
        Some(path) => {
            log(progress, Verbosity::Verbose, &format!("Tema: {}", path.display()));
            PlotTheme::load(path)?
        }
        None => PlotTheme::default(),
    };

    log(progress, Verbosity::Normal, &styles::header("probcond-viz"));
    log(progress, Verbosity::Normal, &format!("Cargando datos desde: {}", input.display()));
    let dataset = dataset::load(input)?;
    log(progress, Verbosity::Verbose, &format!("{} mediciones cargadas", dataset.len()));

    let analysis = Analysis::from_dataset(&dataset);
    log(
        progress,
        Verbosity::Verbose,
        &format!(
            "{} grupos por interés, {} por condicionadas, {} configuraciones",
            analysis.by_interest.len(),
            analysis.by_conditioned.len(),
            analysis.by_configuration.len()
        ),
    );

    let renderer = Renderer::new(theme);
    log(
        progress,
        Verbosity::Verbose,
        &format!("Renderizando figura {}x{}", renderer.theme().width, renderer.theme().height),
    );
    let figure = renderer.render(&analysis)?;

    let output = export::output_path(input);
    export::write_png(&figure, &output)?;
    log(progress, Verbosity::Normal, &styles::success(&format!("Gráficos guardados en: {}", output.display())));

    show(&output, args.no_show, progress);

    match config.format {
        OutputFormat::Table => println!("\n{}", report::render_text(&analysis)),
        OutputFormat::Json => println!("{}", report::render_json(&analysis)?),
    }

    Ok(output)
}

fn show(path: &Path, no_show: bool, progress: Verbosity) {
    let interactive = std::io::stdout().is_terminal();
    match export::viewer_skip(no_show, interactive, export::display_available()) {
        Some(skip) => log(progress, Verbosity::Verbose, &format!("Visor omitido: {}", skip.reason())),
        None => {
            if let Err(e) = export::open_viewer(path) {
                if progress != Verbosity::Quiet {
                    eprintln!("{}", styles::warning(&format!("could not open image viewer: {e}")));
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::ffi::OsString;

    #[test]
    fn test_parse_positional_input() {
        let cli = parse_args(["probcond-viz", "results.csv"]).unwrap();
        assert_eq!(cli.input, Some(PathBuf::from("results.csv")));
        assert!(!cli.no_show);
        assert_eq!(cli.theme, None);
        assert_eq!(cli.common.format, OutputFormat::Table);
    }

    #[test]
    fn test_input_is_optional_at_parse_time() {
        let cli = parse_args(["probcond-viz"]).unwrap();
        assert_eq!(cli.input, None);
    }

    #[test]
    fn test_parse_all_flags() {
        let cli =
            parse_args(["probcond-viz", "r.csv", "--theme", "dark.yaml", "--no-show", "-v", "-f", "json"]).unwrap();
        assert_eq!(cli.theme, Some(PathBuf::from("dark.yaml")));
        assert!(cli.no_show);
        assert_eq!(cli.common.to_cli().verbosity, Verbosity::Verbose);
        assert_eq!(cli.common.format, OutputFormat::Json);
    }

    #[test]
    fn test_quiet_and_verbose_conflict() {
        assert!(parse_args(["probcond-viz", "r.csv", "-q", "-v"]).is_err());
    }

    #[test]
    fn test_unknown_format_rejected() {
        assert!(parse_args(["probcond-viz", "r.csv", "--format", "xml"]).is_err());
    }

    #[test]
    fn test_usage_mentions_example() {
        let text = usage();
        assert!(text.starts_with("Uso:"));
        assert!(text.contains("Ejemplo:"));
    }

    #[test]
    fn test_remediation_only_for_missing_dataset() {
        let missing = ProbcondError::DatasetNotFound { path: "x.csv".into() };
        assert!(remediation(&missing).unwrap().contains("3. Exporta los resultados a CSV"));

        let other = ProbcondError::Serialization { message: "boom".into() };
        assert!(remediation(&other).is_none());
    }

    #[test]
    fn test_run_stops_before_export_on_bad_input() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("results.csv");
        std::fs::write(&input, "").unwrap();
        let args = parse_args(["probcond-viz", "--no-show", "-q"]).unwrap();

        let err = run(&input, &args).unwrap_err();
        assert!(matches!(err, ProbcondError::DatasetUnparseable { .. }));
        assert!(!export::output_path(&input).exists());
    }

    #[test]
    fn test_run_reports_missing_theme() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("results.csv");
        let theme = dir.path().join("theme.yaml");
        let args = parse_args(vec![
            OsString::from("probcond-viz"),
            "--no-show".into(),
            "-q".into(),
            "--theme".into(),
            theme.into_os_string(),
        ])
        .unwrap();

        assert!(matches!(run(&input, &args), Err(ProbcondError::ConfigNotFound { .. })));
    }
}
