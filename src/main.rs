use chrono::Local;
use clap::Parser;
use csvexporttool::config::unescape_separator;
use csvexporttool::output::{ErrorResponse, SuccessResponse};
use csvexporttool::{
    CsvExportError, CsvExporter, ExportConfig, ExportForm, FileDownloader, GridSnapshot,
    LogNotifier,
};
use std::path::{Path, PathBuf};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Config file read when --config is not given
const DEFAULT_CONFIG_FILE: &str = "csvexport.conf";

/// CSV Export - Export the rows of a data grid snapshot to a CSV file
#[derive(Parser, Debug)]
#[command(name = "csvexporttool")]
#[command(about = "Export the selected rows (or all rows) of a data grid to a CSV file")]
#[command(
    version,
    after_help = "Tool will print the export result in JSON format.\nSeparators given as letters are ignored and the default is kept."
)]
struct Args {
    /// Path to the grid snapshot (JSON)
    #[arg(short = 'i', long = "input", required = true)]
    input: PathBuf,

    /// Subject used for the default file name (<subject>_<date>)
    #[arg(short = 's', long = "subject", default_value = "export")]
    subject: String,

    /// File name without extension (overrides the default name)
    #[arg(short = 'f', long = "filename")]
    filename: Option<String>,

    /// Field separator, "\t" for tab
    #[arg(long = "field-separator")]
    field_separator: Option<String>,

    /// Quote character
    #[arg(long = "quote-character")]
    quote_character: Option<String>,

    /// Decimal separator ("." or ",")
    #[arg(long = "decimal-separator")]
    decimal_separator: Option<String>,

    /// Comma separated column ids to export (default: visible columns)
    #[arg(long = "columns", value_delimiter = ',')]
    columns: Option<Vec<String>>,

    /// Directory the CSV file is written to
    #[arg(short = 'o', long = "output-dir")]
    output_dir: Option<PathBuf>,

    /// Path to config file (default: ./csvexport.conf)
    #[arg(short = 'c', long = "config")]
    config_file: Option<PathBuf>,

    /// Do not write a UTF-8 byte order mark
    #[arg(long = "no-bom")]
    no_bom: bool,
}

fn main() {
    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("csvexporttool=warn")),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let args = Args::parse();

    let config = match build_config(&args) {
        Ok(config) => config,
        Err(e) => exit_with(ErrorResponse::new(e.error_type()).with_internal_message(e.to_string())),
    };

    let grid = match GridSnapshot::from_file(&args.input) {
        Ok(grid) => grid,
        Err(e) => exit_with(ErrorResponse::new(e.error_type()).with_internal_message(e.to_string())),
    };

    // Build the form the way a user would fill it in
    let mut form = ExportForm::open_with(&grid, &args.subject, Local::now().date_naive(), &config);
    if let Some(ref filename) = args.filename {
        form.set_filename(filename);
    }
    if let Some(ref sep) = args.field_separator {
        form.set_field_separator(&unescape_separator(sep));
    }
    if let Some(ref quote) = args.quote_character {
        form.set_quote_character(&unescape_separator(quote));
    }
    if let Some(ref decimal) = args.decimal_separator {
        form.set_decimal_separator(decimal);
    }
    if let Some(ref columns) = args.columns {
        form.select_only(columns);
    }

    let notifier = LogNotifier;
    let downloader = FileDownloader::new(&config.output_dir);
    let exporter = CsvExporter::new(&notifier, &downloader).with_bom(config.use_bom);

    match exporter.export(&form, &grid) {
        Ok(outcome) => println!("{}", SuccessResponse::from_outcome(&outcome).to_json()),
        Err(e) => exit_with(
            ErrorResponse::new(e.error_type())
                .with_internal_message(e.to_string())
                .with_separators(
                    form.field_separator(),
                    form.quote_character(),
                    form.decimal_separator(),
                )
                .with_file_name(form.filename().to_string()),
        ),
    }
}

fn exit_with(response: ErrorResponse) -> ! {
    println!("{}", response.to_json());
    std::process::exit(1);
}

fn build_config(args: &Args) -> Result<ExportConfig, CsvExportError> {
    // Priority: CLI args > config file > environment variables > defaults
    let mut config = ExportConfig::from_env()?;

    if let Some(ref config_path) = args.config_file {
        if !config_path.exists() {
            return Err(CsvExportError::ConfigError(format!(
                "Config file not found: {}",
                config_path.display()
            )));
        }
        config = config.with_file(config_path)?;
    } else if Path::new(DEFAULT_CONFIG_FILE).exists() {
        config = config.with_file(DEFAULT_CONFIG_FILE)?;
    }

    if let Some(ref dir) = args.output_dir {
        config.output_dir = dir.clone();
    }
    if args.no_bom {
        config.use_bom = false;
    }

    tracing::debug!(?config, "Export configuration");
    Ok(config)
}
