use std::error::Error;
use std::fmt;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use log::info;
use tracing_subscriber::EnvFilter;

use whisky_catalog::config::{self, CatalogConfig};
use whisky_catalog::html::HtmlRenderer;
use whisky_catalog::pdf::PdfRenderer;
use whisky_catalog::report::Report;
use whisky_catalog::server;

/// Builds the whisky tasting dashboard and serves or exports it.
///
/// Settings come from the defaults, then the `WHISKY_CATALOG_*` environment
/// variables, then the flags below. PDF export needs the Roboto family under
/// `assets/fonts`, in `WHISKY_CATALOG_FONTS_DIR`, or a system Liberation Sans.
#[derive(Parser)]
#[command(author, version, about = "Whisky tasting dashboard")]
struct Cli {
    /// Distillery CSV to load.
    #[arg(long, global = true, value_name = "PATH")]
    data: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Serve the dashboard over HTTP (the default).
    Serve {
        /// Socket address to bind, e.g. 127.0.0.1:8050.
        #[arg(long, value_name = "ADDR")]
        addr: Option<String>,

        /// URL or path of the Plotly script the page loads.
        #[arg(long, value_name = "URL")]
        plotly_src: Option<String>,
    },

    /// Write the dashboard as a standalone HTML file.
    #[command(name = "export-html")]
    ExportHtml {
        #[arg(long, value_name = "PATH")]
        out: PathBuf,

        /// URL or path of the Plotly script the page loads.
        #[arg(long, value_name = "URL")]
        plotly_src: Option<String>,
    },

    /// Write the dashboard as a PDF with vector charts.
    #[command(name = "export-pdf", aliases = ["export_pdf", "pdf"])]
    ExportPdf {
        #[arg(long, value_name = "PATH")]
        out: PathBuf,
    },

    /// Write the distillery table with the derived metric columns.
    #[command(name = "export-table", aliases = ["export_table", "table"])]
    ExportTable {
        #[arg(long, value_name = "PATH")]
        out: PathBuf,
    },
}

/// An output file could not be written.
#[derive(Debug)]
struct OutputError {
    path: PathBuf,
    source: io::Error,
}

impl fmt::Display for OutputError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Failed to write {}", self.path.display())
    }
}

impl Error for OutputError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        Some(&self.source)
    }
}

fn main() {
    init_logging();
    let cli = Cli::parse();

    if let Err(err) = run(cli) {
        eprintln!("Error: {}", err);
        print_error_sources(err.as_ref());
        std::process::exit(1);
    }
}

fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn run(cli: Cli) -> Result<(), Box<dyn Error>> {
    let mut settings = CatalogConfig::from_env()?;
    if let Some(path) = cli.data {
        settings = settings.with_data_path(path);
    }

    let command = cli.command.unwrap_or(Commands::Serve {
        addr: None,
        plotly_src: None,
    });
    let report = Report::load(settings.data_path())?;

    match command {
        Commands::Serve { addr, plotly_src } => {
            if let Some(addr) = addr {
                settings = settings.with_addr(config::parse_addr(&addr)?);
            }
            if let Some(src) = plotly_src {
                settings = settings.with_plotly_src(src);
            }
            let html = HtmlRenderer::new(settings.plotly_src()).render(report.page());
            let runtime = tokio::runtime::Builder::new_current_thread()
                .enable_all()
                .build()?;
            runtime.block_on(server::serve(settings.addr(), html))?;
        }
        Commands::ExportHtml { out, plotly_src } => {
            if let Some(src) = plotly_src {
                settings = settings.with_plotly_src(src);
            }
            let html = HtmlRenderer::new(settings.plotly_src()).render(report.page());
            write_output(&out, html.as_bytes())?;
        }
        Commands::ExportPdf { out } => {
            let renderer = PdfRenderer::new();
            let rendered = renderer.render(report.page())?;
            write_output(&out, &rendered.bytes)?;
        }
        Commands::ExportTable { out } => {
            let mut table = Vec::new();
            report.catalog().write_csv(&mut table)?;
            write_output(&out, &table)?;
        }
    }

    Ok(())
}

fn write_output(path: &Path, bytes: &[u8]) -> Result<(), OutputError> {
    fs::write(path, bytes).map_err(|source| OutputError {
        path: path.to_owned(),
        source,
    })?;
    info!("wrote {} ({} bytes)", path.display(), bytes.len());
    Ok(())
}

fn print_error_sources(mut error: &(dyn Error + 'static)) {
    while let Some(source) = error.source() {
        eprintln!("  caused by: {}", source);
        error = source;
    }
}
