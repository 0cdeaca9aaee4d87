use clap::{Parser, Subcommand, ValueEnum};
use quasar_scene::{
    classify, convert_with_settings, parse_component, ConvertError, FontCatalog, Settings,
};
use std::fs;
use std::path::{Path, PathBuf};
use std::process;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "quasar-scene")]
#[command(about = "Convert Quasar/Vue component templates into design scene trees")]
#[command(version)]
struct Cli {
    /// Log pipeline details (same as RUST_LOG=debug)
    #[arg(long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Convert a .vue file and print the scene tree
    Convert {
        /// Input .vue file
        file: PathBuf,

        /// YAML or JSON settings file
        #[arg(long)]
        settings: Option<PathBuf>,

        #[arg(long, value_enum, default_value_t = Format::Json)]
        format: Format,
    },

    /// Show what the converter sees in a .vue file
    Inspect {
        /// Input .vue file
        file: PathBuf,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum Format {
    Json,
    Outline,
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let code = match cli.command {
        Command::Convert {
            file,
            settings,
            format,
        } => cmd_convert(&file, settings.as_deref(), format).await,
        Command::Inspect { file } => cmd_inspect(&file),
    };
    process::exit(code);
}

fn init_tracing(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn read_source(path: &Path) -> Result<String, ConvertError> {
    fs::read_to_string(path).map_err(ConvertError::from)
}

async fn cmd_convert(path: &Path, settings_path: Option<&Path>, format: Format) -> i32 {
    let settings = match settings_path.map(Settings::load).transpose() {
        Ok(settings) => settings.unwrap_or_default(),
        Err(e) => {
            print_error(&e);
            return 1;
        }
    };
    let source = match read_source(path) {
        Ok(source) => source,
        Err(e) => {
            print_error(&e);
            return 1;
        }
    };

    let backend = FontCatalog::inter();
    match convert_with_settings(&source, &settings, &backend).await {
        Ok(conversion) => {
            match format {
                Format::Json => match serde_json::to_string_pretty(&conversion) {
                    Ok(json) => println!("{json}"),
                    Err(e) => {
                        eprintln!("Failed to serialize scene: {e}");
                        return 1;
                    }
                },
                Format::Outline => print!("{}", conversion.root.outline()),
            }
            for class in &conversion.unrecognized_classes {
                eprintln!("note: class '{class}' was not recognized");
            }
            0
        }
        Err(failure) => {
            eprintln!("✗ {} could not be converted:", path.display());
            print_error(&failure.error);
            // The diagnostic node is still handed out.
            match format {
                Format::Json => {
                    if let Ok(json) = serde_json::to_string_pretty(&failure.diagnostic) {
                        println!("{json}");
                    }
                }
                Format::Outline => print!("{}", failure.diagnostic.outline()),
            }
            1
        }
    }
}

fn cmd_inspect(path: &Path) -> i32 {
    let document = match read_source(path).and_then(|source| parse_component(&source)) {
        Ok(document) => document,
        Err(e) => {
            eprintln!("✗ {} has errors:", path.display());
            print_error(&e);
            return 1;
        }
    };

    println!("Component: {}", document.name());
    if document.script.props.is_empty() {
        println!("Props: none");
    } else {
        println!("Props:");
        for prop in &document.script.props {
            let default = prop
                .default
                .as_ref()
                .map(|d| format!(" = {}", d.as_attribute()))
                .unwrap_or_default();
            let required = if prop.required { " (required)" } else { "" };
            println!("  {}: {:?}{default}{required}", prop.name, prop.prop_type);
        }
    }
    println!("Archetype: {}", classify(document.root()));
    println!("Template (line {}):", document.template_line);
    print!("{}", document.root().outline());
    0
}

fn print_error(error: &ConvertError) {
    match error {
        ConvertError::ParseError {
            line,
            column,
            message,
        } => {
            eprintln!("  Parse error at line {}, column {}:", line, column);
            eprintln!("    {}", message);
        }
        ConvertError::FontUnavailable {
            family,
            style,
            reason,
        } => {
            eprintln!("  Font '{} {}' unavailable:", family, style);
            eprintln!("    {}", reason);
        }
        ConvertError::Build { component, reason } => {
            eprintln!("  Failed to build '{}':", component);
            eprintln!("    {}", reason);
        }
        other => eprintln!("  {}", other),
    }
}
