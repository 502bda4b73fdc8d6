use std::fs;
use std::path::PathBuf;

use clap::Parser;
use color_eyre::eyre::{Context, Result};
use regex::Regex;
use struct_doc_lib::{
    Components, Generator, GeneratorConfig, OpenapiGenerator, ReferenceDescriptions, Schema,
};
use tracing_subscriber::{filter::EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser, Debug)]
#[command(
    name = "struct-doc",
    version,
    about = "Generate OpenAPI component schemas from Rust structs"
)]
struct Cli {
    /// Rust source files or directories to read
    #[arg(value_name = "LOCATION", required = true, num_args = 1..)]
    locations: Vec<String>,

    /// Regular expression selecting the struct names to document
    #[arg(long, short = 'f', default_value = ".*")]
    filter: String,

    /// Attribute whose `rename` overrides property names [default: serde]
    #[arg(long, value_name = "KEY")]
    tag_key: Option<String>,

    /// Keep field descriptions next to `$ref` properties
    #[arg(long)]
    keep_ref_descriptions: bool,

    /// Do not look for structs declared inside method bodies
    #[arg(long)]
    skip_methods: bool,

    /// TOML file with generator settings; flags take precedence
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Emit an OpenAPI `components` document instead of a schema list
    #[arg(long)]
    components: bool,

    /// Write the output to a file instead of stdout
    #[arg(long, short = 'o', value_name = "FILE")]
    output: Option<PathBuf>,

    /// Increase log verbosity (-v, -vv, -vvv)
    #[arg(short = 'v', long = "verbose", action = clap::ArgAction::Count)]
    verbose: u8,
}

impl Cli {
    /// Builds the generator settings: the config file first, then flags.
    fn generator_config(&self) -> Result<GeneratorConfig> {
        let mut config = match &self.config {
            Some(path) => {
                let raw = fs::read_to_string(path)
                    .wrap_err_with(|| format!("Failed to read config file {}", path.display()))?;
                toml::from_str(&raw)
                    .wrap_err_with(|| format!("Invalid config file {}", path.display()))?
            }
            None => GeneratorConfig::default(),
        };

        if let Some(key) = &self.tag_key {
            config = config.tag_key(key);
        }
        if self.keep_ref_descriptions {
            config = config.reference_descriptions(ReferenceDescriptions::Keep);
        }
        if self.skip_methods {
            config = config.skip_methods();
        }

        Ok(config)
    }
}

/// Initialize tracing subscriber based on verbosity
fn init_tracing(verbose: u8) {
    // RUST_LOG wins; otherwise default to WARN and let -v flags raise it
    let base_filter = match std::env::var("RUST_LOG") {
        Ok(filter) => filter,
        Err(_) => match verbose {
            0 => "warn".to_string(),
            1 => "warn,struct_doc_lib=info".to_string(),
            2 => "info,struct_doc_lib=debug".to_string(),
            _ => "debug,struct_doc_lib=trace".to_string(),
        },
    };

    let filter = EnvFilter::try_new(&base_filter).unwrap_or_else(|_| EnvFilter::new("warn"));

    // logs go to stderr so stdout stays valid JSON
    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_target(true)
                .with_level(true)
                .with_writer(std::io::stderr)
                .compact(),
        )
        .init();
}

fn render(schemas: Vec<Schema>, components: bool) -> Result<String> {
    let rendered = if components {
        serde_json::to_string_pretty(&Components::from_schemas(schemas).to_document())?
    } else {
        serde_json::to_string_pretty(&schemas)?
    };
    Ok(rendered)
}

fn main() -> Result<()> {
    color_eyre::install()?;

    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let filter = Regex::new(&cli.filter)
        .wrap_err_with(|| format!("Invalid name filter `{}`", cli.filter))?;
    let config = cli.generator_config()?;
    let locations: Vec<&str> = cli.locations.iter().map(String::as_str).collect();

    let schemas = OpenapiGenerator::new()
        .config(config)
        .document_struct(&filter, &locations)?;
    let count = schemas.len();
    let rendered = render(schemas, cli.components)?;

    match &cli.output {
        Some(path) => {
            fs::write(path, format!("{rendered}\n"))
                .wrap_err_with(|| format!("Failed to write {}", path.display()))?;
            tracing::info!(count, path = %path.display(), "Wrote schemas");
        }
        None => println!("{rendered}"),
    }

    Ok(())
}
