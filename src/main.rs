//! viewkit CLI entrypoint
//! Renders view model files, resolves template names and reports the server URL.
#![deny(unsafe_code)]

// Internal imports (std, crate)
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use viewkit::core::error::Error;
use viewkit::helpers::{RequestPath, ServerEnv};
use viewkit::resolver::{Resolver, TemplateSource};
use viewkit::{ModelKind, ViewConfig, ViewModel};

// External imports (alphabetized)
use anyhow::Context;
use clap::Parser;
use tracing::{Level, debug, error, info};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "viewkit")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Configuration file (TOML, or YAML by extension)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(clap::Subcommand, Debug)]
enum Commands {
    /// Render a view model described in a JSON file
    Render {
        /// Path to the view model JSON
        model: PathBuf,
        /// Render with the JSON renderer
        #[arg(long, conflicts_with = "console")]
        json: bool,
        /// Render with the console renderer
        #[arg(long)]
        console: bool,
        /// Wrap JSON output in a JSONP callback
        #[arg(long)]
        jsonp: Option<String>,
        /// Merge children without a capture key into their parent
        #[arg(long)]
        merge_unnamed_children: bool,
        /// Pretty-print JSON output
        #[arg(long)]
        pretty: bool,
    },
    /// Resolve a template name through the configured resolvers
    Resolve {
        /// Template name
        name: String,
    },
    /// Print the URL of the current server from CGI-style environment variables
    ServerUrl {
        /// Trust X-Forwarded-* headers
        #[arg(long)]
        use_proxy: bool,
        /// Append the current REQUEST_URI
        #[arg(long, conflicts_with = "path")]
        request_uri: bool,
        /// Append an explicit path
        #[arg(long)]
        path: Option<String>,
    },
}

fn main() -> anyhow::Result<ExitCode> {
    // Logs go to stderr so rendered output stays clean on stdout
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive(Level::INFO.into()))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let config = load_config(cli.config.as_deref())?;

    match cli.command {
        Commands::Render {
            model,
            json,
            console,
            jsonp,
            merge_unnamed_children,
            pretty,
        } => {
            let kind = if json {
                Some(ModelKind::Json)
            } else if console {
                Some(ModelKind::Console)
            } else {
                None
            };
            render(
                &config,
                &model,
                RenderFlags {
                    kind,
                    jsonp,
                    merge_unnamed_children,
                    pretty,
                },
            )
        }
        Commands::Resolve { name } => resolve(&config, &name),
        Commands::ServerUrl {
            use_proxy,
            request_uri,
            path,
        } => {
            let mut server_url = config.build_server_url(ServerEnv::from_process_env());
            if use_proxy {
                server_url.set_use_proxy(true);
            }
            let path = match path {
                Some(path) => RequestPath::Explicit(path),
                None => RequestPath::from(request_uri),
            };
            println!("{}", server_url.url(path));
            Ok(ExitCode::SUCCESS)
        }
    }
}

fn load_config(path: Option<&Path>) -> anyhow::Result<ViewConfig> {
    let mut config = ViewConfig::load_or_default(path).context("Failed to load configuration")?;
    if let Some(base) = path.and_then(Path::parent) {
        config.resolve_relative_to(base);
    }
    Ok(config)
}

struct RenderFlags {
    kind: Option<ModelKind>,
    jsonp: Option<String>,
    merge_unnamed_children: bool,
    pretty: bool,
}

fn render(config: &ViewConfig, model_path: &Path, flags: RenderFlags) -> anyhow::Result<ExitCode> {
    let content = std::fs::read_to_string(model_path)
        .with_context(|| format!("Failed to read view model {}", model_path.display()))?;
    let mut model: ViewModel = serde_json::from_str(&content)
        .with_context(|| format!("Failed to parse view model {}", model_path.display()))?;
    if let Some(kind) = flags.kind {
        model.set_kind(kind);
    }
    info!(model = %model_path.display(), kind = %model.kind(), "Rendering view model");

    let mut view = config.build_view(ServerEnv::from_process_env());
    {
        let json = view.json_renderer_mut();
        if let Some(callback) = &flags.jsonp {
            json.set_jsonp_callback(callback);
        }
        if flags.merge_unnamed_children {
            json.set_merge_unnamed_children(true);
        }
        if flags.pretty {
            json.set_pretty_print(true);
        }
    }

    let rendered = match view.render(model) {
        Ok(rendered) => rendered,
        Err(e @ Error::TemplateNotFound { .. }) => {
            error!("{e}");
            return Ok(ExitCode::FAILURE);
        }
        Err(e) => return Err(e).context("Failed to render view model"),
    };
    debug!(content_type = rendered.content_type, "Rendered view");

    print!("{}", rendered.content);
    if !rendered.content.ends_with('\n') {
        println!();
    }

    Ok(match rendered.error_level {
        Some(level) if level != 0 => ExitCode::from(u8::try_from(level).unwrap_or(1)),
        _ => ExitCode::SUCCESS,
    })
}

fn resolve(config: &ViewConfig, name: &str) -> anyhow::Result<ExitCode> {
    let resolver = config.build_resolver();
    let source = resolver
        .resolve(name)
        .with_context(|| format!("Failed to resolve template \"{name}\""))?;

    match source {
        Some(TemplateSource::Path(path)) => {
            println!("{}", path.display());
            Ok(ExitCode::SUCCESS)
        }
        Some(source @ TemplateSource::Inline(_)) => {
            println!("{source}");
            Ok(ExitCode::SUCCESS)
        }
        None => {
            let failure = resolver
                .last_lookup_failure()
                .map(|failure| failure.to_string())
                .unwrap_or_else(|| "not found".to_string());
            error!(template = %name, reason = %failure, "Template could not be resolved");
            eprintln!("Template \"{name}\" could not be resolved ({failure})");
            Ok(ExitCode::FAILURE)
        }
    }
}
