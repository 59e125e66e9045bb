use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use engineer_vault::catalog::{filter, suggestions, Catalog, YEAR_OPTIONS};
use engineer_vault::config::{
    default_config_path, find_config_file, load_config, write_config_file, Config,
};
use engineer_vault::models::{
    Category, Choice, FilterSelection, Level, RemoteBookRecord, ResourceRecord, ResourceType,
    ALL_LABEL,
};
use engineer_vault::session::{ShellAction, ShellCommand, VaultSession, HELP_TEXT};
use engineer_vault::sources::{BookSource, LookupOutcome, OpenLibrarySource};
use engineer_vault::utils::{
    book_lines, book_table, resource_lines, resource_table, NO_BOOKS_MESSAGE,
    NO_RESOURCES_MESSAGE,
};
use owo_colors::OwoColorize;
use std::io::{IsTerminal, Write};
use std::path::PathBuf;
use std::sync::Arc;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// EngineerVault - Browse engineering learning resources and look up books
#[derive(Parser, Debug)]
#[command(name = "engineer-vault")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Browse engineering learning resources and look up books", long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Enable verbose logging (can be used multiple times for more verbosity: -v, -vv)
    #[arg(long, short, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(long, short, global = true)]
    quiet: bool,

    /// Output format
    #[arg(long, short, value_enum, global = true, default_value_t = OutputFormat::Auto)]
    output: OutputFormat,

    /// Configuration file path
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Request timeout in seconds for remote lookups (overrides config)
    #[arg(long, global = true)]
    timeout: Option<u64>,

    /// Show all environment variables
    #[arg(long, global = true)]
    env: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

/// Output format for results
#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
enum OutputFormat {
    /// Automatic based on terminal (table if TTY, JSON otherwise)
    Auto,
    /// Table format (human-readable)
    Table,
    /// JSON format (machine-readable)
    Json,
    /// Plain text format
    Plain,
}

impl OutputFormat {
    fn resolve(self) -> OutputFormat {
        match self {
            OutputFormat::Auto if std::io::stdout().is_terminal() => OutputFormat::Table,
            OutputFormat::Auto => OutputFormat::Json,
            other => other,
        }
    }
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Filter the resource catalog
    #[command(alias = "b")]
    Browse {
        /// Text matched against titles and tags
        query: Option<String>,

        /// Category name or slug (e.g. "embedded-systems"), or "All"
        #[arg(long, short, default_value = ALL_LABEL)]
        category: Choice<Category>,

        /// File type (PDF, Blueprint, Code, Video), or "All"
        #[arg(long = "type", short = 't', default_value = ALL_LABEL)]
        kind: Choice<ResourceType>,

        /// Academic level (Beginner, Intermediate, Undergraduate, Research), or "All"
        #[arg(long, short, default_value = ALL_LABEL)]
        level: Choice<Level>,

        /// Publication year, or "All"
        #[arg(long, short, default_value = ALL_LABEL)]
        year: Choice<String>,
    },

    /// Search the remote book catalog
    #[command(alias = "lookup")]
    Books {
        /// Search query string
        query: String,

        /// Maximum number of results (overrides config)
        #[arg(long, short)]
        limit: Option<usize>,
    },

    /// List categories with resource counts
    #[command(alias = "ls")]
    Categories,

    /// Suggest tags matching a query
    Suggest {
        /// Partial tag text; omit for the default suggestions
        query: Option<String>,
    },

    /// Start the interactive browsing shell
    Shell {
        /// Look up books for every query line
        #[arg(long)]
        live: bool,
    },

    /// Show or create the configuration file
    Config {
        #[command(subcommand)]
        action: ConfigCommands,
    },
}

#[derive(Subcommand, Debug)]
enum ConfigCommands {
    /// Print the effective configuration
    Show,

    /// Write a default configuration file
    Init {
        /// Where to write the file (default: per-user config directory)
        #[arg(long)]
        path: Option<PathBuf>,

        /// Overwrite an existing file
        #[arg(long, short)]
        force: bool,
    },
}

/// Print all available environment variables
fn print_env_vars() {
    println!("EngineerVault - Environment Variables");
    println!();
    println!("Remote Lookup:");
    println!("  ENGINEER_VAULT_REMOTE__BASE_URL       Search API base URL (default: https://openlibrary.org)");
    println!("  ENGINEER_VAULT_REMOTE__SITE_BASE      Base URL for online view links (default: https://openlibrary.org)");
    println!("  ENGINEER_VAULT_REMOTE__ARCHIVE_BASE   Base URL for PDF downloads (default: https://archive.org/download)");
    println!("  ENGINEER_VAULT_REMOTE__RESULT_CAP     Maximum books kept per lookup (default: 10)");
    println!("  ENGINEER_VAULT_REMOTE__TIMEOUT_SECS   Request timeout in seconds (default: 5)");
    println!("  ENGINEER_VAULT_REMOTE__USER_AGENT     Custom User-Agent header");
    println!();
    println!("Display:");
    println!("  ENGINEER_VAULT_DISPLAY__MAX_TITLE_WIDTH  Title column width in tables (default: 50)");
    println!("  ENGINEER_VAULT_DISPLAY__COLOR            Colored shell prompt (default: true)");
    println!();
    println!("Logging:");
    println!("  ENGINEER_VAULT_LOGGING__LEVEL  Default log level (default: warn)");
    println!("  ENGINEER_VAULT_LOGGING__JSON   Emit JSON log lines (default: false)");
    println!("  RUST_LOG                       Rust logging filter, overrides everything above");
    println!();
    println!("Global Proxy Settings:");
    println!("  HTTP_PROXY / HTTPS_PROXY / NO_PROXY  Honored by the HTTP client");
    println!();
    println!("Example:");
    println!("  export ENGINEER_VAULT_REMOTE__RESULT_CAP=\"5\"");
}

fn init_tracing(cli: &Cli, config: &Config) {
    let level = if cli.quiet {
        "error"
    } else {
        match cli.verbose {
            0 => config.logging.level.as_str(),
            1 => "debug",
            _ => "trace",
        }
    };

    let filter = tracing_subscriber::EnvFilter::new(
        std::env::var("RUST_LOG").unwrap_or_else(|_| format!("engineer_vault={}", level)),
    );

    // Logs go to stderr so JSON output on stdout stays parseable
    if config.logging.json {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer().json().with_writer(std::io::stderr))
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
            .init();
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Show environment variables and exit if requested
    if cli.env {
        print_env_vars();
        return Ok(());
    }

    // Load configuration from file if specified or found in default locations
    let config_path = cli.config.clone().or_else(find_config_file);
    let mut config = load_config(config_path.as_deref()).with_context(|| match &config_path {
        Some(path) => format!("Failed to load config from {}", path.display()),
        None => "Failed to load config from environment".to_string(),
    })?;

    init_tracing(&cli, &config);
    if let Some(path) = &config_path {
        tracing::info!("Using config file: {}", path.display());
    }

    if let Some(timeout) = cli.timeout {
        config.remote.timeout_secs = timeout;
    }

    let catalog = Arc::new(Catalog::builtin());

    match cli.command {
        Some(Commands::Browse {
            query,
            category,
            kind,
            level,
            year,
        }) => {
            if let Choice::Only(ref year) = year {
                if !YEAR_OPTIONS.contains(&year.as_str()) {
                    tracing::debug!(%year, "year outside the offered options");
                }
            }

            let selection = browse_selection(query, category, kind, level, year);
            let visible = filter(catalog.resources(), &selection);
            output_resources(&visible, cli.output, config.display.max_title_width)?;
        }

        Some(Commands::Books { query, limit }) => {
            if let Some(limit) = limit {
                config.remote.result_cap = limit;
            }
            let source = OpenLibrarySource::from_config(&config.remote)?;

            let outcome = source.lookup(&query).await;
            if let LookupOutcome::Failed(ref err) = outcome {
                if !cli.quiet {
                    eprintln!("Book lookup failed: {}", err);
                }
            }
            output_books(&outcome.into_books(), cli.output, config.display.max_title_width)?;
        }

        Some(Commands::Categories) => {
            output_categories(&catalog, cli.output)?;
        }

        Some(Commands::Suggest { query }) => {
            let tags = suggestions(catalog.resources(), query.as_deref().unwrap_or_default());
            match cli.output.resolve() {
                OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&tags)?),
                _ => {
                    for tag in tags {
                        println!("{}", tag);
                    }
                }
            }
        }

        Some(Commands::Shell { live }) => {
            let source: Arc<dyn BookSource> =
                Arc::new(OpenLibrarySource::from_config(&config.remote)?);
            let session = VaultSession::new(catalog, source).with_live(live);
            run_shell(session, &config, cli.output, cli.quiet).await?;
        }

        Some(Commands::Config { action }) => match action {
            ConfigCommands::Show => {
                println!("{}", toml::to_string_pretty(&config)?);
            }
            ConfigCommands::Init { path, force } => {
                let path = match path.or_else(default_config_path) {
                    Some(path) => path,
                    None => bail!("Could not determine a config directory; pass --path"),
                };
                if path.exists() && !force {
                    bail!(
                        "Config file already exists at {} (use --force to overwrite)",
                        path.display()
                    );
                }
                write_config_file(&Config::default(), &path)?;
                if !cli.quiet {
                    eprintln!("Wrote default config to {}", path.display());
                }
            }
        },

        None => {
            let visible = filter(catalog.resources(), &FilterSelection::default());
            output_resources(&visible, cli.output, config.display.max_title_width)?;
        }
    }

    Ok(())
}

/// Build the selection for `browse`; every selector left at "All" is unconstrained
fn browse_selection(
    query: Option<String>,
    category: Choice<Category>,
    kind: Choice<ResourceType>,
    level: Choice<Level>,
    year: Choice<String>,
) -> FilterSelection {
    FilterSelection {
        query: query.unwrap_or_default(),
        category,
        kind,
        level,
        year,
    }
}

/// Read shell commands from stdin until `:quit` or end of input
async fn run_shell(
    mut session: VaultSession,
    config: &Config,
    format: OutputFormat,
    quiet: bool,
) -> Result<()> {
    let format = match format.resolve() {
        // Tables by default even when piped; JSON stays opt-in
        OutputFormat::Json if format == OutputFormat::Auto => OutputFormat::Table,
        other => other,
    };
    let width = config.display.max_title_width;
    let color = config.display.color && std::io::stdout().is_terminal();

    if !quiet {
        println!(
            "EngineerVault {} - {} resources. Type :help for commands.",
            env!("CARGO_PKG_VERSION"),
            session.catalog().len()
        );
    }
    output_resources(&session.visible(), format, width)?;

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        print_prompt(color)?;
        let Some(line) = lines.next_line().await? else {
            break;
        };

        let command = match line.parse::<ShellCommand>() {
            Ok(command) => command,
            Err(err) => {
                eprintln!("{}", err);
                continue;
            }
        };

        match session.apply(command) {
            ShellAction::Render => output_resources(&session.visible(), format, width)?,
            ShellAction::RenderAndLookup(query) => {
                output_resources(&session.visible(), format, width)?;
                spawn_lookup(&session, &query, format, width);
            }
            ShellAction::Lookup(query) => spawn_lookup(&session, &query, format, width),
            ShellAction::Categories => output_categories(session.catalog(), format)?,
            ShellAction::Suggest => {
                for tag in session.suggestions() {
                    println!("  {}", tag);
                }
            }
            ShellAction::Show => print_selection(session.selection(), session.is_live()),
            ShellAction::Help => {
                println!("{}", HELP_TEXT);
                println!("\nYears on offer: {}", YEAR_OPTIONS.join(", "));
            }
            ShellAction::LiveChanged(live) => {
                println!("Live book lookup {}", if live { "on" } else { "off" })
            }
            ShellAction::Quit => break,
        }
    }

    Ok(())
}

/// Run a lookup in the background; only the newest lookup prints its results
fn spawn_lookup(session: &VaultSession, query: &str, format: OutputFormat, width: usize) {
    let task = session.lookup_task(query);
    let remote = Arc::clone(session.remote());
    let query = query.trim().to_string();

    tokio::spawn(async move {
        let committed = task.await;
        if query.is_empty() || !committed {
            return;
        }
        println!();
        println!("Books for \"{}\":", query);
        if let Err(err) = output_books(&remote.books(), format, width) {
            tracing::warn!(error = %err, "failed to render books");
        }
    });
}

fn print_prompt(color: bool) -> Result<()> {
    let mut stdout = std::io::stdout();
    if color {
        write!(stdout, "{} ", "vault>".cyan().bold())?;
    } else {
        write!(stdout, "vault> ")?;
    }
    stdout.flush()?;
    Ok(())
}

fn print_selection(selection: &FilterSelection, live: bool) {
    println!("  query:    {}", selection.normalized_query());
    println!("  category: {}", selection.category);
    println!("  type:     {}", selection.kind);
    println!("  level:    {}", selection.level);
    println!("  year:     {}", selection.year);
    println!("  live:     {}", if live { "on" } else { "off" });
}

fn output_resources(
    resources: &[&ResourceRecord],
    format: OutputFormat,
    max_title_width: usize,
) -> Result<()> {
    match format.resolve() {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(resources)?),
        _ if resources.is_empty() => println!("{}", NO_RESOURCES_MESSAGE),
        OutputFormat::Plain => {
            for line in resource_lines(resources) {
                println!("{}", line);
            }
        }
        _ => println!("{}", resource_table(resources, max_title_width)),
    }
    Ok(())
}

fn output_books(
    books: &[RemoteBookRecord],
    format: OutputFormat,
    max_title_width: usize,
) -> Result<()> {
    match format.resolve() {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(books)?),
        _ if books.is_empty() => println!("{}", NO_BOOKS_MESSAGE),
        OutputFormat::Plain => {
            for line in book_lines(books) {
                println!("{}", line);
            }
        }
        _ => println!("{}", book_table(books, max_title_width)),
    }
    Ok(())
}

fn output_categories(catalog: &Catalog, format: OutputFormat) -> Result<()> {
    match format.resolve() {
        OutputFormat::Json => {
            let entries: Vec<serde_json::Value> = catalog
                .categories()
                .iter()
                .map(|category| {
                    serde_json::json!({
                        "label": category.label(),
                        "slug": category.slug(),
                        "count": catalog.count_in(*category),
                    })
                })
                .collect();
            println!("{}", serde_json::to_string_pretty(&entries)?);
        }
        OutputFormat::Plain => {
            for category in catalog.categories() {
                println!("{} ({})", category.label(), catalog.count_in(*category));
            }
        }
        _ => {
            use comfy_table::{Cell, Table};
            let mut table = Table::new();
            table.load_preset(comfy_table::presets::UTF8_FULL);
            table.set_header(vec!["Category", "Slug", "Resources"]);
            for category in catalog.categories() {
                table.add_row(vec![
                    Cell::new(category.label()),
                    Cell::new(category.slug()),
                    Cell::new(catalog.count_in(*category)),
                ]);
            }
            println!("{table}");
        }
    }
    Ok(())
}
