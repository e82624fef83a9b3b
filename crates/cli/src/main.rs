mod config;
mod error;

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use controller::{ControllerDef, RequestContext};
use tracing::debug;
use tracing_subscriber::EnvFilter;

use config::Config;
use error::{Error, Result};

const DECLARATIONS_FILE: &str = "require_api.toml";

#[derive(Parser)]
#[command(name = "require-api")]
#[command(about = "Inspect which APIs a controller declares per action", long_about = None)]
#[command(version)]
struct Cli {
    /// Declaration file
    #[arg(short, long, global = true, default_value = DECLARATIONS_FILE)]
    file: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Check whether an API path is declared for a request
    Check {
        /// Controller name
        #[arg(short, long)]
        controller: String,
        /// Action being requested
        #[arg(short, long)]
        action: String,
        /// API path, outermost name first (none checks nothing and is always true)
        names: Vec<String>,
    },
    /// Print the API registry a request ends up with, as JSON
    Tree {
        /// Controller name
        #[arg(short, long)]
        controller: String,
        /// Action being requested
        #[arg(short, long)]
        action: String,
    },
    /// List controllers and their before-filters
    List,
}

fn main() {
    init_tracing();

    if let Err(e) = run() {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn run() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Check {
            controller,
            action,
            names,
        } => cmd_check(&cli.file, &controller, &action, &names),
        Commands::Tree { controller, action } => cmd_tree(&cli.file, &controller, &action),
        Commands::List => cmd_list(&cli.file),
    }
}

fn cmd_check(file: &Path, controller: &str, action: &str, names: &[String]) -> Result<()> {
    let ctx = dispatch(file, controller, action)?;
    println!("{}", ctx.has_capability(names));
    Ok(())
}

fn cmd_tree(file: &Path, controller: &str, action: &str) -> Result<()> {
    let ctx = dispatch(file, controller, action)?;
    println!("{}", serde_json::to_string_pretty(ctx.capabilities())?);
    Ok(())
}

fn cmd_list(file: &Path) -> Result<()> {
    let config = load_config(file)?;
    let defs = config.controllers()?;

    if defs.is_empty() {
        println!("No controllers declared.");
        return Ok(());
    }

    println!("{:<20}  {:<30}  {:<20}  EXCEPT", "CONTROLLER", "FILTER", "ONLY");
    println!("{}", "-".repeat(80));

    // File order, so parents print before children.
    for cfg in &config.controllers {
        let Some(def) = defs.get(&cfg.name) else {
            continue;
        };
        if def.chain().is_empty() {
            println!("{:<20}  {:<30}  {:<20}  -", def.name(), "-", "-");
            continue;
        }
        for filter in def.chain().iter() {
            let restriction = filter.restriction();
            println!(
                "{:<20}  {:<30}  {:<20}  {}",
                def.name(),
                filter.name(),
                or_dash(&restriction.applies_to),
                or_dash(&restriction.excludes),
            );
        }
    }

    Ok(())
}

fn or_dash(actions: &[String]) -> String {
    if actions.is_empty() {
        "-".to_string()
    } else {
        actions.join(",")
    }
}

/// Run the controller's filters for one request to `action`.
fn dispatch(file: &Path, controller: &str, action: &str) -> Result<RequestContext> {
    let defs = load_config(file)?.controllers()?;
    debug!(file = %file.display(), controllers = defs.len(), "loaded declarations");
    let def = find_controller(&defs, controller)?;
    let dispatch = def.dispatch(action, |_| ());
    Ok(dispatch.context)
}

fn find_controller<'a>(
    defs: &'a BTreeMap<String, ControllerDef>,
    name: &str,
) -> Result<&'a ControllerDef> {
    defs.get(name).ok_or_else(|| Error::UnknownController {
        name: name.to_string(),
        known: defs.keys().cloned().collect(),
    })
}

fn load_config(file: &Path) -> Result<Config> {
    if !file.exists() {
        return Err(Error::FileNotFound {
            path: file.to_path_buf(),
        });
    }
    Ok(Config::load(file)?)
}
