mod authorize;
mod find;
mod search;
mod view;

use clap::{Args, Parser, Subcommand};
use modfiles_api::{LinkMode, Operation, ResolutionOptions};
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(Parser)]
#[command(
    name = "modfiles",
    version,
    about = "Resolve and authorize files served from modules",
    long_about = "Translates module file URIs such as puppet://server/modules/ntp/ntp.conf into \
                  files below <module>/files on disk, scoped by the requesting node's environment, \
                  and answers whether a node may access them."
)]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalArgs,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Args)]
pub struct GlobalArgs {
    /// Site configuration file. Defaults to ~/.modfiles/site.json
    #[arg(long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Requesting node; selects its environment
    #[arg(long, global = true)]
    pub node: Option<String>,

    /// Requesting IP address
    #[arg(long, global = true, value_name = "ADDRESS")]
    pub ip: Option<String>,

    /// How to treat symbolic links: follow or manage
    #[arg(long, global = true, value_name = "MODE")]
    pub links: Option<LinkMode>,

    /// Print results as JSON
    #[arg(long, global = true)]
    pub json: bool,

    /// Also log to stderr
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

impl GlobalArgs {
    fn options(&self) -> ResolutionOptions {
        ResolutionOptions {
            node: self.node.clone(),
            links: self.links,
            ipaddress: self.ip.clone(),
            ..Default::default()
        }
    }
}

#[derive(Subcommand)]
pub enum Commands {
    /// Resolve a single module file
    Find {
        #[arg(value_name = "URI")]
        uri: String,
    },
    /// Resolve a module path and expand it into its entries
    Search {
        #[arg(value_name = "URI")]
        uri: String,

        /// Descend into directories, optionally to a maximum depth
        #[arg(long, value_name = "DEPTH", num_args = 0..=1, default_missing_value = "true")]
        recurse: Option<String>,

        /// Skip entries matching this glob (repeatable)
        #[arg(long, value_name = "GLOB")]
        ignore: Vec<String>,
    },
    /// Check whether an operation on a module file is allowed
    Authorize {
        /// find, search, save, destroy, ...
        #[arg(value_name = "OPERATION")]
        operation: Operation,

        #[arg(value_name = "URI")]
        uri: String,
    },
}

pub fn run() -> Result<ExitCode, Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let _guard = modfiles_runtime::init_logging("cli", cli.global.verbose);

    let config = modfiles_runtime::load_config(cli.global.config.as_deref())?;
    let terminus = modfiles_runtime::build_terminus(&config);
    let options = cli.global.options();
    let json = cli.global.json;

    match cli.command {
        Commands::Find { uri } => find::run(&terminus, &uri, &options, json),
        Commands::Search {
            uri,
            recurse,
            ignore,
        } => search::run(&terminus, &uri, search::with_walk_options(options, recurse, ignore), json),
        Commands::Authorize { operation, uri } => {
            authorize::run(&terminus, &operation, &uri, &options, json)
        }
    }
}
