use std::path::PathBuf;

use clap::builder::NonEmptyStringValueParser;
use clap::{ArgAction, Parser, Subcommand};
use console::style;
use tracing::debug;

use mcmm::{commands, utils};

#[derive(Parser)]
#[command(name = "mcmm")]
#[command(author, version, about = "Search and download Minecraft mods from Curseforge", long_about = None)]
struct Cli {
    /// Print more diagnostics to stderr (repeat for more)
    #[arg(long, global = true, action = ArgAction::Count)]
    verbose: u8,

    /// Only print errors to stderr
    #[arg(short, long, global = true)]
    quiet: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Search for a mod id by name
    #[command(visible_alias = "s")]
    Search {
        /// Search query
        #[arg(value_name = "QUERY", required = true, value_parser = NonEmptyStringValueParser::new())]
        query: Vec<String>,

        /// Only list mods available for this Minecraft version
        #[arg(short = 'v', long = "version", value_name = "VERSION")]
        minecraft_version: Option<String>,

        /// Maximum number of results
        #[arg(short = 'n', long, value_parser = clap::value_parser!(u32).range(1..=50))]
        limit: Option<u32>,
    },
    /// Download mods from Curseforge
    #[command(visible_alias = "d")]
    Download {
        /// Mod IDs or names
        #[arg(value_name = "MOD", required = true, value_parser = NonEmptyStringValueParser::new())]
        mods: Vec<String>,

        /// Minecraft version the files must support
        #[arg(short = 'v', long = "version", value_name = "VERSION")]
        minecraft_version: Option<String>,

        /// Directory to save the files in
        #[arg(short, long, value_name = "DIR")]
        output: Option<PathBuf>,
    },
    /// Get mod info and version compatibility list
    Info {
        /// Mod ID or name
        #[arg(value_name = "MOD", value_parser = NonEmptyStringValueParser::new())]
        mod_query: String,
    },
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    // Load .env first so a RUST_LOG set there reaches the log filter.
    let dotenv = dotenvy::dotenv();
    utils::logging::init_logging(cli.verbose, cli.quiet);
    if let Ok(path) = dotenv {
        debug!(path = %path.display(), "loaded environment file");
    }

    let env = utils::RealEnv;

    let result = match cli.command {
        Commands::Search {
            query,
            minecraft_version,
            limit,
        } => commands::search::run(&env, &query.join(" "), minecraft_version, limit)
            .await
            .map(|_| ()),
        Commands::Download {
            mods,
            minecraft_version,
            output,
        } => commands::download::run(&env, &mods, minecraft_version, output)
            .await
            .map(|_| ()),
        Commands::Info { mod_query } => commands::info::run(&env, &mod_query).await.map(|_| ()),
    };

    if let Err(err) = result {
        eprintln!("{}", style("[ERROR]").bold().red());
        eprintln!("{:?}", style(err).red());
        std::process::exit(1);
    }
}
