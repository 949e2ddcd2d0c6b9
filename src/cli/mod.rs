pub mod commands;

use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "recipe-search")]
#[command(about = "Find recipes by the ingredients you have", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Start the search server
    Serve {
        /// Port to listen on
        #[arg(short, long, env = "PORT")]
        port: Option<u16>,

        /// Host to bind to
        #[arg(long, env = "HOST")]
        host: Option<String>,
    },

    /// Run database migrations
    Migrate,

    /// Search a running server for recipes
    Search {
        /// Comma separated ingredients, e.g. "egg, milk"
        ingredients: String,

        /// Page number
        #[arg(long)]
        page: Option<u32>,

        /// Results per page (ignored with --global)
        #[arg(long)]
        limit: Option<u32>,

        /// Rank the whole corpus instead of a single title-ordered page
        #[arg(long)]
        global: bool,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_search_command() {
        let cli = Cli::parse_from(["recipe-search", "search", "egg, milk", "--page", "2", "--global"]);
        match cli.command {
            Commands::Search {
                ingredients,
                page,
                limit,
                global,
            } => {
                assert_eq!(ingredients, "egg, milk");
                assert_eq!(page, Some(2));
                assert_eq!(limit, None);
                assert!(global);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }
}
