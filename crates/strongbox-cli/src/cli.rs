use clap::{ArgAction, Parser, Subcommand, ValueHint};
use strongbox_graph::VertexId;

#[derive(Parser)]
#[command(
    author,
    version,
    about,
    help_template = "{before-help}{name} {version}
{author-with-newline}{about-with-newline}
{usage-heading} {usage}

{all-args}{after-help}",
    arg_required_else_help = true
)]
pub struct Args {
    /// Set output verbosity
    #[arg(short = 'v', long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress outputs
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Output as json
    #[arg(short, long, global = true)]
    pub json: bool,

    /// Disable colors in output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Provide custom config file
    #[arg(short, long, global = true)]
    pub config: Option<String>,

    #[clap(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Store an artifact coordinates chain
    #[command(arg_required_else_help = true)]
    Store {
        /// JSON file holding the chain, most general coordinates first
        #[arg(required = true, value_hint = ValueHint::FilePath)]
        file: String,
    },

    /// Show the coordinates chain ending at a vertex
    #[command(arg_required_else_help = true)]
    Show {
        /// Vertex id, as printed by `store` (e.g. `#3`)
        #[arg(required = true)]
        vertex: VertexId,

        /// Number of ancestors to follow (defaults to max_hierarchy_depth)
        #[arg(required = false, short, long)]
        depth: Option<usize>,
    },

    /// List the registered coordinate types, most specific first
    Labels,

    /// Print the configuration file to stdout
    Config,

    /// Generate default config
    #[clap(name = "defconfig")]
    DefConfig,
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory;

    use super::*;

    #[test]
    fn test_args_are_consistent() {
        Args::command().debug_assert();
    }

    #[test]
    fn test_parse_show() {
        let args = Args::parse_from(["strongbox", "-vv", "show", "#4", "--depth", "2"]);

        assert_eq!(args.verbose, 2);
        let Commands::Show { vertex, depth } = args.command else {
            panic!("expected show");
        };
        assert_eq!(vertex, VertexId(4));
        assert_eq!(depth, Some(2));
    }
}
