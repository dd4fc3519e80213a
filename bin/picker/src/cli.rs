use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Do all the work, but do not write any file.
    #[arg(long, global = true)]
    pub dry_run: bool,

    /// Log at debug level, including the produced SDL and the dependency diagram.
    #[arg(long, global = true)]
    pub debug: bool,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Picks the given definitions, and everything they depend on, out of an SDL file.
    Pick(PickArgs),
}

#[derive(Args, Debug)]
pub struct PickArgs {
    /// The SDL file to pick definitions from.
    #[arg(short = 'f', long, value_name = "PATH")]
    pub sdl_file: PathBuf,

    /// Names of the definitions to keep, separated by commas. Can be repeated.
    #[arg(
        short = 'd',
        long,
        value_name = "NAMES",
        value_delimiter = ',',
        required = true,
        num_args = 1..
    )]
    pub definitions: Vec<String>,

    /// TOML file with per-type renames and field deny-lists.
    #[arg(short = 'c', long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Where to write the produced SDL.
    #[arg(short = 'o', long, value_name = "PATH", default_value = "output.sdl.graphqls")]
    pub output: PathBuf,

    /// Also write the picked dependency graph as a Graphviz DOT file.
    #[arg(long, value_name = "PATH")]
    pub diagram: Option<PathBuf>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;
    use pretty_assertions::assert_eq;

    fn parse(args: &[&str]) -> Result<Cli, clap::Error> {
        Cli::try_parse_from(std::iter::once("graphql-schema-picker").chain(args.iter().copied()))
    }

    #[test]
    fn command_is_well_formed() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parses_short_flags_and_defaults() {
        let cli = parse(&["pick", "-f", "schema.graphqls", "-d", "Person,Animal"]).unwrap();
        let Command::Pick(args) = cli.command;

        assert_eq!(args.sdl_file, PathBuf::from("schema.graphqls"));
        assert_eq!(args.definitions, vec!["Person", "Animal"]);
        assert_eq!(args.output, PathBuf::from("output.sdl.graphqls"));
        assert_eq!(args.config, None);
        assert_eq!(args.diagram, None);
        assert!(!cli.dry_run);
        assert!(!cli.debug);
    }

    #[test]
    fn accepts_repeated_definitions_and_global_flags() {
        let cli = parse(&[
            "--debug",
            "pick",
            "--sdl-file",
            "schema.graphqls",
            "--definitions",
            "Person",
            "-d",
            "Animal,Owner",
            "--config",
            "picker.toml",
            "--output",
            "out.graphqls",
            "--diagram",
            "graph.dot",
            "--dry-run",
        ])
        .unwrap();
        let Command::Pick(args) = cli.command;

        assert_eq!(args.definitions, vec!["Person", "Animal", "Owner"]);
        assert_eq!(args.config, Some(PathBuf::from("picker.toml")));
        assert_eq!(args.output, PathBuf::from("out.graphqls"));
        assert_eq!(args.diagram, Some(PathBuf::from("graph.dot")));
        assert!(cli.dry_run);
        assert!(cli.debug);
    }

    #[test]
    fn requires_source_and_definitions() {
        assert!(parse(&["pick", "-d", "Person"]).is_err());
        assert!(parse(&["pick", "-f", "schema.graphqls"]).is_err());
        assert!(parse(&[]).is_err());
    }
}
