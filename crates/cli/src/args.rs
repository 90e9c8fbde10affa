use std::ffi::OsString;
use std::path::PathBuf;

use clap::{Arg, ArgAction, ArgMatches, Command, builder::OsStringValueParser, value_parser};
use filters::{FilterAction, FilterRule};

/// Parsed command produced by [`parse_args`].
#[derive(Debug, Default)]
pub(crate) struct ParsedArgs {
    pub(crate) show_help: bool,
    pub(crate) show_version: bool,
    pub(crate) root: Option<PathBuf>,
    /// Include and exclude rules in command-line order.
    pub(crate) rules: Vec<FilterRule>,
    pub(crate) follow_symlinks: bool,
    pub(crate) stop_at: Option<PathBuf>,
    pub(crate) max_items: Option<u64>,
    pub(crate) verbose: u8,
    pub(crate) info: Vec<String>,
    pub(crate) debug: Vec<String>,
    pub(crate) print_events: bool,
}

/// Builds the `clap` command used for parsing.
pub(crate) fn clap_command() -> Command {
    Command::new("fs-visit")
        .disable_help_flag(true)
        .disable_version_flag(true)
        .arg_required_else_help(false)
        .arg(
            Arg::new("help")
                .long("help")
                .short('h')
                .help("Show this help message and exit.")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("version")
                .long("version")
                .short('V')
                .help("Output version information and exit.")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("include")
                .long("include")
                .value_name("PATTERN")
                .help("Visit paths matching PATTERN.")
                .action(ArgAction::Append),
        )
        .arg(
            Arg::new("exclude")
                .long("exclude")
                .value_name("PATTERN")
                .help("Skip paths matching PATTERN; excluded directories are pruned.")
                .action(ArgAction::Append),
        )
        .arg(
            Arg::new("follow-symlinks")
                .long("follow-symlinks")
                .short('L')
                .help("Classify symbolic links by their target.")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("stop-at")
                .long("stop-at")
                .value_name("PATH")
                .help("Stop the traversal once PATH has been found.")
                .value_parser(OsStringValueParser::new()),
        )
        .arg(
            Arg::new("max-items")
                .long("max-items")
                .value_name("N")
                .help("Stop after N accepted paths.")
                .value_parser(value_parser!(u64).range(1..)),
        )
        .arg(
            Arg::new("verbose")
                .long("verbose")
                .short('v')
                .help("Increase diagnostic verbosity.")
                .action(ArgAction::Count),
        )
        .arg(
            Arg::new("info")
                .long("info")
                .value_name("FLAGS")
                .help("Enable info diagnostics, e.g. skip,stats2.")
                .action(ArgAction::Append),
        )
        .arg(
            Arg::new("debug")
                .long("debug")
                .value_name("FLAGS")
                .help("Enable debug diagnostics, e.g. walk2,filter.")
                .action(ArgAction::Append),
        )
        .arg(
            Arg::new("print-events")
                .long("print-events")
                .help("Echo every traversal event to standard output.")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("root")
                .value_name("ROOT")
                .help("Directory or file to visit.")
                .value_parser(OsStringValueParser::new()),
        )
}

/// Parses command-line arguments into a [`ParsedArgs`] structure.
pub(crate) fn parse_args<I, S>(arguments: I) -> Result<ParsedArgs, clap::Error>
where
    I: IntoIterator<Item = S>,
    S: Into<OsString>,
{
    let mut args: Vec<OsString> = arguments.into_iter().map(Into::into).collect();

    if args.is_empty() {
        args.push(OsString::from("fs-visit"));
    }

    let mut matches = clap_command().try_get_matches_from(args)?;

    let rules = ordered_rules(&matches);
    let root = matches.remove_one::<OsString>("root").map(PathBuf::from);
    let stop_at = matches.remove_one::<OsString>("stop-at").map(PathBuf::from);
    let max_items = matches.remove_one::<u64>("max-items");
    let info = flag_tokens(&mut matches, "info");
    let debug = flag_tokens(&mut matches, "debug");

    Ok(ParsedArgs {
        show_help: matches.get_flag("help"),
        show_version: matches.get_flag("version"),
        root,
        rules,
        follow_symlinks: matches.get_flag("follow-symlinks"),
        stop_at,
        max_items,
        verbose: matches.get_count("verbose"),
        info,
        debug,
        print_events: matches.get_flag("print-events"),
    })
}

/// Merges `--include` and `--exclude` occurrences back into the order in
/// which they appeared, since the last matching rule decides.
fn ordered_rules(matches: &ArgMatches) -> Vec<FilterRule> {
    let mut indexed = Vec::new();

    for (id, action) in [
        ("include", FilterAction::Include),
        ("exclude", FilterAction::Exclude),
    ] {
        if let (Some(indices), Some(values)) =
            (matches.indices_of(id), matches.get_many::<String>(id))
        {
            indexed.extend(
                indices
                    .zip(values)
                    .map(|(index, pattern)| (index, FilterRule::new(action, pattern.as_str()))),
            );
        }
    }

    indexed.sort_by_key(|(index, _)| *index);
    indexed.into_iter().map(|(_, rule)| rule).collect()
}

fn flag_tokens(matches: &mut ArgMatches, id: &str) -> Vec<String> {
    matches
        .remove_many::<String>(id)
        .map(|values| {
            values
                .flat_map(|value| {
                    value
                        .split(',')
                        .map(str::trim)
                        .filter(|token| !token.is_empty())
                        .map(str::to_owned)
                        .collect::<Vec<_>>()
                })
                .collect()
        })
        .unwrap_or_default()
}
