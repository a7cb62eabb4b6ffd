//! Command-line interface for zim
//! This binary reads a page on stdin and writes it to stdout in another format.
//!
//! Usage:
//!   zim `<from>` `<to>`       - Convert stdin from one format to another
//!   zim `<from>`            - Print the parsed document tree as JSON
//!   zim --list-formats      - List all available formats
//!
//! Settings come from the built-in defaults, then the file given with `--config`, then
//! the command line flags. Logs go to stderr; `-v` or `RUST_LOG` raise the level.

use clap::{Arg, ArgAction, ArgMatches, Command};
use std::io::Read;
use tracing::debug;
use tracing_subscriber::EnvFilter;
use zim_babel::{default_registry, dump, parse, Dumped};
use zim_config::{ExportOverrides, Loader, ZimConfig};

fn build_cli() -> Command {
    Command::new("zim")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Convert zim wiki pages between text formats")
        .arg_required_else_help(true)
        .arg(
            Arg::new("from")
                .help("Format of the input read from stdin (e.g. 'wiki', 'plain')")
                .required_unless_present("list-formats")
                .index(1),
        )
        .arg(
            Arg::new("to")
                .help("Output format. Without it the parsed tree is printed as JSON")
                .index(2),
        )
        .arg(
            Arg::new("list-formats")
                .long("list-formats")
                .help("List available formats")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("resources")
                .long("resources")
                .help("Print the files the output refers to on stderr")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("config")
                .long("config")
                .short('c')
                .value_name("FILE")
                .help("Configuration file layered over the defaults"),
        )
        .arg(
            Arg::new("base-dir")
                .long("base-dir")
                .value_name("DIR")
                .help("Directory relative file links and images are resolved against"),
        )
        .arg(
            Arg::new("document-type")
                .long("document-type")
                .value_parser(["report", "article", "book"])
                .help("LaTeX document class"),
        )
        .arg(
            Arg::new("standalone")
                .long("standalone")
                .help("Wrap HTML and LaTeX output in a complete document")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("line-numbers")
                .long("line-numbers")
                .help("Number the lines of verbatim blocks")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("file-input")
                .long("file-input")
                .help("Input is a page file starting with headers")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("file-output")
                .long("file-output")
                .help("Write page headers before wiki output")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("verbose")
                .long("verbose")
                .short('v')
                .help("Log debug messages to stderr")
                .action(ArgAction::SetTrue),
        )
}

fn main() {
    let matches = build_cli().get_matches();
    init_tracing(matches.get_flag("verbose"));

    if matches.get_flag("list-formats") {
        handle_list_formats_command();
        return;
    }

    if let Err(message) = handle_convert_command(&matches) {
        eprintln!("Error: {message}");
        std::process::exit(1);
    }
}

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .without_time()
        .init();
}

/// Layer the config file and command line flags over the defaults.
fn load_config(matches: &ArgMatches) -> Result<ZimConfig, String> {
    let mut loader = Loader::new();
    if let Some(path) = matches.get_one::<String>("config") {
        debug!(%path, "loading config file");
        loader = loader.with_file(path);
    }
    let overrides = ExportOverrides {
        base_dir: matches.get_one::<String>("base-dir").cloned(),
        document_type: matches.get_one::<String>("document-type").cloned(),
        standalone: matches.get_flag("standalone"),
        line_numbers: matches.get_flag("line-numbers"),
        file_output: matches.get_flag("file-output"),
    };
    debug!(?overrides, "applying command line overrides");
    loader
        .with_export_overrides(&overrides)
        .map_err(|e| e.to_string())?
        .build()
        .map_err(|e| format!("invalid configuration: {e}"))
}

fn handle_convert_command(matches: &ArgMatches) -> Result<(), String> {
    let from = matches
        .get_one::<String>("from")
        .ok_or("an input format is required")?;
    let config = load_config(matches)?;

    let mut source = String::new();
    std::io::stdin()
        .read_to_string(&mut source)
        .map_err(|e| format!("could not read stdin: {e}"))?;

    let mut parse_options = config.to_parse_options();
    parse_options.file_input = matches.get_flag("file-input");
    let doc = parse(from, &source, &parse_options).map_err(|e| e.to_string())?;

    let Some(to) = matches.get_one::<String>("to") else {
        let json = serde_json::to_string_pretty(&doc).map_err(|e| e.to_string())?;
        println!("{json}");
        return Ok(());
    };

    let Dumped { output, resources } =
        dump(to, &doc, &config.to_dump_options()).map_err(|e| e.to_string())?;
    print!("{output}");

    if matches.get_flag("resources") {
        for resource in resources {
            eprintln!("{resource}");
        }
    }
    Ok(())
}

fn handle_list_formats_command() {
    println!("Available formats:\n");

    for info in default_registry().describe() {
        let capabilities = if info.parsing {
            "parse, dump"
        } else {
            "dump"
        };
        println!("  {:<10}{}", info.name, info.description);
        println!("            {capabilities}");
        if !info.aliases.is_empty() {
            println!("            aliases: {}", info.aliases.join(", "));
        }
        println!();
    }
}
