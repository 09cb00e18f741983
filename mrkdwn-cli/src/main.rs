// Command-line interface for mrkdwn
//
// This binary renders HTML-like markup into Slack mrkdwn, and exposes the intermediate stages
// of the pipeline for debugging.
//
// Usage:
//  mrkdwn <input> [--exact] [--output <file>]          - Render markup to mrkdwn (default)
//  mrkdwn render <input> [--exact] [--output <file>]   - Same as above (explicit)
//  mrkdwn inspect <input> [<transform>]                - Show an intermediate stage
//  mrkdwn --list-transforms                            - List available transforms
//
// `-` as the input reads markup from stdin.
//
// Configuration:
//
// Settings come from the embedded defaults, then ./mrkdwn.toml if present, then the file given
// with --config. Single keys can be overridden with --extra-<key> <value>, where <key> is the
// dotted configuration key, e.g. `--extra-links.min_id_length 4`.

use mrkdwn_cli::transforms;

use clap::{Arg, ArgAction, ArgMatches, Command, ValueHint};
use log::debug;
use mrkdwn_config::{Loader, MrkdwnConfig, LOCAL_CONFIG_FILE};
use mrkdwn_render::{render_with_options, RenderOptions};
use std::collections::HashMap;
use std::fs;
use std::io::{self, Read};

const SUBCOMMANDS: &[&str] = &["render", "inspect", "help"];

/// Parse extra-* arguments from command line args
/// Returns (cleaned_args_without_extras, extra_params_map)
///
/// Supports both:
/// - `--extra-<key> <value>` (explicit value)
/// - `--extra-<key>` (boolean flag, defaults to "true")
fn parse_extra_args(args: &[String]) -> (Vec<String>, HashMap<String, String>) {
    let mut cleaned_args = Vec::new();
    let mut extra_params = HashMap::new();
    let mut i = 0;

    while i < args.len() {
        let arg = &args[i];

        if let Some(key) = arg.strip_prefix("--extra-") {
            let has_value = args
                .get(i + 1)
                .is_some_and(|next| !next.starts_with("--") && next != "-");

            if has_value {
                extra_params.insert(key.to_string(), args[i + 1].clone());
                i += 2;
            } else {
                extra_params.insert(key.to_string(), "true".to_string());
                i += 1;
            }
            continue;
        }

        cleaned_args.push(arg.clone());
        i += 1;
    }

    (cleaned_args, extra_params)
}

fn build_cli() -> Command {
    Command::new("mrkdwn")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Render HTML-like markup into Slack mrkdwn")
        .long_about(
            "mrkdwn renders a small HTML-like vocabulary (b, i, s, code, a, time, p, \
            blockquote, ul, ol, li, pre, br, ...) into Slack's mrkdwn text format.\n\n\
            Commands:\n  \
            - render:  Render markup to mrkdwn (default command)\n  \
            - inspect: View intermediate representations (markup tree, events, blocks)\n\n\
            Extra Parameters:\n  \
            Use --extra-<key> <value> to override a configuration key.\n\n\
            Examples:\n  \
            mrkdwn message.html                       # Render to stdout\n  \
            echo '<b>hi</b>' | mrkdwn -               # Render stdin\n  \
            mrkdwn message.html --exact -o out.txt    # Exact mode, to a file\n  \
            mrkdwn inspect message.html events-json   # View the event stream",
        )
        .arg_required_else_help(true)
        .subcommand_required(false)
        .arg(
            Arg::new("list-transforms")
                .long("list-transforms")
                .help("List available transforms")
                .action(ArgAction::SetTrue)
                .global(true),
        )
        .arg(
            Arg::new("config")
                .long("config")
                .value_name("PATH")
                .help("Path to a mrkdwn.toml configuration file")
                .value_hint(ValueHint::FilePath)
                .global(true),
        )
        .subcommand(
            Command::new("render")
                .about("Render markup to mrkdwn (default command)")
                .arg(
                    Arg::new("input")
                        .help("Input file path, or - for stdin")
                        .required(true)
                        .index(1)
                        .value_hint(ValueHint::FilePath),
                )
                .arg(
                    Arg::new("exact")
                        .long("exact")
                        .help("Bracket formatting delimiters with zero-width spaces")
                        .long_help(
                            "Slack only applies *, _ and ~ at word boundaries. Exact mode \
                            brackets every delimiter with zero-width spaces so formatting \
                            also applies inside words.",
                        )
                        .action(ArgAction::SetTrue),
                )
                .arg(
                    Arg::new("output")
                        .long("output")
                        .short('o')
                        .help("Output file path (defaults to stdout)")
                        .value_hint(ValueHint::FilePath),
                ),
        )
        .subcommand(
            Command::new("inspect")
                .about("Inspect intermediate representations of the markup")
                .long_about(
                    "View the markup at different processing stages.\n\n\
                    Transforms (stage-format):\n  \
                    - markup-json:  Parsed markup tree\n  \
                    - events-json:  Flat event stream\n  \
                    - blocks-json:  Block tree (default)\n\n\
                    Examples:\n  \
                    mrkdwn inspect message.html               # Block tree\n  \
                    mrkdwn inspect message.html events-json   # Event stream",
                )
                .arg(
                    Arg::new("input")
                        .help("Input file path, or - for stdin")
                        .required(true)
                        .index(1)
                        .value_hint(ValueHint::FilePath),
                )
                .arg(
                    Arg::new("transform")
                        .help("Transform to apply (stage-format). Defaults to 'blocks-json'")
                        .required(false)
                        .value_parser(clap::builder::PossibleValuesParser::new(
                            transforms::AVAILABLE_TRANSFORMS,
                        ))
                        .index(2)
                        .value_hint(ValueHint::Other),
                ),
        )
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let args: Vec<String> = std::env::args().collect();
    let (cleaned_args, extra_params) = parse_extra_args(&args);

    let cli = build_cli();
    let matches = match cli.clone().try_get_matches_from(&cleaned_args) {
        Ok(m) => m,
        Err(e) => {
            // A bare input path means the default command
            if needs_default_command(&cleaned_args) {
                let mut new_args = vec![cleaned_args[0].clone(), "render".to_string()];
                new_args.extend_from_slice(&cleaned_args[1..]);

                match cli.try_get_matches_from(&new_args) {
                    Ok(m) => m,
                    Err(e2) => e2.exit(),
                }
            } else {
                e.exit();
            }
        }
    };

    if matches.get_flag("list-transforms") {
        handle_list_transforms_command();
        return;
    }

    let config = load_cli_config(
        matches.get_one::<String>("config").map(|s| s.as_str()),
        &extra_params,
    );

    match matches.subcommand() {
        Some(("render", sub_matches)) => handle_render_command(sub_matches, &config),
        Some(("inspect", sub_matches)) => {
            let input = required(sub_matches, "input");
            let transform = sub_matches
                .get_one::<String>("transform")
                .map(|s| s.as_str())
                .unwrap_or(transforms::DEFAULT_TRANSFORM);
            handle_inspect_command(input, transform);
        }
        _ => {
            eprintln!("Unknown subcommand. Use --help for usage information.");
            std::process::exit(1);
        }
    }
}

fn needs_default_command(args: &[String]) -> bool {
    match args.get(1) {
        Some(first) => {
            (first == "-" || !first.starts_with('-')) && !SUBCOMMANDS.contains(&first.as_str())
        }
        None => false,
    }
}

fn required<'a>(matches: &'a ArgMatches, name: &str) -> &'a str {
    match matches.get_one::<String>(name) {
        Some(value) => value,
        None => {
            eprintln!("Error: missing required argument <{name}>");
            std::process::exit(1);
        }
    }
}

/// Handle the render command
fn handle_render_command(matches: &ArgMatches, config: &MrkdwnConfig) {
    let input = required(matches, "input");
    let source = read_input(input);

    let mut options = RenderOptions::from(config);
    if matches.get_flag("exact") {
        options.exact_mode = true;
    }
    debug!("rendering {input} with {options:?}");

    let output = render_with_options(source.as_str(), &options).unwrap_or_else(|e| {
        eprintln!("Render error: {e}");
        std::process::exit(1);
    });

    match matches.get_one::<String>("output") {
        Some(path) => {
            fs::write(path, output).unwrap_or_else(|e| {
                eprintln!("Error writing file '{path}': {e}");
                std::process::exit(1);
            });
        }
        None => println!("{output}"),
    }
}

/// Handle the inspect command
fn handle_inspect_command(input: &str, transform: &str) {
    let source = read_input(input);

    let output = transforms::execute_transform(&source, transform).unwrap_or_else(|e| {
        eprintln!("Execution error: {e}");
        std::process::exit(1);
    });

    println!("{output}");
}

/// Handle the list-transforms command
fn handle_list_transforms_command() {
    println!("Available transforms:\n");
    println!("Stages:");
    println!("  markup  - Parsed markup tree");
    println!("  events  - Flat event stream");
    println!("  blocks  - Block tree (input of the mrkdwn serializer)\n");

    println!("Formats:");
    println!("  json    - JSON output (all stages)\n");

    println!("Available transform combinations:");
    for transform_name in transforms::AVAILABLE_TRANSFORMS {
        println!("  {transform_name}");
    }
}

fn read_input(input: &str) -> String {
    let result = if input == "-" {
        let mut source = String::new();
        io::stdin().read_to_string(&mut source).map(|_| source)
    } else {
        fs::read_to_string(input)
    };

    result.unwrap_or_else(|e| {
        eprintln!("Error reading file '{input}': {e}");
        std::process::exit(1);
    })
}

fn load_cli_config(
    explicit_path: Option<&str>,
    extra_params: &HashMap<String, String>,
) -> MrkdwnConfig {
    let loader = Loader::new().with_optional_file(LOCAL_CONFIG_FILE);
    let mut loader = if let Some(path) = explicit_path {
        loader.with_file(path)
    } else {
        loader
    };

    for (key, value) in extra_params {
        loader = loader
            .set_override(key, value.as_str())
            .unwrap_or_else(|err| {
                eprintln!("Invalid override --extra-{key}: {err}");
                std::process::exit(1);
            });
    }

    loader.build().unwrap_or_else(|err| {
        eprintln!("Failed to load configuration: {err}");
        std::process::exit(1);
    })
}
