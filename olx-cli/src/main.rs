// Command-line interface for olx
//
// This binary converts markdown problem shorthand into OLX and lets authors
// look at how a document moves through the conversion pipeline.
//
// Conversion is the default command: a bare path is treated as `convert <path>`.
// A path of `-` reads the markdown from stdin.
//
// Usage:
//  olx <input> [--output <file>] [--strict]          - Convert markdown to OLX (default)
//  olx convert <input> [--output <file>] [--strict]  - Same as above (explicit)
//  olx inspect <input> [<view>] [--stage <name>]     - Show a view of the conversion
//  olx --list-stages                                 - List pipeline stages and inspect views
//
// Extra Parameters:
//
// Configuration keys can be overridden with --extra-<name> <value>.
// The CLI layer strips the "extra-" prefix and applies the value on top of olx.toml.
// Example:
//  olx question.md --extra-trailing-newline false --extra-log-level debug

use olx_cli::inspect;

use clap::{Arg, ArgAction, Command, ValueHint};
use env_logger::Env;
use olx_babel::pipeline::{Stage, TraceOptions};
use olx_babel::{convert_with_options, ConvertOptions};
use olx_config::{InspectView, Loader, OlxConfig};
use std::collections::HashMap;
use std::fs;
use std::io::{self, Read};

const SUBCOMMANDS: &[&str] = &["convert", "inspect", "help"];

/// Parse extra-* arguments from command line args
/// Returns (cleaned_args_without_extras, extra_params_map)
///
/// Supports both:
/// - `--extra-<key> <value>` (explicit value)
/// - `--extra-<key>` (boolean flag, defaults to "true")
/// - `--extras-<key>` (alias for `--extra-<key>`)
fn parse_extra_args(args: &[String]) -> (Vec<String>, HashMap<String, String>) {
    let mut cleaned_args = Vec::new();
    let mut extra_params = HashMap::new();
    let mut i = 0;

    while i < args.len() {
        let arg = &args[i];

        let key_opt = if let Some(key) = arg.strip_prefix("--extra-") {
            Some(key)
        } else {
            arg.strip_prefix("--extras-")
        };

        if let Some(key) = key_opt {
            let has_value = if i + 1 < args.len() {
                !args[i + 1].starts_with('-')
            } else {
                false
            };

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

/// True when the first positional argument is an input path rather than a subcommand
///
/// Global options may come before it: `olx --config c.toml question.md`.
fn needs_convert(args: &[String]) -> bool {
    let mut rest = args.iter().skip(1);
    while let Some(arg) = rest.next() {
        if arg == "--config" {
            rest.next();
        } else if arg == "-" || !arg.starts_with('-') {
            return !SUBCOMMANDS.contains(&arg.as_str());
        }
    }
    false
}

fn stage_names() -> Vec<&'static str> {
    Stage::ALL.iter().map(|stage| stage.name()).collect()
}

fn build_cli() -> Command {
    Command::new("olx")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Convert markdown problem shorthand to OLX")
        .long_about(
            "olx turns the markdown shorthand used to author course problems into\n\
            OLX <problem> documents.\n\n\
            Commands:\n  \
            - convert: Convert a markdown problem to OLX (default)\n  \
            - inspect: Show how the problem moves through the conversion stages\n\n\
            Extra Parameters:\n  \
            Use --extra-<name> [value] to override configuration values.\n  \
            Boolean flags can omit the value (defaults to 'true').\n\n\
            Examples:\n  \
            olx question.md                          # Print OLX to stdout\n  \
            olx question.md -o problem.xml           # Write OLX to a file\n  \
            cat question.md | olx -                  # Read markdown from stdin\n  \
            olx inspect question.md                  # Stage-by-stage report\n  \
            olx inspect question.md problem-type     # Classify the converted problem",
        )
        .arg_required_else_help(true)
        .subcommand_required(false)
        .arg(
            Arg::new("list-stages")
                .long("list-stages")
                .help("List pipeline stages and inspect views")
                .action(ArgAction::SetTrue)
                .global(true),
        )
        .arg(
            Arg::new("config")
                .long("config")
                .value_name("PATH")
                .help("Path to an olx.toml configuration file")
                .value_hint(ValueHint::FilePath)
                .global(true),
        )
        .subcommand(
            Command::new("inspect")
                .about("Inspect the conversion of a markdown problem")
                .long_about(
                    "Show the conversion of a markdown problem from different angles.\n\n\
                    Views:\n  \
                    - stages:          What each stage did to each block (default)\n  \
                    - stages-json:     The full trace as JSON\n  \
                    - response-types:  Response elements in the converted problem\n  \
                    - problem-type:    How an editor classifies the converted problem\n\n\
                    Examples:\n  \
                    olx inspect question.md                            # Stage report\n  \
                    olx inspect question.md --stage hoist-response     # One stage only\n  \
                    olx inspect question.md stages --include-unchanged # Every stage\n  \
                    olx inspect question.md stages-json                # Machine-readable trace",
                )
                .arg(
                    Arg::new("path")
                        .help("Path to the markdown problem ('-' for stdin)")
                        .required(true)
                        .index(1)
                        .value_hint(ValueHint::FilePath),
                )
                .arg(
                    Arg::new("view")
                        .help("View to show. Defaults to the configured view ('stages')")
                        .required(false)
                        .value_parser(clap::builder::PossibleValuesParser::new(
                            inspect::AVAILABLE_VIEWS,
                        ))
                        .index(2)
                        .value_hint(ValueHint::Other),
                )
                .arg(
                    Arg::new("stage")
                        .long("stage")
                        .value_name("NAME")
                        .help("Only show this stage in the stages view")
                        .value_parser(clap::builder::PossibleValuesParser::new(stage_names()))
                        .value_hint(ValueHint::Other),
                )
                .arg(
                    Arg::new("include-unchanged")
                        .long("include-unchanged")
                        .help("Also list stages that left a block unchanged")
                        .action(ArgAction::SetTrue),
                ),
        )
        .subcommand(
            Command::new("convert")
                .about("Convert a markdown problem to OLX (default command)")
                .long_about(
                    "Convert a markdown problem to an OLX <problem> document.\n\n\
                    Blocks that do not come out as well-formed XML are kept as they are\n\
                    and reported as warnings. With --strict they make the command fail.\n\n\
                    Output goes to stdout by default, or use -o to specify a file.\n\n\
                    Examples:\n  \
                    olx convert question.md                  # Convert to stdout\n  \
                    olx convert question.md -o problem.xml   # Convert to a file\n  \
                    olx question.md --strict                 # 'convert' is optional",
                )
                .arg(
                    Arg::new("input")
                        .help("Input file path ('-' for stdin)")
                        .required(true)
                        .index(1)
                        .value_hint(ValueHint::FilePath),
                )
                .arg(
                    Arg::new("output")
                        .long("output")
                        .short('o')
                        .help("Output file path (defaults to stdout)")
                        .value_hint(ValueHint::FilePath),
                )
                .arg(
                    Arg::new("strict")
                        .long("strict")
                        .help("Fail if a block is not well-formed XML")
                        .action(ArgAction::SetTrue),
                ),
        )
}

fn main() {
    let args: Vec<String> = std::env::args().collect();
    let (cleaned_args, mut extra_params) = parse_extra_args(&args);

    // A bare input path means "convert"
    let cli = build_cli();
    let matches = match cli.clone().try_get_matches_from(&cleaned_args) {
        Ok(m) => m,
        Err(e) => {
            if needs_convert(&cleaned_args) {
                let mut new_args = vec![cleaned_args[0].clone(), "convert".to_string()];
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

    if matches.get_flag("list-stages") {
        handle_list_stages_command();
        return;
    }

    let mut config = load_cli_config(matches.get_one::<String>("config").map(|s| s.as_str()));
    apply_config_overrides(&mut config, &mut extra_params);
    init_logging(&config);

    for key in extra_params.keys() {
        eprintln!("Warning: ignoring unknown option --extra-{key}");
    }

    match matches.subcommand() {
        Some(("inspect", sub_matches)) => {
            let Some(path) = sub_matches.get_one::<String>("path") else {
                eprintln!("Missing input path");
                std::process::exit(1);
            };
            if sub_matches.get_flag("include-unchanged") {
                config.inspect.include_unchanged = true;
            }
            let view = sub_matches
                .get_one::<String>("view")
                .map(|s| s.as_str())
                .unwrap_or(config.inspect.view.name());
            let stage = sub_matches.get_one::<String>("stage").map(|name| {
                name.parse::<Stage>().unwrap_or_else(|e| {
                    eprintln!("Error: {e}");
                    std::process::exit(1);
                })
            });
            handle_inspect_command(path, view, stage, &config);
        }
        Some(("convert", sub_matches)) => {
            let Some(input) = sub_matches.get_one::<String>("input") else {
                eprintln!("Missing input path");
                std::process::exit(1);
            };
            if sub_matches.get_flag("strict") {
                config.convert.strict = true;
            }
            let output = sub_matches.get_one::<String>("output").map(|s| s.as_str());
            handle_convert_command(input, output, &config);
        }
        _ => {
            eprintln!("Unknown subcommand. Use --help for usage information.");
            std::process::exit(1);
        }
    }
}

/// RUST_LOG wins over the configured level
fn init_logging(config: &OlxConfig) {
    env_logger::Builder::from_env(Env::default().default_filter_or(config.log.level.as_str()))
        .format_timestamp(None)
        .init();
}

fn read_source(input: &str) -> String {
    if input == "-" {
        let mut source = String::new();
        io::stdin().read_to_string(&mut source).unwrap_or_else(|e| {
            eprintln!("Error reading stdin: {e}");
            std::process::exit(1);
        });
        return source;
    }

    fs::read_to_string(input).unwrap_or_else(|e| {
        eprintln!("Error reading file '{input}': {e}");
        std::process::exit(1);
    })
}

/// Handle the inspect command
fn handle_inspect_command(path: &str, view: &str, stage: Option<Stage>, config: &OlxConfig) {
    let source = read_source(path);

    let mut options = TraceOptions::from(&config.inspect);
    options.stage = stage;

    let output = inspect::execute_view(&source, view, &options).unwrap_or_else(|e| {
        eprintln!("Execution error: {e}");
        std::process::exit(1);
    });

    print!("{output}");
}

/// Handle the convert command
fn handle_convert_command(input: &str, output: Option<&str>, config: &OlxConfig) {
    let source = read_source(input);

    let options = ConvertOptions::from(&config.convert);
    let mut olx = convert_with_options(&source, &options).unwrap_or_else(|e| {
        eprintln!("Conversion error: {e}");
        std::process::exit(1);
    });

    if config.convert.trailing_newline {
        olx.push('\n');
    }

    match output {
        Some(path) => {
            fs::write(path, olx).unwrap_or_else(|e| {
                eprintln!("Error writing file '{path}': {e}");
                std::process::exit(1);
            });
        }
        None => print!("{olx}"),
    }
}

/// Handle the list-stages command
fn handle_list_stages_command() {
    println!("Pipeline stages (run in order on every block):\n");
    for stage in Stage::ALL {
        println!("  {:<24}{}", stage.name(), stage.description());
    }

    println!("\nInspect views:");
    for view in InspectView::ALL {
        println!("  {view}");
    }
}

fn load_cli_config(explicit_path: Option<&str>) -> OlxConfig {
    let loader = Loader::new().with_optional_file("olx.toml");
    let loader = if let Some(path) = explicit_path {
        loader.with_file(path)
    } else {
        loader
    };

    loader.build().unwrap_or_else(|err| {
        eprintln!("Failed to load configuration: {err}");
        std::process::exit(1);
    })
}

fn apply_config_overrides(config: &mut OlxConfig, extra_params: &mut HashMap<String, String>) {
    if let Some(raw) = extra_params.remove("strict") {
        config.convert.strict = parse_bool_arg("strict", &raw);
    }
    if let Some(raw) = take_override(extra_params, &["trailing-newline", "trailing_newline"]) {
        config.convert.trailing_newline = parse_bool_arg("trailing-newline", &raw);
    }
    if let Some(raw) = take_override(extra_params, &["include-unchanged", "include_unchanged"]) {
        config.inspect.include_unchanged = parse_bool_arg("include-unchanged", &raw);
    }

    if let Some(raw) = take_override(extra_params, &["view", "inspect-view"]) {
        config.inspect.view = InspectView::from_name(&raw).unwrap_or_else(|| {
            eprintln!("Invalid view '{raw}' for --extra-view");
            std::process::exit(1);
        });
    }

    if let Some(level) = take_override(extra_params, &["log-level", "log_level"]) {
        config.log.level = level;
    }
}

fn take_override(map: &mut HashMap<String, String>, keys: &[&str]) -> Option<String> {
    for key in keys {
        if let Some(value) = map.remove(*key) {
            return Some(value);
        }
    }
    None
}

fn parse_bool_arg(flag: &str, raw: &str) -> bool {
    match raw.to_lowercase().as_str() {
        "true" | "1" | "yes" | "y" => true,
        "false" | "0" | "no" | "n" => false,
        other => {
            eprintln!("Invalid boolean value '{other}' for --extra-{flag}");
            std::process::exit(1);
        }
    }
}
