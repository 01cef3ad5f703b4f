use clap::{Arg, ArgAction, Command, ValueHint};
use clap_complete::{generate_to, shells::*};
use std::env;
use std::io::Error;

// Mirror of Stage::ALL and inspect::AVAILABLE_VIEWS
// We need to duplicate these here since build scripts can't access src/ modules
const STAGES: &[&str] = &[
    "normalize-line-endings",
    "headers",
    "labels",
    "demand-hints",
    "fold-hints",
    "option-response",
    "multiple-choice",
    "checkbox",
    "answers",
    "explanations",
    "paragraphs",
    "whitespace",
    "demand-hint-assembly",
    "hoist-response",
    "cleanup",
];

const VIEWS: &[&str] = &["stages", "stages-json", "response-types", "problem-type"];

fn main() -> Result<(), Error> {
    let outdir = match env::var_os("OUT_DIR") {
        None => return Ok(()),
        Some(outdir) => outdir,
    };

    let mut cmd = Command::new("olx")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Convert markdown problem shorthand to OLX")
        .arg_required_else_help(true)
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
                .arg(
                    Arg::new("path")
                        .help("Path to the markdown problem ('-' for stdin)")
                        .required(true)
                        .index(1)
                        .value_hint(ValueHint::FilePath),
                )
                .arg(
                    Arg::new("view")
                        .help("View to show")
                        .value_parser(clap::builder::PossibleValuesParser::new(VIEWS))
                        .index(2)
                        .value_hint(ValueHint::Other),
                )
                .arg(
                    Arg::new("stage")
                        .long("stage")
                        .help("Only show this stage in the stages view")
                        .value_parser(clap::builder::PossibleValuesParser::new(STAGES)),
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
        );

    generate_to(Bash, &mut cmd, "olx", &outdir)?;
    generate_to(Zsh, &mut cmd, "olx", &outdir)?;
    generate_to(Fish, &mut cmd, "olx", &outdir)?;

    println!("cargo:warning=Shell completions generated in {outdir:?}");

    Ok(())
}
