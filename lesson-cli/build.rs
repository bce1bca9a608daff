use clap::{Arg, ArgAction, Command, ValueHint};
use clap_complete::{generate_to, shells::*};
use std::env;
use std::io::Error;

// Mirror of the formats registered by lesson-babel's FormatRegistry::default()
// We need to duplicate this here since build scripts can't access the library
const AVAILABLE_FORMATS: &[&str] = &["json", "markdown"];

fn main() -> Result<(), Error> {
    let outdir = match env::var_os("OUT_DIR") {
        None => return Ok(()),
        Some(outdir) => outdir,
    };

    let input = || {
        Arg::new("input")
            .help("Input file path")
            .required(true)
            .index(1)
            .value_hint(ValueHint::FilePath)
    };

    let slt = || {
        Arg::new("slt")
            .help("The learning target")
            .required(true)
            .num_args(1..)
            .index(1)
            .value_hint(ValueHint::Other)
    };

    let mut cmd = Command::new("lesson")
        .version(env!("CARGO_PKG_VERSION"))
        .about("A tool for converting lesson content between Markdown and rich-text JSON")
        .arg_required_else_help(true)
        .arg(
            Arg::new("list-formats")
                .long("list-formats")
                .help("List available formats")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("config")
                .long("config")
                .help("Path to a lesson.toml configuration file")
                .value_hint(ValueHint::FilePath),
        )
        .arg(
            Arg::new("verbose")
                .long("verbose")
                .short('v')
                .help("Log conversion details to stderr")
                .action(ArgAction::SetTrue),
        )
        .subcommand(
            Command::new("convert")
                .about("Convert between document formats (default command)")
                .arg(input())
                .arg(
                    Arg::new("from")
                        .long("from")
                        .help("Source format")
                        .value_parser(clap::builder::PossibleValuesParser::new(AVAILABLE_FORMATS)),
                )
                .arg(
                    Arg::new("to")
                        .long("to")
                        .help("Target format")
                        .required(true)
                        .value_parser(clap::builder::PossibleValuesParser::new(AVAILABLE_FORMATS)),
                )
                .arg(
                    Arg::new("output")
                        .long("output")
                        .short('o')
                        .help("Output file path")
                        .value_hint(ValueHint::FilePath),
                ),
        )
        .subcommand(
            Command::new("normalize")
                .about("Print Markdown in canonical form")
                .arg(input()),
        )
        .subcommand(
            Command::new("view")
                .about("Render a lesson record as Markdown")
                .arg(input()),
        )
        .subcommand(
            Command::new("list")
                .about("List the lessons of a module")
                .arg(input())
                .arg(
                    Arg::new("module")
                        .long("module")
                        .short('m')
                        .help("Module code for the heading"),
                ),
        )
        .subcommand(
            Command::new("validate-slt")
                .about("Check that a Student Learning Target is a demonstrable 'I can...' capability")
                .arg(slt()),
        )
        .subcommand(
            Command::new("suggest-lesson-type")
                .about("Recommend a lesson template for a Student Learning Target")
                .arg(slt()),
        );

    // Generate completions for bash
    generate_to(Bash, &mut cmd, "lesson", &outdir)?;

    // Generate completions for zsh
    generate_to(Zsh, &mut cmd, "lesson", &outdir)?;

    // Generate completions for fish
    generate_to(Fish, &mut cmd, "lesson", &outdir)?;

    println!("cargo:warning=Shell completions generated in {outdir:?}");

    Ok(())
}
