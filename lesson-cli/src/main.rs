// Command-line interface for lesson content
//
// This binary converts lesson bodies between Markdown and the rich-text JSON payload the
// content store keeps, normalizes Markdown, renders stored lesson records for editing, and
// checks Student Learning Targets (SLTs).
// All conversion logic lives in lesson-babel; this crate wires it to files, flags and
// configuration.
//
// Converting:
//
// The conversion needs a to and from pair. The from is auto-detected from the file extension,
// while being overwrittable by an explicit --from flag. When the extension is unknown the
// configured `convert.markdown.default_from` is used, if any.
// Usage:
//  lesson <input> --to <format> [--from <format>] [--output <file>]          - Convert between formats (default)
//  lesson convert <input> --to <format> [--from <format>] [--output <file>]  - Same as above (explicit)
//  lesson normalize <input.md>           - Re-serialize Markdown in canonical form
//  lesson view <lesson.json>             - Render a stored lesson record as Markdown
//  lesson list <lessons.json> [--module <code>] - Overview of a module's lessons
//  lesson validate-slt <slt>             - Check an SLT; exits 1 when it is invalid
//  lesson suggest-lesson-type <slt>      - Recommend a lesson template for an SLT
//  lesson --list-formats                 - List available formats
//
// Extra Parameters:
//
// Parameters can be passed using --extra-<parameter-name> <value>.
// Known keys (pretty, placeholder) override configuration; the rest go to the target format.
// Example:
//  lesson lesson.md --to json --extra-pretty false

use clap::{Arg, ArgAction, Command, ValueHint};
use lesson_babel::lesson::{render_lesson, render_lesson_list, Lesson, RenderOptions};
use lesson_babel::slt::{suggest_lesson_type, validate_slt};
use lesson_babel::transforms::normalize_markdown;
use lesson_babel::FormatRegistry;
use lesson_config::{LessonConfig, Loader, LOCAL_CONFIG_FILE};
use std::collections::HashMap;
use std::fs;
use std::path::Path;
use tracing_subscriber::EnvFilter;

const SUBCOMMANDS: &[&str] = &[
    "convert",
    "normalize",
    "view",
    "list",
    "validate-slt",
    "suggest-lesson-type",
    "help",
];

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

        let key_opt = arg
            .strip_prefix("--extra-")
            .or_else(|| arg.strip_prefix("--extras-"));

        if let Some(key) = key_opt {
            let has_value = args
                .get(i + 1)
                .is_some_and(|next| !next.starts_with('-'));

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
    Command::new("lesson")
        .version(env!("CARGO_PKG_VERSION"))
        .about("A tool for converting lesson content between Markdown and rich-text JSON")
        .long_about(
            "lesson is a command-line tool for working with lesson bodies.\n\n\
            Commands:\n  \
            - convert:   Transform between markdown and json (default)\n  \
            - normalize: Print Markdown in its canonical form\n  \
            - view:      Render a stored lesson record for editing\n  \
            - list:      Overview of the lessons in a module\n  \
            - validate-slt, suggest-lesson-type: Check a learning target\n\n\
            Extra Parameters:\n  \
            Use --extra-<name> [value] to pass options.\n  \
            Boolean flags can omit the value (defaults to 'true').\n\n\
            Examples:\n  \
            lesson body.md --to json                      # Markdown to JSON (stdout)\n  \
            lesson body.json --to markdown -o body.md     # JSON payload to Markdown file\n  \
            lesson body.md --to json --extra-pretty false # Single-line JSON\n  \
            lesson view lesson.json                       # Lesson editing view\n  \
            lesson validate-slt \"I can explain a UTXO\"    # Check a learning target",
        )
        .arg_required_else_help(true)
        .subcommand_required(false)
        .arg(
            Arg::new("list-formats")
                .long("list-formats")
                .help("List available formats")
                .action(ArgAction::SetTrue)
                .global(true),
        )
        .arg(
            Arg::new("config")
                .long("config")
                .value_name("PATH")
                .help("Path to a lesson.toml configuration file")
                .value_hint(ValueHint::FilePath)
                .global(true),
        )
        .arg(
            Arg::new("verbose")
                .long("verbose")
                .short('v')
                .help("Log conversion details to stderr")
                .action(ArgAction::SetTrue)
                .global(true),
        )
        .subcommand(
            Command::new("convert")
                .about("Convert between document formats (default command)")
                .long_about(
                    "Convert lesson bodies between formats.\n\n\
                    Supported formats:\n  \
                    - markdown: Markdown (.md, .markdown)\n  \
                    - json:     Rich-text JSON payload (.json)\n\n\
                    The source format is auto-detected from the file extension.\n\
                    Output goes to stdout by default, or use -o to specify a file.\n\n\
                    Examples:\n  \
                    lesson convert body.md --to json               # Markdown to JSON (stdout)\n  \
                    lesson convert body.json --to markdown -o b.md # JSON to Markdown file\n  \
                    lesson body.md --to json                       # 'convert' is optional",
                )
                .arg(
                    Arg::new("input")
                        .help("Input file path")
                        .required(true)
                        .index(1)
                        .value_hint(ValueHint::FilePath),
                )
                .arg(
                    Arg::new("from")
                        .long("from")
                        .help("Source format (auto-detected from file extension if not specified)")
                        .value_hint(ValueHint::Other),
                )
                .arg(
                    Arg::new("to")
                        .long("to")
                        .help("Target format (required)")
                        .long_help(
                            "Target format to convert to.\n\n\
                            Available formats: markdown, json\n\
                            Use the format name, not the file extension.",
                        )
                        .required(true)
                        .value_hint(ValueHint::Other),
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
            Command::new("normalize")
                .about("Print Markdown in canonical form")
                .long_about(
                    "Parse Markdown into the lesson document model and serialize it back.\n\n\
                    Bullets become '-', ordered lists are renumbered from 1, rules become\n\
                    '---' and paragraph lines are joined. Output is written to stdout.\n\n\
                    Examples:\n  \
                    lesson normalize body.md             # Canonical Markdown to stdout\n  \
                    lesson normalize body.md > clean.md  # Redirect to file",
                )
                .arg(
                    Arg::new("input")
                        .help("Markdown file path")
                        .required(true)
                        .index(1)
                        .value_hint(ValueHint::FilePath),
                ),
        )
        .subcommand(
            Command::new("view")
                .about("Render a lesson record as Markdown")
                .long_about(
                    "Render a lesson record, as returned by the content store, into a\n\
                    Markdown editing view: title, learning target, description, media\n\
                    links, status and the body converted from its JSON payload.\n\n\
                    Examples:\n  \
                    lesson view lesson.json\n  \
                    lesson view lesson.json --extra-placeholder '(empty)'",
                )
                .arg(
                    Arg::new("input")
                        .help("Lesson record (JSON) file path")
                        .required(true)
                        .index(1)
                        .value_hint(ValueHint::FilePath),
                ),
        )
        .subcommand(
            Command::new("list")
                .about("List the lessons of a module")
                .long_about(
                    "Render a JSON array of lesson records as a numbered Markdown overview:\n\
                    title, SLT index, SLT text, status and description of each lesson.\n\n\
                    Examples:\n  \
                    lesson list GIT-101.json                 # Module code taken from the file name\n  \
                    lesson list lessons.json --module GIT-101",
                )
                .arg(
                    Arg::new("input")
                        .help("Lesson records (JSON array) file path")
                        .required(true)
                        .index(1)
                        .value_hint(ValueHint::FilePath),
                )
                .arg(
                    Arg::new("module")
                        .long("module")
                        .short('m')
                        .value_name("CODE")
                        .help("Module code for the heading (defaults to the file stem)"),
                ),
        )
        .subcommand(
            Command::new("validate-slt")
                .about("Check that a Student Learning Target is a demonstrable 'I can...' capability")
                .long_about(
                    "Check a Student Learning Target. It must start with 'I can', be specific\n\
                    enough, and avoid vague verbs such as 'understand' or 'learn'.\n\
                    Exits with status 1 when the target is invalid.\n\n\
                    Examples:\n  \
                    lesson validate-slt \"I can explain what a UTXO is\"\n  \
                    lesson validate-slt I can create a new module",
                )
                .arg(slt_arg()),
        )
        .subcommand(
            Command::new("suggest-lesson-type")
                .about("Recommend a lesson template for a Student Learning Target")
                .arg(slt_arg()),
        )
}

fn slt_arg() -> Arg {
    Arg::new("slt")
        .help("The learning target; several words are joined with spaces")
        .required(true)
        .num_args(1..)
        .index(1)
        .value_hint(ValueHint::Other)
}

fn main() {
    let args: Vec<String> = std::env::args().collect();

    let (cleaned_args, mut extra_params) = parse_extra_args(&args);

    let cli = build_cli();
    let matches = match cli.clone().try_get_matches_from(&cleaned_args) {
        Ok(m) => m,
        Err(e) => {
            // A leading path means the subcommand was left out: retry as `convert`.
            if cleaned_args.len() > 1
                && !cleaned_args[1].starts_with('-')
                && !SUBCOMMANDS.contains(&cleaned_args[1].as_str())
            {
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

    if matches.get_flag("list-formats") {
        handle_list_formats_command();
        return;
    }

    let mut config = load_cli_config(matches.get_one::<String>("config").map(|s| s.as_str()));
    apply_config_overrides(&mut config, &mut extra_params);
    init_logging(&config.logging.level, matches.get_flag("verbose"));

    match matches.subcommand() {
        Some(("convert", sub_matches)) => {
            let Some(input) = sub_matches.get_one::<String>("input") else {
                exit_with_error("input is required");
            };
            let Some(to) = sub_matches.get_one::<String>("to") else {
                exit_with_error("--to is required");
            };
            let explicit_from = sub_matches.get_one::<String>("from").map(|s| s.as_str());
            let from = resolve_source_format(input, explicit_from, &config).unwrap_or_else(|msg| {
                eprintln!("Error: {msg}");
                eprintln!("Please specify --from explicitly");
                std::process::exit(1);
            });

            let output = sub_matches.get_one::<String>("output").map(|s| s.as_str());
            handle_convert_command(input, &from, to, output, &extra_params, &config);
        }
        Some(("normalize", sub_matches)) => {
            let Some(input) = sub_matches.get_one::<String>("input") else {
                exit_with_error("input is required");
            };
            handle_normalize_command(input);
        }
        Some(("view", sub_matches)) => {
            let Some(input) = sub_matches.get_one::<String>("input") else {
                exit_with_error("input is required");
            };
            handle_view_command(input, &config);
        }
        Some(("list", sub_matches)) => {
            let Some(input) = sub_matches.get_one::<String>("input") else {
                exit_with_error("input is required");
            };
            let module = sub_matches.get_one::<String>("module").map(|s| s.as_str());
            handle_list_command(input, module);
        }
        Some(("validate-slt", sub_matches)) => {
            handle_validate_slt_command(&slt_from_matches(sub_matches));
        }
        Some(("suggest-lesson-type", sub_matches)) => {
            print!("{}", suggest_lesson_type(&slt_from_matches(sub_matches)).render());
        }
        _ => {
            eprintln!("Unknown subcommand. Use --help for usage information.");
            std::process::exit(1);
        }
    }
}

fn exit_with_error(message: &str) -> ! {
    eprintln!("Error: {message}");
    std::process::exit(1);
}

/// Installs the stderr subscriber. `RUST_LOG` wins over the configured level; `--verbose`
/// wins over both.
fn init_logging(level: &str, verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level))
    };

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .compact()
        .try_init();
}

fn read_input(path: &str) -> String {
    fs::read_to_string(path).unwrap_or_else(|e| {
        eprintln!("Error reading file '{path}': {e}");
        std::process::exit(1);
    })
}

/// Picks the source format: explicit flag, then file extension, then configured fallback.
fn resolve_source_format(
    input: &str,
    explicit: Option<&str>,
    config: &LessonConfig,
) -> Result<String, String> {
    if let Some(format) = explicit {
        return Ok(format.to_string());
    }

    let registry = FormatRegistry::default();
    registry
        .detect_format_from_filename(input)
        .or_else(|| config.convert.markdown.default_from.clone())
        .ok_or_else(|| format!("Could not detect format from filename '{input}'"))
}

/// Handle the convert command
fn handle_convert_command(
    input: &str,
    from: &str,
    to: &str,
    output: Option<&str>,
    extra_params: &HashMap<String, String>,
    config: &LessonConfig,
) {
    let registry = FormatRegistry::default();

    if let Err(e) = registry.get(from) {
        exit_with_error(&e.to_string());
    }
    if let Err(e) = registry.get(to) {
        exit_with_error(&e.to_string());
    }

    let source = read_input(input);
    tracing::debug!(input, from, to, bytes = source.len(), "converting");

    let doc = registry
        .parse(&source, from)
        .unwrap_or_else(|e| exit_with_error(&e.to_string()));

    let format_options = format_options_from_config(to, config, extra_params);
    let result = registry
        .serialize_with_options(&doc, to, &format_options)
        .unwrap_or_else(|e| exit_with_error(&e.to_string()));

    match output {
        Some(path) => {
            fs::write(path, result).unwrap_or_else(|e| {
                eprintln!("Error writing file '{path}': {e}");
                std::process::exit(1);
            });
            tracing::debug!(path, "wrote output");
        }
        None => println!("{result}"),
    }
}

/// Handle the normalize command
fn handle_normalize_command(input: &str) {
    let source = read_input(input);
    println!("{}", normalize_markdown(&source));
}

/// Handle the view command
fn handle_view_command(input: &str, config: &LessonConfig) {
    let source = read_input(input);
    let lesson: Lesson = serde_json::from_str(&source).unwrap_or_else(|e| {
        eprintln!("Parse error: {e}");
        std::process::exit(1);
    });

    let options = RenderOptions::from(&config.lesson);
    println!("{}", render_lesson(&lesson, &options));
}

/// Handle the list command
fn handle_list_command(input: &str, module: Option<&str>) {
    let source = read_input(input);
    let lessons: Vec<Lesson> = serde_json::from_str(&source).unwrap_or_else(|e| {
        eprintln!("Parse error: {e}");
        std::process::exit(1);
    });

    let module = module_code(input, module);
    tracing::debug!(module, lessons = lessons.len(), "listing module lessons");
    print!("{}", render_lesson_list(&module, &lessons));
}

/// Explicit `--module`, otherwise the input's file stem.
fn module_code(input: &str, explicit: Option<&str>) -> String {
    match explicit {
        Some(code) => code.to_string(),
        None => Path::new(input)
            .file_stem()
            .map(|stem| stem.to_string_lossy().into_owned())
            .unwrap_or_else(|| input.to_string()),
    }
}

fn slt_from_matches(matches: &clap::ArgMatches) -> String {
    matches
        .get_many::<String>("slt")
        .map(|words| words.map(String::as_str).collect::<Vec<_>>().join(" "))
        .unwrap_or_default()
}

/// Handle the validate-slt command
fn handle_validate_slt_command(slt: &str) {
    let result = validate_slt(slt);
    print!("{}", result.render());
    if !result.valid {
        std::process::exit(1);
    }
}

/// Handle the list-formats command
fn handle_list_formats_command() {
    let registry = FormatRegistry::default();
    println!("Available formats:\n");
    for format_name in registry.list_formats() {
        if let Ok(format) = registry.get(&format_name) {
            println!(
                "  {:<10} {} (.{})",
                format_name,
                format.description(),
                format.file_extensions().join(", .")
            );
        }
    }
}

fn load_cli_config(explicit_path: Option<&str>) -> LessonConfig {
    let loader = Loader::new().with_optional_file(LOCAL_CONFIG_FILE);
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

fn apply_config_overrides(config: &mut LessonConfig, extra_params: &mut HashMap<String, String>) {
    if let Some(raw) = extra_params.remove("pretty") {
        config.convert.json.pretty = parse_bool_arg("pretty", &raw);
    }
    if let Some(raw) = take_override(extra_params, &["placeholder", "empty-content-placeholder"]) {
        config.lesson.empty_content_placeholder = raw;
    }
}

/// Options handed to the target format: configured defaults first, then leftover extras.
fn format_options_from_config(
    to: &str,
    config: &LessonConfig,
    overrides: &HashMap<String, String>,
) -> HashMap<String, String> {
    let mut options = HashMap::new();
    if to == "json" {
        options.insert("pretty".to_string(), config.convert.json.pretty.to_string());
    }
    for (key, value) in overrides {
        options.insert(key.clone(), value.clone());
    }
    options
}

fn take_override(map: &mut HashMap<String, String>, keys: &[&str]) -> Option<String> {
    keys.iter().find_map(|key| map.remove(*key))
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
