use clap::{Args, Parser, Subcommand};
use colored::Colorize;
use shorthand_core::analysis::{AnalysisOptions, DEFAULT_EXPANSION_LIMIT};
use shorthand_core::parser::tokenizer::Tokenizer;
use shorthand_core::{analyze_with, parse, render, GrammarError, Node, Token};
use std::path::PathBuf;
use std::process;
use tracing_subscriber::EnvFilter;

/// Shorthand — CSS shorthand grammar diagnostics
///
/// Expand value-definition grammars and find ambiguous spellings.
#[derive(Parser)]
#[command(name = "shorthand", version, about, long_about = None)]
struct Cli {
    /// Only report failures
    #[arg(long, short, global = true)]
    quiet: bool,

    /// Log analysis progress to stderr (RUST_LOG takes precedence)
    #[arg(long, short, global = true)]
    verbose: bool,

    /// Maximum number of expansions, and of sample renderings, to examine;
    /// 0 for no limit
    #[arg(
        long,
        global = true,
        env = "SHORTHAND_EXPANSION_LIMIT",
        default_value_t = DEFAULT_EXPANSION_LIMIT
    )]
    limit: usize,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Full analysis: reject empty-accepting and ambiguous grammars
    Check {
        #[command(flatten)]
        input: GrammarInput,
        /// Output as JSON
        #[arg(long)]
        json: bool,
        /// Show which expansions produce each ambiguous string
        #[arg(long)]
        explain: bool,
    },

    /// List every distinct expansion of a grammar
    Expand {
        #[command(flatten)]
        input: GrammarInput,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show the token stream of a grammar
    Tokens {
        #[command(flatten)]
        input: GrammarInput,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Print a grammar in canonical form
    Fmt {
        #[command(flatten)]
        input: GrammarInput,
        /// Print the combinator tree instead
        #[arg(long)]
        tree: bool,
    },

    /// List the token vocabulary and sample values
    Vocabulary {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show version information
    Version,
}

#[derive(Args)]
struct GrammarInput {
    /// Grammar text, e.g. "<offset-distance> || <offset-rotation>"
    #[arg(required_unless_present = "file", conflicts_with = "file")]
    grammar: Option<String>,

    /// Read the grammar from a file
    #[arg(long, short)]
    file: Option<PathBuf>,
}

impl GrammarInput {
    fn read(&self) -> Result<String, String> {
        match (&self.grammar, &self.file) {
            (Some(text), _) => Ok(text.clone()),
            (None, Some(path)) => std::fs::read_to_string(path)
                .map_err(|e| format!("cannot read {}: {}", path.display(), e)),
            (None, None) => Err("no grammar given".to_string()),
        }
    }
}

// ── Exit codes ────────────────────────────────────────────

const EXIT_OK: i32 = 0;
const EXIT_REJECTED: i32 = 1;
const EXIT_ERROR: i32 = 2;

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let options = if cli.limit == 0 {
        AnalysisOptions::unlimited()
    } else {
        AnalysisOptions::with_expansion_limit(cli.limit)
    };

    let exit_code = match cli.command {
        Commands::Check {
            input,
            json,
            explain,
        } => with_grammar(&input, json, |text| {
            cmd_check(text, &options, json, explain, cli.quiet)
        }),
        Commands::Expand { input, json } => {
            with_grammar(&input, json, |text| cmd_expand(text, &options, json))
        }
        Commands::Tokens { input, json } => {
            with_grammar(&input, json, |text| cmd_tokens(text, json))
        }
        Commands::Fmt { input, tree } => with_grammar(&input, false, |text| cmd_fmt(text, tree)),
        Commands::Vocabulary { json } => cmd_vocabulary(json),
        Commands::Version => {
            println!("shorthand {}", env!("CARGO_PKG_VERSION"));
            EXIT_OK
        }
    };

    process::exit(exit_code);
}

fn init_logging(verbose: bool) {
    let default = if verbose {
        "shorthand_core=debug,shorthand_cli=debug"
    } else {
        "warn"
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

/// Read the grammar, run `command`, and turn errors into exit code 2
fn with_grammar<F>(input: &GrammarInput, json: bool, command: F) -> i32
where
    F: FnOnce(&str) -> Result<i32, GrammarError>,
{
    let text = match input.read() {
        Ok(text) => text,
        Err(msg) => {
            eprintln!("{} {}", "error:".red().bold(), msg);
            return EXIT_ERROR;
        }
    };
    tracing::debug!(grammar = %text.trim(), "read grammar");

    match command(&text) {
        Ok(code) => code,
        Err(err) => {
            if json {
                let out = serde_json::json!({ "valid": false, "error": err.to_string() });
                println!("{}", out);
            } else {
                eprintln!("{} {}", "error:".red().bold(), err);
            }
            EXIT_ERROR
        }
    }
}

// ── Commands ──────────────────────────────────────────────

fn cmd_check(
    text: &str,
    options: &AnalysisOptions,
    json: bool,
    explain: bool,
    quiet: bool,
) -> Result<i32, GrammarError> {
    let report = analyze_with(text, options)?;
    let verdict = report.check();
    let code = match &verdict {
        Ok(()) => EXIT_OK,
        Err(err) if err.is_rejection() => EXIT_REJECTED,
        Err(_) => EXIT_ERROR,
    };

    if json {
        let out = serde_json::json!({
            "valid": code == EXIT_OK,
            "error": verdict.as_ref().err().map(|e| e.to_string()),
            "report": report,
        });
        println!("{}", out);
        return Ok(code);
    }

    match verdict {
        Ok(()) => {
            if !quiet {
                for line in report.rendered_expansions() {
                    println!("{}", line);
                }
                println!(
                    "{} {} expansions, no ambiguities",
                    "valid:".green().bold(),
                    report.expansions.len()
                );
            }
        }
        Err(GrammarError::AcceptsEmpty) => {
            eprintln!("{} {}", "error:".red().bold(), GrammarError::AcceptsEmpty);
        }
        Err(GrammarError::Ambiguous { ambiguities }) => {
            eprintln!(
                "{} {} ambiguous rendering(s)",
                "error:".red().bold(),
                ambiguities.len()
            );
            if explain {
                for collision in &report.collisions {
                    println!("{}", collision.rendering);
                    for &index in &collision.expansions {
                        println!("    {}", render(&report.expansions[index]).dimmed());
                    }
                }
            } else {
                for line in ambiguities {
                    println!("{}", line);
                }
            }
        }
        Err(other) => return Err(other),
    }

    Ok(code)
}

fn cmd_expand(text: &str, options: &AnalysisOptions, json: bool) -> Result<i32, GrammarError> {
    let report = analyze_with(text, options)?;
    if json {
        println!("{}", serde_json::json!({ "expansions": report.expansions }));
    } else {
        for line in report.rendered_expansions() {
            println!("{}", line);
        }
    }
    Ok(EXIT_OK)
}

fn cmd_tokens(text: &str, json: bool) -> Result<i32, GrammarError> {
    let tokens = Tokenizer::new(text).tokenize()?;
    if json {
        println!("{}", serde_json::json!({ "tokens": tokens }));
    } else {
        for token in tokens {
            println!("{:<10} {}", token.kind().to_string().dimmed(), token);
        }
    }
    Ok(EXIT_OK)
}

fn cmd_fmt(text: &str, tree: bool) -> Result<i32, GrammarError> {
    let root = parse(text)?;
    if tree {
        print_tree(&root, 0);
    } else {
        println!("{}", root);
    }
    Ok(EXIT_OK)
}

fn print_tree(node: &Node, indent: usize) {
    match node {
        Node::Atom(token) => println!("{}{} {}", "  ".repeat(indent), node.kind_name(), token),
        _ => println!("{}{}", "  ".repeat(indent), node.kind_name()),
    }
    for child in node.children() {
        print_tree(child, indent + 1);
    }
}

fn cmd_vocabulary(json: bool) -> i32 {
    if json {
        let entries: Vec<serde_json::Value> = Token::all()
            .map(|token| {
                serde_json::json!({
                    "token": token,
                    "kind": token.kind(),
                    "samples": token.samples(),
                })
            })
            .collect();
        println!("{}", serde_json::Value::Array(entries));
    } else {
        for token in Token::all() {
            println!(
                "{:<22} {:<10} {}",
                token.as_str(),
                token.kind().to_string().dimmed(),
                token.samples().join(" | ")
            );
        }
    }
    EXIT_OK
}
