use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::io::IsTerminal;
use std::process::ExitCode;

use pomassert::check::{Analyzer, Checker, PomAnalyzer, Statement};
use pomassert::config::Config;
use pomassert::document::tree::DocTree;
use pomassert::error::CheckError;
use pomassert::file::loader::{load_document_file, load_document_from_stdin};

/// pomassert - structural assertions for build descriptors
#[derive(Parser)]
#[command(name = "pomassert")]
#[command(version)]
#[command(about = "Check the structure of pom.xml and similar descriptors", long_about = None)]
struct Cli {
    /// Descriptor to read (omit to read piped stdin, or the configured default document)
    #[arg(short, long, global = true)]
    file: Option<String>,

    /// Log what each assertion does
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Print the flattened path/value pairs of the descriptor
    Paths {
        /// Only print paths at or below this node
        #[arg(long)]
        prefix: Option<String>,

        /// Print JSON lines instead of `path = value`
        #[arg(long)]
        json: bool,
    },
    /// Assert on a node; all given predicates are chained with `and`
    Check {
        /// Given node the predicates are scoped to
        #[arg(long)]
        node: String,

        /// Assert that the predicates do not hold
        #[arg(long)]
        not: bool,

        /// Tag that should end a path below the node
        #[arg(long)]
        tag: Vec<String>,

        /// Value that should be contained below the node
        #[arg(long)]
        contains: Vec<String>,

        /// Value that should equal a value below the node
        #[arg(long)]
        equals: Vec<String>,

        /// Property that should be declared
        #[arg(long)]
        property: Vec<String>,

        /// Text prefixed to the failure report
        #[arg(long)]
        reason: Option<String>,
    },
}

fn init_tracing(verbose: bool) {
    let default_level = if verbose {
        tracing::Level::DEBUG
    } else {
        tracing::Level::WARN
    };

    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env().add_directive(default_level.into()),
        )
        .init();
}

fn load_tree(file: Option<&str>, config: &Config) -> Result<DocTree> {
    match file {
        Some(path) => load_document_file(path),
        None if !std::io::stdin().is_terminal() => load_document_from_stdin(),
        None => load_document_file(&config.default_document),
    }
}

/// A predicate requested on the command line.
enum Predicate<'a> {
    Tag(&'a str),
    Contains(&'a str),
    Equals(&'a str),
    Property(&'a str),
}

impl Predicate<'_> {
    fn apply(&self, analyzer: PomAnalyzer) -> Result<Statement<PomAnalyzer>, CheckError> {
        match self {
            Predicate::Tag(tag) => analyzer.have_tag(tag),
            Predicate::Contains(value) => analyzer.contain_value(value),
            Predicate::Equals(value) => analyzer.equals_value(value),
            Predicate::Property(name) => analyzer.have_property(name),
        }
    }
}

fn run_check(
    checker: &Checker,
    node: &str,
    negate: bool,
    predicates: &[Predicate<'_>],
    reason: Option<&str>,
) -> Result<ExitCode> {
    let (first, rest) = predicates
        .split_first()
        .context("check needs at least one of --tag, --contains, --equals or --property")?;

    let inclusion = checker.checking(node);
    let analyzer = if negate {
        inclusion.should_not()
    } else {
        inclusion.should()
    };

    let mut statement = first.apply(analyzer)?;
    for predicate in rest {
        statement = predicate.apply(statement.and())?;
    }

    let outcome = match reason {
        Some(reason) => statement.validate_with_reason(reason),
        None => statement.validate(),
    };

    match outcome {
        Ok(()) => {
            println!("✓ {} passed", node);
            Ok(ExitCode::SUCCESS)
        }
        Err(CheckError::Validation(failure)) => {
            eprint!("{}", failure.report());
            Ok(ExitCode::FAILURE)
        }
        Err(other) => Err(other.into()),
    }
}

fn main() -> Result<ExitCode> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let config = Config::load();
    let tree = load_tree(cli.file.as_deref(), &config)?;
    let checker = Checker::from_tree(&tree).with_config(&config);

    match cli.command {
        Command::Paths { prefix, json } => {
            let matching = config.path_matching;
            for element in checker.elements() {
                if let Some(prefix) = prefix.as_deref() {
                    if !matching.is_under(element.path(), prefix) {
                        continue;
                    }
                }
                if json {
                    println!("{}", serde_json::to_string(element)?);
                } else {
                    println!("{} = {}", element.path(), element.value());
                }
            }
            Ok(ExitCode::SUCCESS)
        }
        Command::Check {
            node,
            not,
            tag,
            contains,
            equals,
            property,
            reason,
        } => {
            let predicates: Vec<Predicate<'_>> = tag
                .iter()
                .map(|t| Predicate::Tag(t))
                .chain(contains.iter().map(|v| Predicate::Contains(v)))
                .chain(equals.iter().map(|v| Predicate::Equals(v)))
                .chain(property.iter().map(|p| Predicate::Property(p)))
                .collect();
            run_check(&checker, &node, not, &predicates, reason.as_deref())
        }
    }
}
