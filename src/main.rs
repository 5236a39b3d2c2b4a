use anise_lang::Config;
use anise_lang::cli::{self, CliError, EvalOptions, EvalOutcome};
use clap::{Parser as ClapParser, Subcommand};
use std::io::{self, Read};

#[derive(ClapParser)]
#[command(name = "anise")]
#[command(about = "Anise - A small expression language with a builtin function library")]
#[command(version)]
struct Cli {
    /// Enable debug logging (RUST_LOG overrides)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Evaluate an expression
    Eval {
        /// The expression to evaluate
        expression: String,

        /// Variable binding as name=value (value parsed as JSON, else a string)
        #[arg(long = "var", value_name = "NAME=VALUE")]
        vars: Vec<String>,

        /// JSON object of variables (reads from stdin if not provided)
        #[arg(short, long)]
        context: Option<String>,

        /// Require a boolean result
        #[arg(long = "bool")]
        as_bool: bool,

        /// Pretty-print the output
        #[arg(short, long)]
        pretty: bool,

        /// Only validate syntax, don't evaluate
        #[arg(long)]
        syntax_only: bool,
    },

    /// Render an expression as template condition syntax
    Template {
        /// The expression to render
        expression: String,
    },

    /// List every available function
    Functions,

    /// List documentation categories
    Docs,

    /// Show documentation for a specific category
    Doc {
        /// Category name (use 'anise docs' to list categories)
        category: String,
    },
}

fn main() {
    let cli = Cli::parse();

    let default_level = if cli.verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .format_timestamp(None)
        .init();

    let result = match cli.command {
        Commands::Eval {
            expression,
            vars,
            context,
            as_bool,
            pretty,
            syntax_only,
        } => run_eval(
            EvalOptions {
                expression,
                context,
                vars,
                as_bool,
                syntax_only,
            },
            pretty,
        ),
        Commands::Template { expression } => match anise_lang::render_template(&expression) {
            Ok(rendered) => {
                println!("{}", rendered);
                Ok(())
            }
            Err(e) => Err(CliError::Parse(e)),
        },
        Commands::Functions => Config::from_env().map_err(CliError::from).map(|config| {
            for name in cli::list_functions(&config) {
                println!("{}", name);
            }
        }),
        Commands::Docs => {
            print!("{}", cli::get_docs_overview());
            Ok(())
        }
        Commands::Doc { category } => cli::get_doc_category(&category).map(|content| {
            print!("{}", content);
        }),
    };

    if let Err(e) = result {
        eprintln!("{}", e);
        std::process::exit(1);
    }
}

fn run_eval(mut options: EvalOptions, pretty: bool) -> Result<(), CliError> {
    let config = Config::from_env()?;

    if options.context.is_none() && !options.syntax_only && !atty::is(atty::Stream::Stdin) {
        let mut buffer = String::new();
        io::stdin().read_to_string(&mut buffer).map_err(CliError::Io)?;
        if !buffer.trim().is_empty() {
            options.context = Some(buffer);
        }
    }

    match cli::execute_eval(&options, &config)? {
        EvalOutcome::SyntaxValid => println!("Syntax is valid"),
        EvalOutcome::Bool(b) => println!("{}", b),
        EvalOutcome::Value(output) => {
            let json = if pretty {
                serde_json::to_string_pretty(&output)
            } else {
                serde_json::to_string(&output)
            }?;
            println!("{}", json);
        }
    }
    Ok(())
}
