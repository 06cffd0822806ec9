use std::io::Read;
use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::Parser as ClapParser;
use sqlparse::{lex, Parser, TokenKind};

#[derive(ClapParser, Debug)]
#[command(name = "sqlparse")]
#[command(about = "Tokenize and parse SELECT statements", long_about = None)]
struct Args {
    /// SQL text to parse; "-" or nothing reads stdin
    query: Option<String>,

    /// Read the SQL text from a file instead
    #[arg(short, long, conflicts_with = "query")]
    file: Option<PathBuf>,

    /// Print the token stream before parsing
    #[arg(short, long)]
    tokens: bool,

    /// Print the debug structure of each statement
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();

    let source = match (&args.file, args.query.as_deref()) {
        (Some(path), _) => std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?,
        (None, Some(query)) if query != "-" => query.to_string(),
        (None, _) => {
            let mut buffer = String::new();
            std::io::stdin()
                .read_to_string(&mut buffer)
                .context("Failed to read from stdin")?;
            buffer
        }
    };

    let tokens = lex(&source);
    if args.tokens {
        for (i, token) in tokens.iter().enumerate() {
            println!("{i:4}: {token}");
        }
    }
    if let Some(bad) = tokens.iter().find(|t| t.kind == TokenKind::Error) {
        bail!("Lexical error near {:?}", bad.literal);
    }

    let stmts = Parser::new(tokens)
        .parse()
        .context("Failed to parse input")?;
    for stmt in &stmts {
        println!("{stmt};");
        if args.verbose {
            println!("{stmt:#?}");
        }
    }

    Ok(())
}
