use anyhow::Result;
use clap::Parser;
use findex_core::Error;
use findex_search::SearchApp;
use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use tracing_subscriber::{fmt, EnvFilter};

#[derive(Parser)]
#[command(name = "findex-search")]
#[command(about = "Query a findex index, one-shot or interactively", long_about = None)]
struct Args {
    /// Index directory path
    #[arg(long, default_value = "./index")]
    index: PathBuf,
    /// Run a single query and exit instead of prompting
    #[arg(long)]
    query: Option<String>,
    /// Maximum number of results per query
    #[arg(long, default_value_t = 10)]
    top_k: usize,
}

fn main() -> Result<()> {
    fmt().with_env_filter(EnvFilter::from_default_env()).init();
    let args = Args::parse();
    let app = SearchApp::open(&args.index)?;

    if let Some(query) = args.query {
        let rows = app.query(&query, args.top_k)?;
        print_rows(&rows);
        return Ok(());
    }

    interactive_loop(&app, args.top_k)
}

fn interactive_loop(app: &SearchApp, top_k: usize) -> Result<()> {
    let stdin = io::stdin();
    let mut line = String::new();
    loop {
        print!("query> ");
        io::stdout().flush()?;
        line.clear();
        if stdin.lock().read_line(&mut line)? == 0 {
            break;
        }
        let query = line.trim();
        if query.is_empty() {
            continue;
        }
        if query.eq_ignore_ascii_case("exit") || query.eq_ignore_ascii_case("quit") {
            break;
        }
        match app.query(query, top_k) {
            Ok(rows) => print_rows(&rows),
            // Parse failures are the user's to fix; reprompt.
            Err(err @ Error::QueryParse { .. }) => println!("{err}"),
            Err(err) => return Err(err.into()),
        }
    }
    Ok(())
}

fn print_rows(rows: &[findex_search::HitRow]) {
    println!("Found {} hits.", rows.len());
    for row in rows {
        println!("{row}");
    }
}
