use anyhow::{Context, Result, bail};
use mdweave_config::Config;
use mdweave_engine::{markdown_to_editor_html, markdown_to_html};
use std::io::{Read, Write};
use std::path::PathBuf;
use std::{env, fs, io, process};

const USAGE: &str = "Usage: mdweave [--editor] [--config PATH] [FILE]";

/// Which dialect to render with.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Dialect {
    Html,
    Editor,
}

#[derive(Debug, PartialEq, Eq)]
struct Args {
    dialect: Dialect,
    config: Option<PathBuf>,
    /// `None` reads standard input.
    input: Option<PathBuf>,
}

impl Args {
    fn parse<I: IntoIterator<Item = String>>(args: I) -> Result<Self> {
        let mut parsed = Args {
            dialect: Dialect::Html,
            config: None,
            input: None,
        };
        let mut args = args.into_iter();
        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--editor" => parsed.dialect = Dialect::Editor,
                "--config" => {
                    let path = args.next().context("--config needs a path")?;
                    parsed.config = Some(PathBuf::from(path));
                }
                flag if flag.starts_with("--") => bail!("unknown option {flag}"),
                _ if parsed.input.is_some() => bail!("more than one input file given"),
                file => parsed.input = Some(PathBuf::from(file)),
            }
        }
        Ok(parsed)
    }
}

fn read_input(input: Option<&PathBuf>) -> Result<String> {
    match input {
        Some(path) => fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display())),
        None => {
            let mut source = String::new();
            io::stdin()
                .read_to_string(&mut source)
                .context("failed to read standard input")?;
            Ok(source)
        }
    }
}

fn run(args: &Args) -> Result<String> {
    let config = Config::resolve(args.config.as_deref())?;
    let source = read_input(args.input.as_ref())?;
    log::info!(
        "rendering {} bytes as {:?}",
        source.len(),
        args.dialect
    );

    let output = match args.dialect {
        Dialect::Html => markdown_to_html(&source, &config.parse, &config.render)?,
        Dialect::Editor => markdown_to_editor_html(&source, &config.parse, &config.render)?,
    };
    Ok(output)
}

fn main() -> Result<()> {
    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Info)
        .init();

    let args = match Args::parse(env::args().skip(1)) {
        Ok(args) => args,
        Err(e) => {
            eprintln!("Error: {e}");
            eprintln!("{USAGE}");
            process::exit(1);
        }
    };

    let output = run(&args)?;
    io::stdout().write_all(output.as_bytes())?;
    Ok(())
}
