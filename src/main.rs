//! cheader - CLI

use anyhow::{bail, Context, Result};
use clap::{Parser, ValueEnum};
use std::path::{Path, PathBuf};

use cheader::frontend::comments::{collect, TranslateOptions};
use cheader::frontend::module::BuildEnvironment;
use cheader::frontend::preprocessor::Directive;
use cheader::util::config::{self, Config};
use cheader::util::logger::{self, LogLevel};
use cheader::util::span::SourceDocument;
use cheader::{translate_file, NAME, VERSION};

/// Load C/C++ headers as host modules, translating their comments
#[derive(Parser, Debug)]
#[command(name = "cheader")]
#[command(version = VERSION)]
#[command(about = NAME, long_about = None)]
struct Args {
    /// Header files to load
    #[arg(value_name = "FILE")]
    files: Vec<PathBuf>,

    /// Demonstration run over the given files
    #[arg(long, value_enum, value_name = "MODE")]
    test: Option<TestMode>,

    /// Resolve a dotted module name on the search path and load it
    #[arg(long = "import", value_name = "NAME")]
    imports: Vec<String>,

    /// Print collected comment metadata as JSON
    #[arg(long)]
    spans: bool,

    /// Render comments as """ blocks
    #[arg(long)]
    docstring: bool,

    /// Keep comment bodies verbatim
    #[arg(long)]
    preserve_whitespace: bool,

    /// Do not merge adjacent comments
    #[arg(long)]
    no_coalesce: bool,

    /// Add a search root (searched before configured roots)
    #[arg(short = 'I', long = "include", value_name = "DIR")]
    include: Vec<PathBuf>,

    /// Define a symbol in the build environment
    #[arg(short = 'D', long = "define", value_name = "SYMBOL")]
    define: Vec<String>,

    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
enum TestMode {
    /// Print each file with its comments translated
    Comments,
}

impl Args {
    /// CLI flags override the configured options
    fn translate_options(
        &self,
        configured: TranslateOptions,
    ) -> TranslateOptions {
        TranslateOptions {
            docstring: configured.docstring || self.docstring,
            preserve_whitespace: configured.preserve_whitespace || self.preserve_whitespace,
            coalesce: configured.coalesce && !self.no_coalesce,
        }
    }

    fn environment(
        &self,
        config: &Config,
    ) -> Result<BuildEnvironment> {
        let mut paths = self.include.clone();
        paths.extend(config.search.paths.iter().cloned());

        let mut env =
            BuildEnvironment::new(paths).with_options(self.translate_options(config.translate));
        for symbol in &self.define {
            env.define(symbol.as_str())
                .with_context(|| format!("Invalid -D {}", symbol))?;
        }
        Ok(env)
    }
}

fn main() -> Result<()> {
    let args = Args::parse();

    let cwd = std::env::current_dir().context("Failed to read the working directory")?;
    let config = config::load_config(&cwd).context("Failed to load configuration")?;

    if args.verbose {
        logger::init_debug();
        eprintln!("{} version: {}", NAME, VERSION);
    } else {
        let level: LogLevel = config
            .log
            .level
            .parse()
            .context("Invalid log level in configuration")?;
        logger::init_with_level(level);
    }

    if args.files.is_empty() && args.imports.is_empty() {
        bail!("Nothing to do: pass at least one FILE or --import NAME");
    }

    let env = args.environment(&config)?;

    for file in &args.files {
        run_file(&args, &env, file)?;
    }

    for name in &args.imports {
        let unit = env
            .import(name)
            .with_context(|| format!("Failed to import {}", name))?;
        print_module(unit.directives(), unit.source().unwrap_or_default(), args.verbose);
    }

    Ok(())
}

fn run_file(
    args: &Args,
    env: &BuildEnvironment,
    file: &Path,
) -> Result<()> {
    if args.spans {
        let document = SourceDocument::read(file)
            .with_context(|| format!("Failed to read {}", file.display()))?;
        let comments = collect(document.content(), env.options())
            .with_context(|| format!("Failed to scan {}", file.display()))?;
        println!("{}", serde_json::to_string_pretty(&comments)?);
        return Ok(());
    }

    if args.test == Some(TestMode::Comments) {
        print!("{}", translate_file(file, env.options())?);
        return Ok(());
    }

    let body = env
        .loader()
        .read_body(file)
        .with_context(|| format!("Failed to load {}", file.display()))?;
    print_module(&body.directives, &body.source, args.verbose);
    Ok(())
}

fn print_module(
    directives: &[Directive],
    source: &str,
    verbose: bool,
) {
    if verbose {
        for directive in directives {
            println!("# directive: {} {}", directive.name, directive.body);
        }
    }
    print!("{}", source);
}
