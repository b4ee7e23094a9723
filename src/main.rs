//! mylib - command-line front end
//!
//! Evaluates the exported operations (in-process or through a built shared
//! library), prints the C header and generates Unity bindings.

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use mylib::bindgen::Generator;
use mylib::config::{MylibConfig, CONFIG_FILE_NAME};
use mylib::ffi::{LibraryLoader, EXPORTS};
use mylib::{header, logging, Operation};
use serde::Serialize;
use std::fs;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "mylib-cli")]
#[command(version)]
#[command(about = "C-callable integer arithmetic library tools", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate a Unity C# DllImport class from EXTERN_C_API headers
    Bindgen {
        /// Library name without prefix or extension (default from mylib.toml)
        lib_name: Option<String>,

        /// Header file to read (repeatable)
        #[arg(short = 'f', long = "header")]
        headers: Vec<PathBuf>,

        /// Generated class name
        #[arg(long = "class")]
        class_name: Option<String>,

        /// Directory to write <class>.cs into
        #[arg(short, long)]
        output_dir: Option<PathBuf>,
    },

    /// Evaluate one operation
    Calc {
        /// add, sub, mul, div (or + - * /)
        op: Operation,

        #[arg(allow_negative_numbers = true)]
        a: i32,

        #[arg(allow_negative_numbers = true)]
        b: i32,

        /// Call through a built shared library (path or library name)
        #[arg(long)]
        lib: Option<String>,

        /// Print the result as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show or create mylib.toml
    Config {
        /// Write a default mylib.toml in the current directory
        #[arg(long)]
        init: bool,

        /// Print the effective configuration
        #[arg(long)]
        show: bool,
    },

    /// List exported C symbols
    Exports,

    /// Print or write the C header
    Header {
        /// Output file (stdout if omitted)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = MylibConfig::load_from_cwd().context("Failed to load mylib.toml")?;
    logging::init(&config.logging.filter);

    match cli.command {
        Commands::Bindgen {
            lib_name,
            headers,
            class_name,
            output_dir,
        } => cmd_bindgen(&config, lib_name, headers, class_name, output_dir),
        Commands::Calc {
            op,
            a,
            b,
            lib,
            json,
        } => cmd_calc(op, a, b, lib.as_deref(), json),
        Commands::Config { init, show } => cmd_config(&config, init, show),
        Commands::Exports => cmd_exports(),
        Commands::Header { output } => cmd_header(output.as_ref()),
    }
}

#[derive(Serialize)]
struct CalcOutput {
    operation: Operation,
    a: i32,
    b: i32,
    result: i32,
}

fn cmd_calc(op: Operation, a: i32, b: i32, lib: Option<&str>, json: bool) -> Result<()> {
    let result = match lib {
        Some(name) => {
            let library = LibraryLoader::new()
                .load(name)
                .with_context(|| format!("Failed to load library '{}'", name))?;
            tracing::debug!(path = %library.path().display(), "calling through shared library");
            library.call(op, a, b)?
        }
        None => op.apply(a, b)?,
    };

    if json {
        let output = CalcOutput {
            operation: op,
            a,
            b,
            result,
        };
        println!("{}", serde_json::to_string(&output)?);
    } else {
        println!("{} {} {} = {}", a, op.symbol(), b, result);
    }

    Ok(())
}

fn cmd_bindgen(
    config: &MylibConfig,
    lib_name: Option<String>,
    headers: Vec<PathBuf>,
    class_name: Option<String>,
    output_dir: Option<PathBuf>,
) -> Result<()> {
    let lib_name = lib_name.unwrap_or_else(|| config.bindgen.lib_name.clone());
    let class_name = class_name.unwrap_or_else(|| config.bindgen.class_name.clone());
    let output_dir = output_dir.unwrap_or_else(|| config.bindgen_output_dir());
    let headers = if headers.is_empty() {
        config.bindgen_headers()
    } else {
        headers
    };

    if headers.is_empty() {
        bail!("No header files given (use -f or set bindgen.headers in mylib.toml)");
    }

    let mut generator = Generator::new();
    for header in &headers {
        let count = generator
            .read_header(header)
            .with_context(|| format!("Failed to process {}", header.display()))?;
        println!("Read {} declarations from {}", count, header.display());
    }

    let path = generator.write(&class_name, &lib_name, &output_dir)?;
    println!(
        "Wrote {} bindings to {}",
        generator.functions().len(),
        path.display()
    );
    Ok(())
}

fn cmd_config(config: &MylibConfig, init: bool, show: bool) -> Result<()> {
    if init {
        let path = PathBuf::from(CONFIG_FILE_NAME);
        if path.exists() {
            bail!("{} already exists", path.display());
        }
        MylibConfig::default()
            .save(&path)
            .context("Failed to write config")?;
        println!("Created {}", path.display());
    }

    if show || !init {
        print!(
            "{}",
            toml::to_string_pretty(config).context("Failed to render config")?
        );
    }
    Ok(())
}

fn cmd_exports() -> Result<()> {
    for decl in EXPORTS {
        println!("{:<40} {}", decl.signature().to_string(), decl.summary);
    }
    Ok(())
}

fn cmd_header(output: Option<&PathBuf>) -> Result<()> {
    let text = header::render_header();
    match output {
        Some(path) => {
            fs::write(path, &text).context("Failed to write header")?;
            println!("Wrote {}", path.display());
        }
        None => print!("{}", text),
    }
    Ok(())
}
