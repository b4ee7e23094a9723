//! Standalone Unity binding generator for mylib
//!
//! Reads EXTERN_C_API headers and writes a C# DllImport class.

use anyhow::{Context, Result};
use clap::Parser;
use mylib::bindgen::{Generator, DEFAULT_CLASS_NAME};
use mylib::logging;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "mylib-bindgen")]
#[command(about = "Generate a Unity DllImport class from C headers")]
struct Args {
    /// Name of the library
    lib_name: String,

    /// Path to a header file (repeatable)
    #[arg(short = 'f', long = "hfile", required = true)]
    hfiles: Vec<PathBuf>,

    /// Name of the generated C# class
    #[arg(long = "cpp-class", alias = "cpp_class", default_value = DEFAULT_CLASS_NAME)]
    cpp_class: String,

    /// Output folder
    #[arg(long = "output-folder", alias = "output_folder", default_value = ".")]
    output_folder: PathBuf,
}

fn main() -> Result<()> {
    let args = Args::parse();
    logging::init("warn");

    let mut generator = Generator::new();
    for hfile in &args.hfiles {
        generator
            .read_header(hfile)
            .with_context(|| format!("Failed to process {}", hfile.display()))?;
    }

    let path = generator.write(&args.cpp_class, &args.lib_name, &args.output_folder)?;
    eprintln!("Wrote {}", path.display());

    Ok(())
}
