use clap::{Parser, Subcommand};
use jitwatch_isa::{OpcodeCatalog, OpcodeFlags};
use jitwatch_loader::{Language, SourceResolver, read_manifest};
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "jitwatch", about = "Source and bytecode lookup for JIT log analysis")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the source file of a compiled type
    Source {
        /// Fully qualified type name, e.g. `com.example.Foo$Inner`
        name: String,
        /// Source directory or jar/zip archive, searched in the order given
        #[arg(short, long = "location", required = true)]
        locations: Vec<PathBuf>,
        /// Source file extension to try, in order (default: all known languages)
        #[arg(short, long = "ext")]
        extensions: Vec<String>,
    },
    /// Show the manifest of a jar
    Manifest {
        /// Path to the jar or zip archive
        input: PathBuf,
    },
    /// List the opcode table
    Opcodes {
        /// Only the method invocation family
        #[arg(long, conflicts_with = "switch")]
        invoke: bool,
        /// Only the switch family
        #[arg(long)]
        switch: bool,
    },
}

fn main() {
    env_logger::init();
    let cli = Cli::parse();

    match cli.command {
        Commands::Source {
            name,
            locations,
            extensions,
        } => cmd_source(&name, &locations, extensions),
        Commands::Manifest { input } => cmd_manifest(&input),
        Commands::Opcodes { invoke, switch } => cmd_opcodes(invoke, switch),
    }
}

fn cmd_source(name: &str, locations: &[PathBuf], extensions: Vec<String>) {
    let resolver = if extensions.is_empty() {
        SourceResolver::default()
    } else {
        for ext in &extensions {
            if Language::from_extension(ext).is_none() {
                log::warn!("Extension {ext} does not belong to a known language");
            }
        }
        SourceResolver::new(extensions)
    };

    match resolver.resolve(name, locations) {
        Some(source) => print!("{source}"),
        None => {
            eprintln!("Error: source not found for {name}");
            std::process::exit(1);
        }
    }
}

fn cmd_manifest(path: &Path) {
    let manifest = read_manifest(path);
    if manifest.is_empty() {
        eprintln!("No manifest in {}", path.display());
        return;
    }
    for (key, value) in manifest.iter() {
        println!("{key}: {value}");
    }
}

fn cmd_opcodes(invoke: bool, switch: bool) {
    let filter = if invoke {
        OpcodeFlags::INVOKE
    } else if switch {
        OpcodeFlags::SWITCH
    } else {
        OpcodeFlags::empty()
    };

    for info in OpcodeCatalog::jvm().iter() {
        if !info.flags().contains(filter) {
            continue;
        }
        let mut tags = Vec::new();
        if info.flags().contains(OpcodeFlags::INVOKE) {
            tags.push("invoke");
        }
        if info.flags().contains(OpcodeFlags::SWITCH) {
            tags.push("switch");
        }
        println!(
            "{:#04x}  {:<16}{}",
            info.opcode().raw(),
            info.mnemonic(),
            tags.join(",")
        );
    }
}
