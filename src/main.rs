//! shader-embed command line
//!
//! Exit status: 0 on success, 126 when the shader compiler rejects a source,
//! 66 for missing sources, 74 for filesystem failures, 78 for bad config.

use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::{Parser, Subcommand};

use embed_config::{Config, PROJECT_CONFIG_FILE_NAME};
use embed_core::ExternalCompiler;
use shader_embed::{
    BuildMessages, collect_sources, detect_modules, detect_platforms, embed_options, exit_status,
    run_embed,
};

/// Compile shaders and embed the bytecode in generated C++ headers
#[derive(Parser, Debug)]
#[command(name = "shader-embed")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Configuration file (default: ./shader-embed.toml, then ~/.shader-embed/config.toml)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Log each compiler invocation
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Compile shader sources and write one header per shader
    Embed {
        /// Shader files, or directories searched for shader files
        #[arg(required = true)]
        paths: Vec<PathBuf>,

        /// Compiler executable, overrides the configuration
        #[arg(long)]
        compiler: Option<PathBuf>,

        /// Directory for generated headers, overrides the configuration
        #[arg(short, long)]
        output_dir: Option<PathBuf>,
    },

    /// List target platforms under <root>/platforms
    Platforms {
        #[arg(long, default_value = ".")]
        root: PathBuf,
    },

    /// List modules under <root>/modules that provide a config.py
    Modules {
        #[arg(long, default_value = ".")]
        root: PathBuf,
    },

    /// Write a default shader-embed.toml
    Init {
        #[arg(default_value = PROJECT_CONFIG_FILE_NAME)]
        path: PathBuf,
    },
}

fn init_logging(verbose: bool) {
    let default_filter = if verbose {
        "warn,shader_embed=debug,embed_core=debug,embed_config=debug"
    } else {
        "warn,shader_embed=info,embed_core=info,embed_config=info"
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter)).init();
}

fn load_config(path: Option<&Path>) -> anyhow::Result<Config> {
    let config = match path {
        Some(path) => Config::load_from(path)
            .with_context(|| format!("loading configuration {}", path.display()))?,
        None => Config::load().context("loading configuration")?,
    };
    Ok(config)
}

fn run(args: Args) -> anyhow::Result<()> {
    match args.command {
        Commands::Embed {
            paths,
            compiler,
            output_dir,
        } => {
            let mut config = load_config(args.config.as_deref())?;
            if let Some(compiler) = compiler {
                config.compiler.path = compiler;
            }
            if let Some(output_dir) = output_dir {
                config.output.directory = output_dir;
            }

            let sources = collect_sources(&paths, &config)?;
            if sources.is_empty() {
                log::warn!("No shader sources found");
                return Ok(());
            }

            let compiler = ExternalCompiler::new(&config.compiler.path)
                .with_args(config.compiler.args.iter().cloned());
            let messages = BuildMessages::detect();

            let fragments = run_embed(&sources, &compiler, &embed_options(&config), &messages)?;
            println!("{}", messages.summary(fragments.len()));
        }
        Commands::Platforms { root } => {
            for platform in detect_platforms(&root) {
                println!("{platform}");
            }
        }
        Commands::Modules { root } => {
            for module in detect_modules(&root) {
                println!("{module}");
            }
        }
        Commands::Init { path } => {
            if path.exists() {
                anyhow::bail!("{} already exists", path.display());
            }
            Config::write_default(&path)?;
        }
    }

    Ok(())
}

fn main() {
    let args = Args::parse();
    init_logging(args.verbose);

    if let Err(e) = run(args) {
        eprintln!("Error: {:#}", e);
        std::process::exit(exit_status(&e));
    }
}
