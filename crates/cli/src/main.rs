use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use kdiff_lib::consts::APP_NAME;
use tracing_subscriber::EnvFilter;

mod cmd;
mod output;

/// kdiff - build the kustomizations affected by a change
#[derive(Parser)]
#[command(name = APP_NAME)]
#[command(author, version, about, long_about = None)]
struct Cli {
  /// Enable verbose output
  #[arg(short, long, global = true)]
  verbose: bool,

  #[command(subcommand)]
  command: Commands,
}

#[derive(Subcommand)]
enum Commands {
  /// Run `kustomize build` for every kustomization owning one of the given files
  BuildDirs {
    /// Directory to output build manifests
    #[arg(long)]
    out_dir: PathBuf,

    /// Empty strongbox-encrypted files before building, so no credentials are needed
    #[arg(long)]
    truncate_secrets: bool,

    /// Group changed files by shared ancestor directories at least this deep
    #[arg(long, value_name = "DEPTH")]
    dir_depth: Option<usize>,

    /// Name each output file by the base64 of its kustomization path
    #[arg(long)]
    encode_paths: bool,

    /// Changed files, relative to the repository root (the working directory)
    files: Vec<String>,
  },

  /// Print the kustomizations affected by `git diff --raw` output read from stdin
  BuildBase {
    /// Repository root the diff paths are relative to
    #[arg(long)]
    build_root: PathBuf,
  },
}

fn main() -> Result<()> {
  let cli = Cli::parse();

  let default_level = if cli.verbose { "debug" } else { "info" };
  let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
  tracing_subscriber::fmt()
    .with_env_filter(filter)
    .with_writer(std::io::stderr)
    .without_time()
    .init();

  match cli.command {
    Commands::BuildDirs {
      out_dir,
      truncate_secrets,
      dir_depth,
      encode_paths,
      files,
    } => cmd::cmd_build_dirs(&out_dir, &files, truncate_secrets, dir_depth, encode_paths),
    Commands::BuildBase { build_root } => cmd::cmd_build_base(&build_root),
  }
}
