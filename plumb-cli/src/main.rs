//! `plumb`: plumbing commands over a git-compatible object store.

use std::path::PathBuf;

use anyhow::Result;
use clap::{ArgGroup, Parser, Subcommand};
use tracing_subscriber::EnvFilter;

mod cmd;

#[derive(Parser)]
#[command(name = "plumb")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Metadata directory to use instead of searching upward for `.git`
    #[arg(long, global = true, env = "PLUMB_DIR")]
    git_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create an empty store in the current directory
    Init,
    /// Print the blob address of a file
    HashObject {
        /// Also store the blob
        #[arg(short)]
        w: bool,
        path: PathBuf,
    },
    /// Show an object's contents, kind or size
    #[command(group(ArgGroup::new("format").required(true)))]
    CatFile {
        /// Pretty-print the payload
        #[arg(short, group = "format")]
        p: bool,
        /// Print the object kind
        #[arg(short, group = "format")]
        t: bool,
        /// Print the payload size in bytes
        #[arg(short, group = "format")]
        s: bool,
        /// Full or abbreviated address
        object: String,
    },
    /// List the entries of a tree
    LsTree {
        /// Print entry names only
        #[arg(long)]
        name_only: bool,
        tree: String,
    },
    /// Snapshot the work tree and print the root tree address
    WriteTree,
    /// Create a commit object for a tree
    CommitTree {
        tree: String,
        /// Parent commit, may be repeated
        #[arg(short)]
        p: Vec<String>,
        /// Commit message
        #[arg(short)]
        m: String,
        #[command(flatten)]
        identity: cmd::commit_tree::Identity,
    },
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let git_dir = cli.git_dir.as_deref();

    match cli.command {
        Commands::Init => cmd::init::run(),
        Commands::HashObject { w, path } => cmd::hash_object::run(git_dir, &path, w),
        Commands::CatFile { p, t, s: _, object } => {
            let format = if p {
                cmd::cat_file::Format::Pretty
            } else if t {
                cmd::cat_file::Format::Kind
            } else {
                cmd::cat_file::Format::Size
            };
            cmd::cat_file::run(git_dir, &object, format)
        }
        Commands::LsTree { name_only, tree } => cmd::ls_tree::run(git_dir, &tree, name_only),
        Commands::WriteTree => cmd::write_tree::run(git_dir),
        Commands::CommitTree {
            tree,
            p,
            m,
            identity,
        } => cmd::commit_tree::run(git_dir, &tree, &p, &m, &identity),
    }
}
