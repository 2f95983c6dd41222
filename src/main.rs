//! Nwkarray CLI
//!
//! Reads restricted Newick files into array trees and writes them back.

use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand, ValueEnum};
use nwkarray::{ArrayTree, Layout};
use std::path::{Path, PathBuf};
use tracing::{error, info};

#[derive(Parser)]
#[command(name = "nwkarray")]
#[command(about = "Read Newick trees into preorder/postorder arrays and write them back")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Verbose output (can be used multiple times for increased verbosity)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,
}

#[derive(Subcommand)]
enum Commands {
    /// Read a tree and write it back
    Convert {
        /// File holding one Newick string
        input: PathBuf,

        /// File to write the Newick string to
        output: PathBuf,

        /// Arena layout used in between
        #[arg(short, long, value_enum, default_value_t = LayoutArg::Preorder)]
        layout: LayoutArg,
    },

    /// Print size, leaf count and shape of a tree
    Inspect {
        /// File holding one Newick string
        input: PathBuf,

        /// Arena layout to read the tree into
        #[arg(short, long, value_enum, default_value_t = LayoutArg::Preorder)]
        layout: LayoutArg,
    },

    /// Read the first tree in preorder and the second in postorder,
    /// then write both back
    Pair {
        /// File holding the first tree
        first: PathBuf,

        /// File holding the second tree
        second: PathBuf,

        /// Directory to write both trees to (same file names)
        #[arg(short, long, env = "NWKARRAY_OUT_DIR")]
        out_dir: PathBuf,
    },
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum LayoutArg {
    Preorder,
    Postorder,
}

impl From<LayoutArg> for Layout {
    fn from(arg: LayoutArg) -> Self {
        match arg {
            LayoutArg::Preorder => Layout::Preorder,
            LayoutArg::Postorder => Layout::Postorder,
        }
    }
}

fn init_tracing(verbose: u8) {
    use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

    let default_level = match verbose {
        0 => "nwkarray=warn",
        1 => "nwkarray=info",
        2 => "nwkarray=debug",
        _ => "nwkarray=trace",
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr),
        )
        .init();
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    if let Err(err) = run(cli.command) {
        error!("{err:#}");
        std::process::exit(1);
    }
}

fn run(command: Commands) -> Result<()> {
    match command {
        Commands::Convert {
            input,
            output,
            layout,
        } => {
            let tree = read(&input, layout.into())?;
            write(&tree, &output)?;
        }
        Commands::Inspect { input, layout } => {
            let tree = read(&input, layout.into())?;
            print_summary(&input, &tree);
        }
        Commands::Pair {
            first,
            second,
            out_dir,
        } => {
            let first_tree = read(&first, Layout::Preorder)?;
            let second_tree = read(&second, Layout::Postorder)?;
            info!(
                first_leaves = first_tree.num_leaves(),
                second_leaves = second_tree.num_leaves(),
                "read tree pair"
            );

            let first_out = out_path(&out_dir, &first)?;
            let second_out = out_path(&out_dir, &second)?;
            if first_out == second_out {
                bail!("Both trees would be written to {}", first_out.display());
            }
            write(&first_tree, &first_out)?;
            write(&second_tree, &second_out)?;
        }
    }

    Ok(())
}

fn read(path: &Path, layout: Layout) -> Result<ArrayTree> {
    nwkarray::read(path, layout).with_context(|| format!("Failed to read tree from {}", path.display()))
}

fn write(tree: &ArrayTree, path: &Path) -> Result<()> {
    nwkarray::write(tree, path).with_context(|| format!("Failed to write tree to {}", path.display()))
}

fn out_path(out_dir: &Path, input: &Path) -> Result<PathBuf> {
    let name = input
        .file_name()
        .with_context(|| format!("{} has no file name", input.display()))?;
    Ok(out_dir.join(name))
}

fn print_summary(path: &Path, tree: &ArrayTree) {
    let root = tree.root();
    println!("{}", path.display());
    println!("  layout:         {}", tree.layout());
    println!("  nodes:          {}", tree.num_nodes());
    println!("  leaves:         {}", tree.num_leaves());
    println!("  internal nodes: {}", tree.num_internal());
    println!("  depth:          {}", tree.depth());
    println!("  root:           index {} (id {}, degree {})", tree.root_index(), root.id(), root.degree());
}
