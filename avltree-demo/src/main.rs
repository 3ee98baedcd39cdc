//! Narrated AVL insertion demo.
//!
//! Builds a tree from random distinct keys, prints its in-order walk and
//! height, draws it, then inserts a few more keys while narrating every
//! rebalancing step. The output is LaTeX meant for the `asy` package.

mod keys;
mod narrate;

use std::io::{self, Write};

use anyhow::{Context, Result, bail, ensure};
use clap::{ArgAction, Parser};
use rand::SeedableRng;
use rand::rngs::StdRng;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;

use avltree::AvlTree;
use avltree::render::{in_order_line, write_asymptote};

use crate::keys::DistinctKeys;
use crate::narrate::LatexNarrator;

#[derive(Debug, Parser)]
#[clap(version, about)]
struct Args {
    /// Number of keys in the starting tree
    #[clap(long, default_value_t = 10)]
    initial: usize,
    /// Number of keys inserted afterwards with narration
    #[clap(long, default_value_t = 3)]
    extra: usize,
    /// Smallest key that may be drawn
    #[clap(long, default_value_t = 1)]
    min_key: i32,
    /// Largest key that may be drawn
    #[clap(long, default_value_t = 99)]
    max_key: i32,
    /// Seed for reproducible output; drawn from the OS when absent
    #[clap(long, env = "AVL_DEMO_SEED")]
    seed: Option<u64>,
    /// Enables verbose logging (repeat for more)
    #[clap(short, long, action = ArgAction::Count)]
    verbose: u8,
}

impl Args {
    fn validate(&self) -> Result<()> {
        ensure!(
            self.min_key <= self.max_key,
            "--min-key {} is larger than --max-key {}",
            self.min_key,
            self.max_key
        );
        let available = (self.max_key as i64 - self.min_key as i64 + 1) as usize;
        let Some(wanted) = self.initial.checked_add(self.extra) else {
            bail!(
                "--initial {} plus --extra {} is too many keys",
                self.initial,
                self.extra
            );
        };
        ensure!(
            wanted <= available,
            "cannot draw {wanted} distinct keys from {}..={} ({available} available)",
            self.min_key,
            self.max_key
        );
        Ok(())
    }
}

fn init_logging(verbosity: u8) {
    let default = match verbosity {
        0 => LevelFilter::WARN,
        1 => LevelFilter::DEBUG,
        2.. => LevelFilter::TRACE,
    };
    let filter = EnvFilter::builder()
        .with_default_directive(default.into())
        .from_env_lossy();
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn run<W: Write>(args: &Args, rng: &mut StdRng, out: &mut W) -> Result<()> {
    let mut keys = DistinctKeys::new(args.min_key..=args.max_key);
    let mut tree = AvlTree::new();

    for key in keys.draw(rng, args.initial) {
        tree.insert(key);
    }
    tracing::debug!(len = tree.len(), height = tree.height(), "built starting tree");

    writeln!(out, "left-root-right traversal: {}", in_order_line(tree.root()))?;
    writeln!(out)?;
    writeln!(out, "height of the avl-tree: {}", tree.height())?;
    writeln!(out)?;
    writeln!(out, "we start from this avl-tree:")?;
    writeln!(out)?;
    write_diagram(&tree, out)?;

    writeln!(out, "now we add {} more nodes:", args.extra)?;
    writeln!(out)?;
    for (i, key) in keys.draw(rng, args.extra).into_iter().enumerate() {
        writeln!(out, "{}. adding node {key}...", i + 1)?;
        writeln!(out)?;

        let mut narrator = LatexNarrator::new(&mut *out);
        tree.insert_with(key, &mut narrator);
        narrator.finish()?;

        writeln!(out, "we get:")?;
        writeln!(out)?;
        write_diagram(&tree, out)?;
    }

    tree.validate().context("tree invariants broken")?;
    Ok(())
}

fn write_diagram<W: Write>(tree: &AvlTree<i32>, out: &mut W) -> Result<()> {
    let mut diagram = String::new();
    write_asymptote(tree.root(), &mut diagram).context("rendering diagram")?;
    writeln!(out, "{diagram}")?;
    Ok(())
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(args.verbose);
    args.validate()?;

    let mut rng = match args.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_os_rng(),
    };
    tracing::info!(seed = ?args.seed, "starting demo");

    let stdout = io::stdout();
    let mut out = stdout.lock();
    run(&args, &mut rng, &mut out)?;
    out.flush()?;
    Ok(())
}
