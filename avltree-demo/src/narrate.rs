//! LaTeX narration of rebalancing steps.

use std::fmt::Display;
use std::io::{self, Write};

use avltree::render::write_asymptote;
use avltree::{BalanceObserver, Node, Rotation};

/// Writes a line per rebalancing step, followed by a diagram after each
/// rotation.
///
/// Observer hooks cannot fail, so the first I/O error is kept and returned by
/// [`finish`](LatexNarrator::finish); everything after it is dropped.
pub struct LatexNarrator<W: Write> {
    out: W,
    error: Option<io::Error>,
}

impl<W: Write> LatexNarrator<W> {
    pub fn new(out: W) -> Self {
        Self { out, error: None }
    }

    pub fn finish(self) -> io::Result<()> {
        match self.error {
            Some(e) => Err(e),
            None => Ok(()),
        }
    }

    fn emit(&mut self, f: impl FnOnce(&mut W) -> io::Result<()>) {
        if self.error.is_some() {
            return;
        }
        if let Err(e) = f(&mut self.out) {
            self.error = Some(e);
        }
    }
}

fn diagram<K: Display>(subtree: &Node<K>) -> io::Result<String> {
    let mut text = String::new();
    write_asymptote(Some(subtree), &mut text).map_err(io::Error::other)?;
    Ok(text)
}

impl<K: Display, W: Write> BalanceObserver<K> for LatexNarrator<W> {
    fn balancing(&mut self, node: &Node<K>) {
        tracing::debug!(key = %node.key(), "balancing");
        self.emit(|out| {
            writeln!(out, "\\textcolor{{blue}}{{balancing node {}...}}", node.key())?;
            writeln!(out)
        });
    }

    fn rotated(&mut self, rotation: Rotation, subtree: &Node<K>) {
        tracing::debug!(%rotation, root = %subtree.key(), "rotated");
        self.emit(|out| {
            writeln!(out, "\\textcolor{{blue}}{{rotate {rotation}:}}")?;
            writeln!(out)?;
            writeln!(out, "{}", diagram(subtree)?)
        });
    }
}
