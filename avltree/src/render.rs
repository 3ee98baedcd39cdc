//! Text renderings of a tree for people and typesetters.
//!
//! The diagram format is an Asymptote `binarytree` picture wrapped for the
//! LaTeX `asy` environment. `searchtree(...)` rebuilds the shape by plain BST
//! insertion of its arguments, so keys are emitted in pre-order.

use std::fmt::{self, Display, Write};

use thiserror::Error;

use crate::node::Node;
use crate::traverse::{in_order, pre_order};

#[derive(Debug, Error)]
pub enum RenderError {
    #[error("cannot draw an empty tree")]
    EmptyTree,
    #[error("failed to write diagram: {0}")]
    Fmt(#[from] fmt::Error),
}

/// Write the diagram for the subtree at `root` to `out`.
pub fn write_asymptote<K, W>(root: Option<&Node<K>>, out: &mut W) -> Result<(), RenderError>
where
    K: Display,
    W: Write,
{
    let root = root.ok_or(RenderError::EmptyTree)?;

    out.write_str("\\begin{center}\n")?;
    out.write_str("\\begin{asy}\n")?;
    out.write_str("import binarytree;\n")?;
    out.write_str("picture pic;\n")?;
    out.write_str("binarytree st = searchtree(")?;
    for (i, key) in pre_order(Some(root)).enumerate() {
        if i > 0 {
            out.write_str(", ")?;
        }
        write!(out, "{key}")?;
    }
    out.write_str(");\n")?;
    out.write_str("draw(pic, st, condensed=true);\n")?;
    out.write_str("add(pic.fit(), (0, 0));\n")?;
    out.write_str("\\end{asy}\n")?;
    out.write_str("\\end{center}\n")?;
    Ok(())
}

/// The diagram for the subtree at `root`, as a `String`.
pub fn asymptote<K: Display>(root: Option<&Node<K>>) -> Result<String, RenderError> {
    let mut out = String::new();
    write_asymptote(root, &mut out)?;
    Ok(out)
}

/// Keys in ascending order, each followed by a space.
pub fn in_order_line<K: Display>(root: Option<&Node<K>>) -> String {
    let mut out = String::new();
    for key in in_order(root) {
        // Writing to a String cannot fail.
        let _ = write!(out, "{key} ");
    }
    out
}
