//! DOT rendering of the tree, for eyeballing balance and subtree max.

use std::fmt::Display;
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;

use crate::index::{IndexType, NodeIndex};
use crate::node::{Color, Node};
use crate::tree::IntervalTree;

impl<T, V, Ix> IntervalTree<T, V, Ix>
where
    T: Display,
    V: Display,
    Ix: IndexType,
{
    /// Write the tree, values included, as a DOT file at `path`.
    ///
    /// # Errors
    ///
    /// Returns any I/O error from creating or writing the file.
    pub fn draw(&self, path: impl AsRef<Path>) -> io::Result<()> {
        let mut w = BufWriter::new(File::create(path)?);
        self.write_dot(&mut w, true)?;
        w.flush()
    }

    /// Like [`draw`](Self::draw) without the values.
    ///
    /// # Errors
    ///
    /// Returns any I/O error from creating or writing the file.
    pub fn draw_without_value(&self, path: impl AsRef<Path>) -> io::Result<()> {
        let mut w = BufWriter::new(File::create(path)?);
        self.write_dot(&mut w, false)?;
        w.flush()
    }

    /// Write the tree in DOT format to `w`.
    ///
    /// # Errors
    ///
    /// Returns any I/O error from `w`.
    pub fn write_dot<W: Write>(&self, mut w: W, with_value: bool) -> io::Result<()> {
        writeln!(w, "digraph {{")?;
        writeln!(w, "node [shape = record; style = filled; fontcolor = white;];")?;
        let mut stack: Vec<_> = self.root.into_iter().collect();
        while let Some(x) = stack.pop() {
            self.write_node(&mut w, x, with_value)?;
            let children = [
                ("l", self.node_ref(x, Node::left)),
                ("r", self.node_ref(x, Node::right)),
            ];
            for (side, child) in children {
                match child {
                    Some(c) => {
                        writeln!(w, "n{} -> n{};", x.index(), c.index())?;
                        stack.push(c);
                    }
                    None => {
                        let nil = format!("nil{}{side}", x.index());
                        writeln!(w, "{nil} [shape=point,style=invis];")?;
                        writeln!(w, "n{} -> {nil} [style=invis];", x.index())?;
                    }
                }
            }
        }
        writeln!(w, "}}")
    }

    fn write_node<W: Write>(
        &self,
        w: &mut W,
        x: NodeIndex<Ix>,
        with_value: bool,
    ) -> io::Result<()> {
        let node = &self.nodes[x.index()];
        let fill = match node.color() {
            Color::Red => "red",
            Color::Black => "black",
        };
        let interval = node.interval();
        write!(
            w,
            "n{} [fillcolor = {fill}; label=\"[{}, {}]",
            x.index(),
            interval.low(),
            interval.high()
        )?;
        if with_value {
            write!(w, " | {}", node.value)?;
        }
        writeln!(w, " | max={}\"];", self.max(x))
    }
}
