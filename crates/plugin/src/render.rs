//! Text rendering of call results.
//!
//! Tables follow elastic-tabstop layout: every column but the last is padded
//! with tab characters to a shared multiple of [`TAB_WIDTH`], so the output
//! lines up in a terminal while remaining tab-separated for scripts.

use tags::{DropletId, Tag};

const TAB_WIDTH: usize = 8;
const PADDING: usize = 1;

/// A `Name`/`Droplets` table with one row per tag, in the order given.
pub fn tag_table<'a>(tags: impl IntoIterator<Item = &'a Tag>) -> String {
    let mut table = TabTable::new(["Name", "Droplets"]);
    for tag in tags {
        table.push([tag.name.clone(), tag.droplet_count().to_string()]);
    }
    table.render()
}

pub fn created(tag: &Tag) -> String {
    format!("created {}", tag.name)
}

pub fn added(droplet: DropletId, tag: &str) -> String {
    format!("added droplet {droplet} to {tag}")
}

pub fn removed(droplet: DropletId, tag: &str) -> String {
    format!("removed droplet {droplet} from {tag}")
}

/// Fixed-width-column table rendered with tab padding.
///
/// Cells are written verbatim. Tag names are assumed to hold no tabs or
/// newlines; the provider limits them to letters, digits, `:`, `-` and `_`.
#[derive(Debug, Clone)]
struct TabTable<const N: usize> {
    rows: Vec<[String; N]>,
}

impl<const N: usize> TabTable<N> {
    fn new(header: [&str; N]) -> Self {
        Self {
            rows: vec![header.map(str::to_string)],
        }
    }

    fn push(&mut self, row: [String; N]) {
        self.rows.push(row);
    }

    fn render(&self) -> String {
        let widths: Vec<usize> = (0..N.saturating_sub(1))
            .map(|column| {
                let text = self
                    .rows
                    .iter()
                    .map(|row| row[column].chars().count())
                    .max()
                    .unwrap_or(0);
                (text + PADDING).div_ceil(TAB_WIDTH) * TAB_WIDTH
            })
            .collect();

        let mut out = String::new();
        for row in &self.rows {
            for (cell, width) in row.iter().zip(&widths) {
                let pad = width - cell.chars().count();
                out.push_str(cell);
                out.extend(std::iter::repeat('\t').take(pad.div_ceil(TAB_WIDTH)));
            }
            if let Some(last) = row.last() {
                out.push_str(last);
            }
            out.push('\n');
        }
        out
    }
}
