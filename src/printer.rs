//! Debug rendering of a list, one row per active level, top level first.
//!
//! Every column is a level-0 node, right-aligned to the widest key (at
//! least three characters). A node shows its key on each level its tower
//! reaches and `->` on the levels it skips:
//!
//! ```text
//! Level  1:  ->   6  ->  12
//! Level  0:   3   6   7  12
//! ```

use std::fmt::{self, Display, Write};

use crate::skiplist::SkipList;

const MIN_WIDTH: usize = 3;

pub fn render<K: Display, C, G>(list: &SkipList<K, C, G>) -> String {
    let mut out = String::new();
    // Writing into a String cannot fail.
    let _ = write_levels(&mut out, list);
    out
}

fn write_levels<W: Write, K: Display, C, G>(w: &mut W, list: &SkipList<K, C, G>) -> fmt::Result {
    let towers: Vec<(String, usize)> = list.towers().map(|(key, height)| (key.to_string(), height)).collect();
    let width = towers
        .iter()
        .map(|(key, _)| key.chars().count())
        .max()
        .unwrap_or(0)
        .max(MIN_WIDTH);
    for level in (0..list.current_level()).rev() {
        write!(w, "Level {:2}: ", level)?;
        for (key, height) in towers.iter() {
            let cell = if *height > level { key.as_str() } else { "->" };
            write!(w, "{:>width$} ", cell, width = width)?;
        }
        w.write_char('\n')?;
    }
    Ok(())
}

impl<K: Display, C, G> Display for SkipList<K, C, G> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_levels(f, self)
    }
}
