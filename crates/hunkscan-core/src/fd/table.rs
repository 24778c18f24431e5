use std::collections::HashMap;

use crate::fd::parse::{FdLine, parse_fd_line};

/// Library vector offset to function name lookup.
///
/// Built once before scanning and only read afterwards. When two
/// descriptor lines share an offset the later one wins.
#[derive(Debug, Clone, Default)]
pub struct SymbolTable {
    entries: HashMap<i32, String>,
}

impl SymbolTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, offset: i32, name: impl Into<String>) {
        self.entries.insert(offset, name.into());
    }

    /// Feeds every line of one descriptor file through the line parser.
    ///
    /// Returns the number of lines accepted; malformed lines are dropped.
    pub fn extend_from_lines<'a>(&mut self, lines: impl IntoIterator<Item = &'a str>) -> usize {
        let mut accepted = 0;
        for FdLine { name, offset } in lines.into_iter().filter_map(parse_fd_line) {
            self.insert(offset, name);
            accepted += 1;
        }
        accepted
    }

    pub fn lookup(&self, offset: i32) -> Option<&str> {
        self.entries.get(&offset).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
