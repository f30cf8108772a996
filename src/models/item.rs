//! Grid item record read from the rendered listing.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

/// Kind of a grid entry.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord)]
pub enum ItemKind {
    /// Directories sort ahead of files.
    Dir,
    #[default]
    File,
}

impl ItemKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Dir => "dir",
            Self::File => "file",
        }
    }
}

impl fmt::Display for ItemKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ItemKind {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "dir" => Ok(Self::Dir),
            "file" => Ok(Self::File),
            _ => Err(()),
        }
    }
}

/// One file or directory entry of the grid.
///
/// Items are created by the page renderer; the script only reads them and
/// flips `selected`.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Item {
    /// Path relative to the served root, unique within the listing.
    pub path: String,
    pub kind: ItemKind,
    /// Size in bytes (meaningful for files).
    pub size: u64,
    /// Modification time as a Unix timestamp.
    pub modified_at: i64,
    pub name: String,
    pub selected: bool,
    /// Remaining `data-*` attributes, keyed without the `data-` prefix.
    pub extra: BTreeMap<String, String>,
}

impl Item {
    #[cfg(test)]
    pub fn file(path: &str, size: u64, modified_at: i64) -> Self {
        Self::new(path, ItemKind::File, size, modified_at)
    }

    #[cfg(test)]
    pub fn dir(path: &str, modified_at: i64) -> Self {
        Self::new(path, ItemKind::Dir, 0, modified_at)
    }

    #[cfg(test)]
    fn new(path: &str, kind: ItemKind, size: u64, modified_at: i64) -> Self {
        Self {
            path: path.to_string(),
            kind,
            size,
            modified_at,
            name: last_segment(path).to_string(),
            selected: false,
            extra: BTreeMap::new(),
        }
    }

    /// Build an item from its `data-*` attributes (names without the prefix).
    ///
    /// Returns `None` when `path` is missing. Unknown or unparsable `type`
    /// reads as a file, unparsable `size`/`date` as 0, and a missing `name`
    /// falls back to the last path segment.
    pub fn from_data_attributes<I, K, V>(attrs: I) -> Option<Self>
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let mut extra: BTreeMap<String, String> = attrs
            .into_iter()
            .map(|(k, v)| (k.into(), v.into()))
            .collect();

        let path = extra.remove("path")?;
        let kind = extra
            .remove("type")
            .and_then(|t| t.parse().ok())
            .unwrap_or_default();
        let size = extra
            .remove("size")
            .and_then(|s| parse_number(&s))
            .map(|n| n.max(0.0) as u64)
            .unwrap_or(0);
        let modified_at = extra
            .remove("date")
            .and_then(|s| parse_number(&s))
            .map(|n| n as i64)
            .unwrap_or(0);
        let name = extra
            .remove("name")
            .unwrap_or_else(|| last_segment(&path).to_string());

        Some(Self {
            path,
            kind,
            size,
            modified_at,
            name,
            selected: false,
            extra,
        })
    }

    #[cfg(test)]
    pub fn is_dir(&self) -> bool {
        self.kind == ItemKind::Dir
    }

    /// String value of a named attribute, as the markup exposes it.
    pub fn attribute(&self, key: &str) -> Option<&str> {
        match key {
            "path" => Some(&self.path),
            "name" => Some(&self.name),
            "type" => Some(self.kind.as_str()),
            _ => self.extra.get(key).map(String::as_str),
        }
    }
}

fn parse_number(s: &str) -> Option<f64> {
    s.trim().parse::<f64>().ok().filter(|n| n.is_finite())
}

fn last_segment(path: &str) -> &str {
    path.trim_end_matches('/')
        .rsplit('/')
        .next()
        .filter(|s| !s.is_empty())
        .unwrap_or(path)
}
