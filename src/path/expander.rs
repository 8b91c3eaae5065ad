use std::path::PathBuf;

#[derive(Clone, Copy, Debug, Default)]
pub struct PathExpander;

impl PathExpander {
    pub fn new() -> Self {
        Self
    }

    /// Expand a leading `~` against `home`. Returns `None` when the path
    /// needs a home directory and none is known.
    pub fn expand(&self, path: &str, home: Option<&str>) -> Option<PathBuf> {
        match path.strip_prefix('~') {
            Some(rest) => home.map(|home| PathBuf::from(format!("{}{}", home, rest))),
            None => Some(PathBuf::from(path)),
        }
    }
}
