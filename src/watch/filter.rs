// src/watch/filter.rs

use std::path::{Path, PathBuf};

use crate::config::model::WatchConfig;

/// Compiled traversal filter for one scan cycle.
///
/// Decides, for each directory the scanner reaches, whether to descend into
/// it. Files are never filtered here: a file that survives the directory
/// pruning above it is always watched, since the configured roots already
/// scope what is relevant.
#[derive(Debug, Clone)]
pub struct PathFilter {
    exclude_fragments: Vec<String>,
    vendor_watch: bool,
    /// Absolute allow-listed vendor roots (`<project>/<vendor dir>/<entry>`).
    vendor_allowed: Vec<PathBuf>,
    vendor_dir: String,
}

impl PathFilter {
    pub fn from_config(config: &WatchConfig) -> Self {
        Self {
            exclude_fragments: config.exclude_dirs.clone(),
            vendor_watch: config.vendor_watch,
            vendor_allowed: config
                .vendor_list
                .iter()
                .map(|sub| config.project_dir.join(&config.vendor_dir).join(sub))
                .collect(),
            vendor_dir: config.vendor_dir.clone(),
        }
    }

    /// Whether the scanner should descend into `dir`.
    ///
    /// Rules, in order:
    /// 1. Any exclusion fragment contained in the path string (substring
    ///    match, deliberately not segment match) prunes the subtree.
    /// 2. With vendor watching off, any path containing the vendor directory
    ///    name prunes the subtree.
    /// 3. With vendor watching on, a directory inside the vendor tree is kept
    ///    only while it lies on the path of an allow-listed vendor sub-path.
    pub fn allows_dir(&self, dir: &Path) -> bool {
        let path_str = dir.to_string_lossy();

        for fragment in &self.exclude_fragments {
            if path_str.contains(fragment.as_str()) {
                return false;
            }
        }

        if path_str.contains(self.vendor_dir.as_str()) {
            if !self.vendor_watch {
                return false;
            }
            return self
                .vendor_allowed
                .iter()
                .any(|allowed| dir.starts_with(allowed) || allowed.starts_with(dir));
        }

        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn filter_for(project: &str, configure: impl FnOnce(&mut WatchConfig)) -> PathFilter {
        let mut config = WatchConfig::new(PathBuf::from(project));
        configure(&mut config);
        PathFilter::from_config(&config)
    }

    #[test]
    fn excludes_fragment_as_substring() {
        let filter = filter_for("/p", |c| c.exclude_dirs.push("cache".to_string()));

        assert!(!filter.allows_dir(Path::new("/p/src/cache")));
        // Substring semantics: an unrelated dir containing the fragment is
        // excluded too.
        assert!(!filter.allows_dir(Path::new("/p/src/mycache")));
        assert!(filter.allows_dir(Path::new("/p/src/controller")));
    }

    #[test]
    fn default_exclusions_apply() {
        let filter = filter_for("/p", |_| {});
        assert!(!filter.allows_dir(Path::new("/p/.git/objects")));
        assert!(!filter.allows_dir(Path::new("/p/assets/node_modules/left-pad")));
    }

    #[test]
    fn vendor_disabled_prunes_vendor_tree() {
        let filter = filter_for("/p", |_| {});
        assert!(!filter.allows_dir(Path::new("/p/vendor")));
        assert!(!filter.allows_dir(Path::new("/p/vendor/acme/widget")));
    }

    #[test]
    fn vendor_enabled_is_allow_listed() {
        let filter = filter_for("/p", |c| {
            c.vendor_watch = true;
            c.vendor_list = vec!["acme/widget".to_string()];
        });

        assert!(filter.allows_dir(Path::new("/p/vendor/acme/widget")));
        assert!(filter.allows_dir(Path::new("/p/vendor/acme/widget/src")));
        // Ancestors of an allow-listed sub-path stay traversable.
        assert!(filter.allows_dir(Path::new("/p/vendor/acme")));
        assert!(filter.allows_dir(Path::new("/p/vendor")));
        // Everything else in the vendor tree is pruned.
        assert!(!filter.allows_dir(Path::new("/p/vendor/other/pkg")));
        assert!(!filter.allows_dir(Path::new("/p/vendor/acme/other")));
    }

    #[test]
    fn exclusion_wins_inside_allowed_vendor_path() {
        let filter = filter_for("/p", |c| {
            c.vendor_watch = true;
            c.vendor_list = vec!["acme/widget".to_string()];
        });

        assert!(!filter.allows_dir(Path::new("/p/vendor/acme/widget/.git")));
    }
}
