// src/watch/fingerprint.rs

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::time::UNIX_EPOCH;

use anyhow::{Context, Result};

/// A file's last-modification time as nanoseconds since the Unix epoch.
///
/// Sub-second precision matters: with second granularity, an edit that lands
/// within the same second as the previous poll would go unnoticed.
pub type Fingerprint = u128;

/// One fingerprint per watched path.
pub type FingerprintMap = BTreeMap<PathBuf, Fingerprint>;

/// Stat every path and build the cycle's fingerprint map.
///
/// A failed stat (typically a file deleted between scan and stat) fails the
/// whole cycle; the loop reports it and the next cycle's rescan self-heals.
pub fn take_fingerprints<I, P>(paths: I) -> Result<FingerprintMap>
where
    I: IntoIterator<Item = P>,
    P: AsRef<Path>,
{
    let mut map = FingerprintMap::new();

    for path in paths {
        let path = path.as_ref();
        let metadata = std::fs::metadata(path).with_context(|| {
            format!(
                "can't stat {:?}; check project permissions or whether the file was just removed",
                path
            )
        })?;
        let modified = metadata
            .modified()
            .with_context(|| format!("reading modification time of {:?}", path))?;
        let nanos = modified
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_nanos())
            .unwrap_or(0);
        map.insert(path.to_path_buf(), nanos);
    }

    Ok(map)
}

/// Structural comparison of two fingerprint maps.
///
/// Equal iff the key sets are identical and every key maps to the same
/// fingerprint. Explicit size-then-per-key check; no diffing.
pub fn maps_differ(old: &FingerprintMap, new: &FingerprintMap) -> bool {
    if old.len() != new.len() {
        return true;
    }

    for (path, fingerprint) in old {
        match new.get(path) {
            Some(other) if other == fingerprint => {}
            _ => return true,
        }
    }

    false
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    fn map_of(entries: &[(&str, Fingerprint)]) -> FingerprintMap {
        entries
            .iter()
            .map(|(p, f)| (PathBuf::from(p), *f))
            .collect()
    }

    #[test]
    fn identical_maps_do_not_differ() {
        let a = map_of(&[("/p/a.php", 1), ("/p/b.php", 2)]);
        assert!(!maps_differ(&a, &a));
        assert!(!maps_differ(&a, &a.clone()));
    }

    #[test]
    fn comparison_is_symmetric() {
        let a = map_of(&[("/p/a.php", 1), ("/p/b.php", 2)]);
        let b = map_of(&[("/p/a.php", 1), ("/p/b.php", 3)]);
        assert_eq!(maps_differ(&a, &b), maps_differ(&b, &a));
        assert!(maps_differ(&a, &b));
    }

    #[test]
    fn added_removed_or_touched_key_differs() {
        let base = map_of(&[("/p/a.php", 1), ("/p/b.php", 2)]);

        let added = map_of(&[("/p/a.php", 1), ("/p/b.php", 2), ("/p/c.php", 3)]);
        assert!(maps_differ(&base, &added));

        let removed = map_of(&[("/p/a.php", 1)]);
        assert!(maps_differ(&base, &removed));

        let touched = map_of(&[("/p/a.php", 1), ("/p/b.php", 9)]);
        assert!(maps_differ(&base, &touched));

        // Same size, one key swapped for another.
        let renamed = map_of(&[("/p/a.php", 1), ("/p/c.php", 2)]);
        assert!(maps_differ(&base, &renamed));
    }

    #[test]
    fn fingerprints_are_taken_per_path() {
        let dir = tempdir().unwrap();
        let a = dir.path().join("a.txt");
        let b = dir.path().join("b.txt");
        fs::write(&a, "a").unwrap();
        fs::write(&b, "b").unwrap();

        let map = take_fingerprints([&a, &b]).unwrap();
        assert_eq!(map.len(), 2);
        assert!(map.values().all(|&nanos| nanos > 0));
    }

    #[test]
    fn stat_of_missing_path_is_an_error() {
        let dir = tempdir().unwrap();
        let ghost = dir.path().join("ghost.txt");
        assert!(take_fingerprints([&ghost]).is_err());
    }
}
