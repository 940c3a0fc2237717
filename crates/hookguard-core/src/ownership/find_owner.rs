// SPDX-License-Identifier: Apache-2.0

//! Ownership query: print the owners of an item, or of its children at a
//! given depth.

use std::path::Path;

use hookguard_adapters::Fs;
use hookguard_model::{OwnerId, RuleSet};
use serde::Serialize;

use super::resolve::{owners_of, path_segments};
use super::{repo_relative, OwnershipError};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ItemOwners {
    pub path: String,
    pub owners: Vec<OwnerId>,
}

/// Owners of `item`, or of its descendants exactly `level` directory
/// levels below it. The item must exist.
pub fn owners_for_item(
    ruleset: &RuleSet,
    fs: &dyn Fs,
    repo_root: &Path,
    item: &Path,
    level: usize,
) -> Result<Vec<ItemOwners>, OwnershipError> {
    let rel = repo_relative(repo_root, item);
    if !rel.is_empty() && !fs.exists(repo_root, Path::new(&rel)) {
        return Err(OwnershipError::MissingItem {
            path: item.to_path_buf(),
        });
    }

    let targets: Vec<String> = if level == 0 {
        vec![rel.clone()]
    } else {
        let base_depth = path_segments(&rel).len();
        let prefix = if rel.is_empty() {
            String::new()
        } else {
            format!("{rel}/")
        };
        fs.walk(repo_root)?
            .into_iter()
            .filter(|path| path.starts_with(&prefix))
            .filter(|path| path_segments(path).len() == base_depth + level)
            .collect()
    };

    Ok(targets
        .into_iter()
        .map(|path| ItemOwners {
            owners: owners_of(ruleset, &path).to_vec(),
            path,
        })
        .collect())
}

/// Aligned `path -> owner, owner` table, one row per item.
pub fn render_owner_table(rows: &[ItemOwners]) -> String {
    let width = rows.iter().map(|row| row.path.len()).max().unwrap_or(0);
    rows.iter()
        .map(|row| {
            let owners = row
                .owners
                .iter()
                .map(OwnerId::as_str)
                .collect::<Vec<_>>()
                .join(", ");
            format!("{:<width$} -> {owners}", row.path)
        })
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ownership::parse_rules;
    use crate::testutil::FakeFs;

    #[test]
    fn resolves_a_single_item() {
        let fs = FakeFs::with_paths(&["docs", "docs/guide.md"]);
        let ruleset = parse_rules("/docs @myorg/docs\n").expect("rules");
        let rows = owners_for_item(
            &ruleset,
            &fs,
            Path::new("/repo"),
            Path::new("/repo/docs/guide.md"),
            0,
        )
        .expect("rows");
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].path, "docs/guide.md");
        assert_eq!(rows[0].owners.len(), 1);
    }

    #[test]
    fn level_descends_into_children() {
        let fs = FakeFs::with_paths(&["docs", "docs/a", "docs/b", "docs/a/deep.md"]);
        let ruleset = parse_rules("/docs @myorg/docs\n").expect("rules");
        let rows = owners_for_item(&ruleset, &fs, Path::new("/repo"), Path::new("docs"), 1)
            .expect("rows");
        let paths: Vec<&str> = rows.iter().map(|row| row.path.as_str()).collect();
        assert_eq!(paths, vec!["docs/a", "docs/b"]);
    }

    #[test]
    fn missing_item_is_an_error() {
        let fs = FakeFs::with_paths(&["docs"]);
        let ruleset = parse_rules("/docs @myorg/docs\n").expect("rules");
        let err = owners_for_item(&ruleset, &fs, Path::new("/repo"), Path::new("gone"), 0)
            .expect_err("must fail");
        assert!(matches!(err, OwnershipError::MissingItem { .. }));
    }

    #[test]
    fn table_is_aligned_on_the_longest_path() {
        let rows = vec![
            ItemOwners {
                path: "docs".to_string(),
                owners: vec![OwnerId::parse("@myorg/docs").expect("owner")],
            },
            ItemOwners {
                path: "docs/guide.md".to_string(),
                owners: vec![],
            },
        ];
        let table = render_owner_table(&rows);
        assert_eq!(table, "docs          -> @myorg/docs\ndocs/guide.md -> ");
    }
}
