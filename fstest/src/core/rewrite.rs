//! Workspace path rewrite applied to archived config copies.
//!
//! The archived config records which workspace it was taken from by renaming
//! the workspace directory to a stamped variant in every entry under it.

/// Separators accepted between path components in config entries.
const SEPARATORS: [char; 2] = ['/', '\\'];

/// Workspace directory name with `stamp` appended, e.g. `Workspace20261017093005`.
pub fn stamped_workspace(workspace_entry: &str, stamp: &str) -> String {
    format!("{}{stamp}", trim_separators(workspace_entry))
}

/// Rewrite every entry that is, or lives under, the workspace directory.
///
/// Matching is by leading path component: with workspace `Workspace/`,
/// `Workspace/Tmp/` is rewritten while `WorkspaceOld/` and `Other/Workspace/`
/// are left alone.
pub fn rewrite_workspace_entries(
    entries: &[String],
    workspace_entry: &str,
    replacement: &str,
) -> Vec<String> {
    let base = trim_separators(workspace_entry);
    entries
        .iter()
        .map(|entry| rewrite_entry(entry, base, replacement))
        .collect()
}

fn rewrite_entry(entry: &str, base: &str, replacement: &str) -> String {
    if base.is_empty() {
        return entry.to_string();
    }
    match entry.strip_prefix(base) {
        Some(rest) if rest.is_empty() || rest.starts_with(SEPARATORS) => {
            format!("{replacement}{rest}")
        }
        _ => entry.to_string(),
    }
}

fn trim_separators(entry: &str) -> &str {
    entry.trim_end_matches(SEPARATORS)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::folders::FolderSet;

    #[test]
    fn stamped_workspace_drops_trailing_separator() {
        assert_eq!(
            stamped_workspace("Workspace/", "20260102030405"),
            "Workspace20260102030405"
        );
        assert_eq!(
            stamped_workspace("Workspace\\", "20260102030405"),
            "Workspace20260102030405"
        );
    }

    #[test]
    fn rewrites_all_default_entries() {
        let folders = FolderSet::default();
        let rewritten =
            rewrite_workspace_entries(folders.entries(), "Workspace/", "Workspace20260102030405");
        assert_eq!(
            rewritten,
            vec![
                "Workspace20260102030405/",
                "Workspace20260102030405/Archive/",
                "Workspace20260102030405/Tmp/",
                "Workspace20260102030405/Tmp/SaveData/",
            ]
        );
    }

    #[test]
    fn leaves_lookalike_entries_untouched() {
        let entries = vec![
            "WorkspaceOld/".to_string(),
            "Other/Workspace/".to_string(),
            "Workspace".to_string(),
            "Workspace\\Tmp\\".to_string(),
        ];
        let rewritten = rewrite_workspace_entries(&entries, "Workspace/", "Ws1");
        assert_eq!(
            rewritten,
            vec!["WorkspaceOld/", "Other/Workspace/", "Ws1", "Ws1\\Tmp\\"]
        );
    }

    #[test]
    fn empty_workspace_entry_rewrites_nothing() {
        let entries = vec!["Workspace/".to_string()];
        let rewritten = rewrite_workspace_entries(&entries, "/", "X");
        assert_eq!(rewritten, entries);
    }
}
