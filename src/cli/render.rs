use filebrowse::models::FileEntry;
use std::fmt::Write;
use time::macros::format_description;

pub fn format_modified(entry: &FileEntry) -> String {
    entry
        .modified_at
        .format(format_description!("[year]-[month]-[day] [hour]:[minute]"))
        .unwrap_or_default()
}

/// Table of entries; `numbered` prefixes each row with its index for the browse prompt.
pub fn table(entries: &[FileEntry], numbered: bool) -> String {
    let mut out = String::new();
    if numbered {
        out.push_str("    #  ");
    }
    let _ = writeln!(out, "{:<6} {:>9}  {:<16}  Name", "Type", "Size", "Modified");
    for (ix, entry) in entries.iter().enumerate() {
        if numbered {
            let _ = write!(out, "{ix:>5}  ");
        }
        let _ = writeln!(
            out,
            "{:<6} {:>9}  {:<16}  {}",
            entry.kind().label(),
            entry.size_display.as_deref().unwrap_or(""),
            format_modified(entry),
            entry.name
        );
    }
    if entries.is_empty() {
        out.push_str("(empty)\n");
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::datetime;

    #[test]
    fn rows_show_kind_size_and_name() {
        let at = datetime!(2024-01-02 03:04 UTC);
        let entries = vec![
            FileEntry::directory("src".into(), "/p/src".into(), at),
            FileEntry::file("Cargo.toml".into(), "/p/Cargo.toml".into(), 3000, at),
        ];
        let text = table(&entries, true);
        let lines: Vec<_> = text.lines().collect();
        assert_eq!(lines.len(), 3);
        assert!(lines[1].contains("Folder"));
        assert!(lines[1].ends_with("src"));
        assert!(lines[2].contains("2 KB"));
        assert!(lines[2].contains("2024-01-02 03:04"));
        assert!(lines[2].trim_start().starts_with('1'));
    }

    #[test]
    fn empty_listing_says_so() {
        assert!(table(&[], false).ends_with("(empty)\n"));
    }
}
