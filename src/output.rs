//! Console output for both commands.
//!
//! Each command has a `format_*` function returning `Vec<String>` for
//! testability, and a `print_*` wrapper that writes the lines to stdout.
//! Format functions are pure: no I/O, no side effects.
//!
//! # Output Format
//!
//! ## list
//!
//! ```text
//! Repository: acme/shots
//! Branch: main
//! Base URL: https://raw.githubusercontent.com/acme/shots/main/
//!
//! Found 2 image files:
//!
//! https://raw.githubusercontent.com/acme/shots/main/a.jpg
//! https://raw.githubusercontent.com/acme/shots/main/b/c.jpeg
//!
//! Total image URLs generated: 2
//! ```
//!
//! ## export
//!
//! ```text
//! Repository: acme/shots
//! Branch: main
//! Base URL: https://raw.githubusercontent.com/acme/shots/main/
//! Total images found: 7
//!
//! Sample URLs:
//! 1. https://raw.githubusercontent.com/acme/shots/main/a.jpg
//! ...
//! 5. https://raw.githubusercontent.com/acme/shots/main/e.jpg
//! ... and 2 more URLs
//!
//! Generated files:
//! - image_urls_only.txt: 7 URLs
//! - image_data.json: Complete data with metadata
//! - image_data.csv: Spreadsheet-compatible format
//! ```

use crate::export::WrittenFiles;
use crate::inventory::Inventory;
use crate::types::OutputBundle;
use std::path::Path;

fn print_lines(lines: Vec<String>) {
    for line in lines {
        println!("{}", line);
    }
}

/// Full URL listing, printed by `list`.
pub fn format_list_output(inventory: &Inventory) -> Vec<String> {
    let count = inventory.images.len();
    let mut lines = vec![
        format!("Repository: {}", inventory.identity.slug()),
        format!("Branch: {}", inventory.identity.branch),
        format!("Base URL: {}", inventory.base),
        String::new(),
        format!("Found {} image files:", count),
        String::new(),
    ];
    lines.extend(inventory.urls().map(str::to_string));
    lines.push(String::new());
    lines.push(format!("Total image URLs generated: {}", count));
    lines
}

pub fn print_list_output(inventory: &Inventory) {
    print_lines(format_list_output(inventory));
}

/// Header and sample URLs, printed by `export` before anything is written.
pub fn format_export_summary(bundle: &OutputBundle, samples: usize) -> Vec<String> {
    let mut lines = vec![
        format!("Repository: {}", bundle.repository),
        format!("Branch: {}", bundle.branch),
        format!("Base URL: {}", bundle.base_url),
        format!("Total images found: {}", bundle.total_images),
        String::new(),
        "Sample URLs:".to_string(),
    ];
    for (i, image) in bundle.images.iter().take(samples).enumerate() {
        lines.push(format!("{}. {}", i + 1, image.url));
    }
    if bundle.images.len() > samples {
        lines.push(format!(
            "... and {} more URLs",
            bundle.images.len() - samples
        ));
    }
    lines.push(String::new());
    lines
}

pub fn print_export_summary(bundle: &OutputBundle, samples: usize) {
    print_lines(format_export_summary(bundle, samples));
}

/// What `export` wrote, one line per file, labelled by file name.
pub fn format_written_files(bundle: &OutputBundle, written: &WrittenFiles) -> Vec<String> {
    vec![
        "Generated files:".to_string(),
        format!("- {}: {} URLs", file_label(&written.urls), bundle.images.len()),
        format!("- {}: Complete data with metadata", file_label(&written.json)),
        format!("- {}: Spreadsheet-compatible format", file_label(&written.csv)),
    ]
}

pub fn print_written_files(bundle: &OutputBundle, written: &WrittenFiles) {
    print_lines(format_written_files(bundle, written));
}

fn file_label(path: &Path) -> String {
    path.file_name()
        .unwrap_or(path.as_os_str())
        .to_string_lossy()
        .into_owned()
}

/// The single line shown when a run is abandoned without producing anything.
pub fn format_error(err: &dyn std::error::Error) -> String {
    format!("Error: {}", err)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::inventory;
    use crate::repo::RepoError;
    use crate::test_helpers::{FakeRepo, write_tree};
    use crate::types::ImageRecord;
    use std::path::PathBuf;
    use tempfile::TempDir;

    fn bundle_with(n: usize) -> OutputBundle {
        let images: Vec<ImageRecord> = (0..n)
            .map(|i| ImageRecord {
                filename: format!("{i:02}.jpg"),
                url: format!("https://raw.githubusercontent.com/acme/shots/main/{i:02}.jpg"),
                size_bytes: 1,
                size_mb: 0.0,
            })
            .collect();
        OutputBundle {
            repository: "acme/shots".into(),
            branch: "main".into(),
            base_url: "https://raw.githubusercontent.com/acme/shots/main/".into(),
            total_images: images.len(),
            images,
        }
    }

    #[test]
    fn list_output_layout() {
        let tmp = TempDir::new().unwrap();
        write_tree(tmp.path(), &["a.jpg", "b/c.jpeg"]);
        let fake = FakeRepo::new("https://github.com/acme/shots.git", "main").at(tmp.path());
        let inv = inventory::build(&fake, tmp.path(), &Config::default()).unwrap();

        let lines = format_list_output(&inv);

        assert_eq!(
            lines,
            vec![
                "Repository: acme/shots",
                "Branch: main",
                "Base URL: https://raw.githubusercontent.com/acme/shots/main/",
                "",
                "Found 2 image files:",
                "",
                "https://raw.githubusercontent.com/acme/shots/main/a.jpg",
                "https://raw.githubusercontent.com/acme/shots/main/b/c.jpeg",
                "",
                "Total image URLs generated: 2",
            ]
        );
    }

    #[test]
    fn list_output_with_no_images() {
        let tmp = TempDir::new().unwrap();
        let fake = FakeRepo::new("https://github.com/acme/shots", "dev").at(tmp.path());
        let inv = inventory::build(&fake, tmp.path(), &Config::default()).unwrap();

        let lines = format_list_output(&inv);
        assert!(lines.contains(&"Found 0 image files:".to_string()));
        assert_eq!(lines.last().unwrap(), "Total image URLs generated: 0");
    }

    #[test]
    fn export_summary_shows_all_when_few() {
        let lines = format_export_summary(&bundle_with(3), 5);
        assert!(lines.contains(&"Total images found: 3".to_string()));
        assert!(lines.contains(&"3. https://raw.githubusercontent.com/acme/shots/main/02.jpg".to_string()));
        assert!(!lines.iter().any(|l| l.contains("more URLs")));
    }

    #[test]
    fn export_summary_exactly_sample_size_has_no_remainder() {
        let lines = format_export_summary(&bundle_with(5), 5);
        assert!(!lines.iter().any(|l| l.contains("more URLs")));
    }

    #[test]
    fn export_summary_truncates_to_samples() {
        let lines = format_export_summary(&bundle_with(8), 5);
        let numbered = lines.iter().filter(|l| l.starts_with(char::is_numeric)).count();
        assert_eq!(numbered, 5);
        assert!(lines.contains(&"... and 3 more URLs".to_string()));
    }

    #[test]
    fn written_files_named_by_what_was_written() {
        let written = WrittenFiles {
            urls: PathBuf::from("out/u.txt"),
            json: PathBuf::from("out/image_data.json"),
            csv: PathBuf::from("image_data.csv"),
        };
        let lines = format_written_files(&bundle_with(4), &written);
        assert_eq!(
            lines,
            vec![
                "Generated files:",
                "- u.txt: 4 URLs",
                "- image_data.json: Complete data with metadata",
                "- image_data.csv: Spreadsheet-compatible format",
            ]
        );
    }

    #[test]
    fn error_line() {
        let err = RepoError::Configuration("unsupported remote URL format: x".into());
        assert_eq!(
            format_error(&err),
            "Error: Unsupported repository configuration: unsupported remote URL format: x"
        );
    }
}
