//! reStructuredText rendering of [`ReleaseNotes`].
//!
//! The layout is consumed by the napari docs build, so spacing and
//! underline lengths are fixed.

use std::collections::BTreeSet;

use crate::notes::{ContributorRegistry, ReleaseNotes};

pub const PROJECT: &str = "napari";
pub const PROFILE_URL: &str = "https://github.com/";

const DESCRIPTION: &str = "\
napari is a fast, interactive, multi-dimensional image viewer for Python.
It's designed for browsing, annotating, and analyzing large multi-dimensional
images. It's built on top of Qt (for the GUI), vispy (for performant GPU-based
rendering), and the scientific Python stack (numpy, scipy).";

const MORE_INFO: &str = "\
For more information, examples, and documentation, please visit our website:
https://github.com/napari/napari";

pub fn render(notes: &ReleaseNotes) -> String {
    let mut out = String::new();

    let title = format!("Announcement: {} {}", PROJECT, notes.version);
    underline(&mut out, &title, '=');

    out.push('\n');
    out.push_str(&format!(
        "We're happy to announce the release of {} {}!\n",
        PROJECT, notes.version
    ));
    out.push_str(DESCRIPTION);
    out.push_str("\n\n");

    out.push('\n');
    out.push_str(MORE_INFO);
    out.push_str("\n\n");

    for section in notes.sections.iter() {
        underline(&mut out, &format!("{}s", section.label), '*');
        if section.is_empty() {
            out.push('\n');
        }
        for entry in &section.entries {
            out.push_str(&format!("- {} (#{})\n", entry.summary, entry.number));
        }
    }

    roster(&mut out, "authors", &notes.authors, &notes.contributors);
    roster(&mut out, "reviewers", &notes.reviewers, &notes.contributors);

    out
}

/// Handles ordered case-insensitively, ties broken by the raw handle.
pub fn sort_handles(handles: &BTreeSet<String>) -> Vec<&str> {
    let mut sorted: Vec<&str> = handles.iter().map(String::as_str).collect();
    sorted.sort_by(|a, b| {
        a.to_lowercase()
            .cmp(&b.to_lowercase())
            .then_with(|| a.cmp(b))
    });
    sorted
}

fn roster(
    out: &mut String,
    section: &str,
    handles: &BTreeSet<String>,
    contributors: &ContributorRegistry,
) {
    out.push('\n');
    let heading = format!(
        "{} {} added to this release [alphabetical by username]",
        handles.len(),
        section
    );
    underline(out, &heading, '-');

    for handle in sort_handles(handles) {
        let name = contributors.display_name(handle).unwrap_or(handle);
        out.push_str(&format!("- `{} <{}{}>`_\n", name, PROFILE_URL, handle));
    }
    out.push('\n');
}

fn underline(out: &mut String, text: &str, mark: char) {
    out.push_str(text);
    out.push('\n');
    out.extend(std::iter::repeat(mark).take(text.chars().count()));
    out.push('\n');
}
