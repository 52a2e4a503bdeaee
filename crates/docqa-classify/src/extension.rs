//! File type detection: filename suffix first, content sniffing second.

/// Reported when neither the filename nor the content says anything useful.
pub const DEFAULT_EXTENSION: &str = "txt";

const MAX_EXTENSION_LEN: usize = 10;

/// Lowercased extension of `filename`, or a type inferred from `text`.
pub fn file_extension(filename: &str, text: &str) -> String {
    from_filename(filename).unwrap_or_else(|| infer_from_content(text).to_string())
}

fn from_filename(filename: &str) -> Option<String> {
    let name = filename.trim().rsplit(['/', '\\']).next()?;
    let (stem, ext) = name.rsplit_once('.')?;
    // ".env" and friends are dotfiles, not extensions
    if stem.is_empty() || ext.is_empty() || ext.len() > MAX_EXTENSION_LEN {
        return None;
    }
    if !ext.chars().all(|c| c.is_ascii_alphanumeric()) {
        return None;
    }
    Some(ext.to_ascii_lowercase())
}

type Sniffer = fn(&str, &str) -> bool;

/// Checked in order; the first match wins. Each sniffer sees the trimmed
/// text and its lowercase copy.
const SNIFFERS: &[(&str, Sniffer)] = &[
    ("json", |t, _| {
        (t.starts_with('{') && t.ends_with('}')) || (t.starts_with('[') && t.ends_with(']') && t.contains('{'))
    }),
    ("html", |_, l| l.starts_with("<!doctype html") || l.starts_with("<html")),
    ("py", |t, _| t.starts_with("#!") && t.lines().next().is_some_and(|l| l.contains("python"))),
    ("sh", |t, _| t.starts_with("#!")),
    ("rs", |t, _| t.contains("fn ") && (t.contains("let ") || t.contains("impl ") || t.contains("pub "))),
    ("py", |t, _| {
        t.lines().any(|l| {
            let l = l.trim_start();
            l.starts_with("def ") || (l.starts_with("from ") && l.contains(" import ")) || l.starts_with("import ")
        })
    }),
    ("java", |t, _| t.contains("public class ") || t.contains("public static void main")),
    ("js", |t, _| {
        t.contains("console.log") || t.contains("require(") || (t.contains("function ") && t.contains('{'))
            || (t.contains("const ") && t.contains("=>"))
    }),
    ("sql", |_, l| {
        ["select ", "insert into ", "create table ", "update ", "delete from "].iter().any(|kw| l.starts_with(kw))
    }),
    ("md", |t, _| t.lines().any(|l| l.starts_with("# ") || l.starts_with("## "))),
];

fn infer_from_content(text: &str) -> &'static str {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return DEFAULT_EXTENSION;
    }
    let lower = trimmed.to_lowercase();
    SNIFFERS
        .iter()
        .find(|(_, sniff)| sniff(trimmed, &lower))
        .map(|(ext, _)| *ext)
        .unwrap_or(DEFAULT_EXTENSION)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn suffix_wins_and_is_lowercased() {
        assert_eq!(file_extension("Report.PDF", "def main(): pass"), "pdf");
        assert_eq!(file_extension("UAV - Unit 3 - Copy.pptx", ""), "pptx");
        assert_eq!(file_extension("/srv/logs/docker_deployment_logs.log", ""), "log");
        assert_eq!(file_extension("C:\\docs\\notes.MD", ""), "md");
    }

    #[test]
    fn dotfiles_and_odd_suffixes_fall_through() {
        assert_eq!(file_extension(".env", ""), DEFAULT_EXTENSION);
        assert_eq!(file_extension("archive.tar~", ""), DEFAULT_EXTENSION);
        assert_eq!(file_extension("name.", ""), DEFAULT_EXTENSION);
    }

    #[test]
    fn content_sniffing() {
        assert_eq!(file_extension("", "{\"a\": 1}"), "json");
        assert_eq!(file_extension("", "<!DOCTYPE html><html></html>"), "html");
        assert_eq!(file_extension("", "#!/usr/bin/env python3\nprint(1)"), "py");
        assert_eq!(file_extension("", "#!/bin/bash\necho hi"), "sh");
        assert_eq!(file_extension("", "pub fn main() {\n    let x = 1;\n}"), "rs");
        assert_eq!(file_extension("", "import os\n\ndef run():\n    pass"), "py");
        assert_eq!(file_extension("", "public class App {}"), "java");
        assert_eq!(file_extension("", "const add = (a, b) => a + b;"), "js");
        assert_eq!(file_extension("", "SELECT * FROM users;"), "sql");
        assert_eq!(file_extension("", "# Title\n\nBody"), "md");
        assert_eq!(file_extension("", "just some words"), DEFAULT_EXTENSION);
        assert_eq!(file_extension("", "   "), DEFAULT_EXTENSION);
    }
}
