use super::{AdapterError, DiffPageAdapter, anchor_for};
use crate::record::{FileRecord, SectionRef};
use log::{debug, info};

/// Sections with more diff lines than this start collapsed
pub const DEFAULT_COLLAPSE_THRESHOLD: usize = 500;

const DIFF_HEADER: &str = "diff --git ";
const DEV_NULL: &str = "/dev/null";

/// One file's block in a unified diff
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiffSection {
    /// Path shown for the section: new side, or old side for deletions
    pub path: String,
    /// Source path when the file was renamed
    pub renamed_from: Option<String>,
    pub is_new: bool,
    pub is_deleted: bool,
    pub is_binary: bool,
    /// Element id of the section
    pub anchor: String,
    /// Hunk lines, starting at the first `@@`
    pub lines: Vec<String>,
    collapsed: bool,
}

impl DiffSection {
    /// Whether the section shows an expand control instead of its lines
    pub fn is_collapsed(&self) -> bool {
        self.collapsed
    }

    pub fn line_count(&self) -> usize {
        self.lines.len()
    }
}

/// Treats `git diff` output as the diff page
///
/// Every `diff --git` block is a diff section. Sections longer than the
/// collapse threshold start collapsed, the way large diffs are folded on a
/// merge request page.
#[derive(Debug, Clone)]
pub struct UnifiedDiffAdapter {
    sections: Vec<DiffSection>,
}

/// Section under construction while scanning the diff
struct PendingSection {
    start_line: usize,
    old_path: Option<String>,
    new_path: Option<String>,
    renamed_from: Option<String>,
    is_new: bool,
    is_deleted: bool,
    is_binary: bool,
    in_hunks: bool,
    lines: Vec<String>,
}

impl PendingSection {
    /// Start a section; paths the header can't yield come from `---`/`+++` later
    fn from_header(line_no: usize, line: &str) -> Self {
        let (old_path, new_path) = match split_header_paths(line) {
            Some((old, new)) => (Some(old), Some(new)),
            None => {
                debug!("diff: no paths in header at line {}, using ---/+++ lines", line_no);
                (None, None)
            }
        };

        Self {
            start_line: line_no,
            old_path,
            new_path,
            renamed_from: None,
            is_new: false,
            is_deleted: false,
            is_binary: false,
            in_hunks: false,
            lines: Vec::new(),
        }
    }

    fn push_line(&mut self, line: &str) {
        // Everything after the first hunk header is diff body
        if self.in_hunks {
            self.lines.push(line.to_string());
            return;
        }

        // Extended header lines
        if line.starts_with("@@") {
            self.in_hunks = true;
            self.lines.push(line.to_string());
        } else if line.starts_with("new file mode") {
            self.is_new = true;
        } else if line.starts_with("deleted file mode") {
            self.is_deleted = true;
        } else if let Some(from) = line.strip_prefix("rename from ") {
            let from = unquote(from);
            self.renamed_from = Some(from.clone());
            self.old_path = Some(from);
        } else if let Some(to) = line.strip_prefix("rename to ") {
            self.new_path = Some(unquote(to));
        } else if let Some(old) = line.strip_prefix("--- ") {
            self.old_path = side_path(old, "a/");
        } else if let Some(new) = line.strip_prefix("+++ ") {
            self.new_path = side_path(new, "b/");
        } else if line.starts_with("Binary files ") {
            self.is_binary = true;
        }
    }

    fn finish(self, collapse_threshold: usize) -> Result<DiffSection, AdapterError> {
        // Deleted files are listed under the path they had
        let path = if self.is_deleted {
            self.old_path.or(self.new_path)
        } else {
            self.new_path.or(self.old_path)
        }
        .ok_or(AdapterError::MissingPath {
            line: self.start_line,
        })?;

        let collapsed = self.lines.len() > collapse_threshold;
        Ok(DiffSection {
            anchor: anchor_for(&path),
            path,
            renamed_from: self.renamed_from,
            is_new: self.is_new,
            is_deleted: self.is_deleted,
            is_binary: self.is_binary,
            lines: self.lines,
            collapsed,
        })
    }
}

/// Paths of a `diff --git` header
///
/// Handles `a/<old> b/<new>`, the quoted form git uses for unusual
/// characters, and `--no-prefix` headers whose two sides are equal.
fn split_header_paths(line: &str) -> Option<(String, String)> {
    let rest = line.strip_prefix(DIFF_HEADER)?;

    // Quoted: "a/<old>" "b/<new>"
    if rest.starts_with('"') {
        let (old, new) = split_quoted_pair(rest)?;
        return non_empty_pair(strip_side(old, "a/"), strip_side(new, "b/"));
    }

    // Prefixed: a/<old> b/<new>
    if let Some((old, new)) = rest.strip_prefix("a/").and_then(|r| r.rsplit_once(" b/")) {
        return non_empty_pair(old.to_string(), new.to_string());
    }

    // No prefix: only unambiguous when both halves match
    let mid = rest.len() / 2;
    if rest.len() % 2 == 1 && rest.as_bytes()[mid] == b' ' && rest[..mid] == rest[mid + 1..] {
        return non_empty_pair(rest[..mid].to_string(), rest[mid + 1..].to_string());
    }

    None
}

fn non_empty_pair(old: String, new: String) -> Option<(String, String)> {
    if old.is_empty() || new.is_empty() {
        return None;
    }
    Some((old, new))
}

/// Decoded contents of two space-separated quoted strings
fn split_quoted_pair(text: &str) -> Option<(String, String)> {
    let (first, rest) = take_quoted(text)?;
    let (second, rest) = take_quoted(rest.strip_prefix(' ')?)?;
    if !rest.is_empty() {
        return None;
    }
    Some((first, second))
}

/// Leading C-style quoted string and the text after its closing quote
fn take_quoted(text: &str) -> Option<(String, &str)> {
    let body = text.strip_prefix('"')?;
    let mut bytes = Vec::new();
    let mut chars = body.char_indices();

    while let Some((i, c)) = chars.next() {
        match c {
            '"' => {
                let decoded = String::from_utf8_lossy(&bytes).into_owned();
                return Some((decoded, &body[i + 1..]));
            }
            '\\' => {
                let (_, escaped) = chars.next()?;
                match escaped {
                    'n' => bytes.push(b'\n'),
                    't' => bytes.push(b'\t'),
                    '0'..='7' => {
                        // Three octal digits, one byte of UTF-8
                        let mut value = escaped.to_digit(8)?;
                        for _ in 0..2 {
                            let (_, digit) = chars.next()?;
                            value = value * 8 + digit.to_digit(8)?;
                        }
                        bytes.push(u8::try_from(value).ok()?);
                    }
                    other => {
                        let mut buf = [0u8; 4];
                        bytes.extend_from_slice(other.encode_utf8(&mut buf).as_bytes());
                    }
                }
            }
            other => {
                let mut buf = [0u8; 4];
                bytes.extend_from_slice(other.encode_utf8(&mut buf).as_bytes());
            }
        }
    }

    None
}

/// Path text with git's quoting removed, when it is quoted
fn unquote(value: &str) -> String {
    match take_quoted(value) {
        Some((decoded, "")) => decoded,
        _ => value.to_string(),
    }
}

fn strip_side(path: String, prefix: &str) -> String {
    match path.strip_prefix(prefix) {
        Some(stripped) => stripped.to_string(),
        None => path,
    }
}

/// Path from a `---`/`+++` line; `None` for /dev/null
fn side_path(value: &str, prefix: &str) -> Option<String> {
    // git appends a tab when the path contains spaces
    let value = unquote(value.trim_end_matches('\t'));
    if value == DEV_NULL {
        return None;
    }
    Some(strip_side(value, prefix))
}

impl UnifiedDiffAdapter {
    /// Parse diff text with the default collapse threshold
    pub fn parse(text: &str) -> Result<Self, AdapterError> {
        Self::parse_with_threshold(text, DEFAULT_COLLAPSE_THRESHOLD)
    }

    pub fn parse_with_threshold(text: &str, collapse_threshold: usize) -> Result<Self, AdapterError> {
        let mut sections = Vec::new();
        let mut pending: Option<PendingSection> = None;
        let mut preamble = 0usize;

        for (i, line) in text.lines().enumerate() {
            let line_no = i + 1;

            // A header closes the previous section and opens the next
            if line.starts_with(DIFF_HEADER) {
                if let Some(section) = pending.take() {
                    sections.push(section.finish(collapse_threshold)?);
                }
                pending = Some(PendingSection::from_header(line_no, line));
                continue;
            }

            // Lines before the first header (commit message, stat) are skipped
            match pending.as_mut() {
                Some(section) => section.push_line(line),
                None => preamble += 1,
            }
        }

        // Close the last section
        if let Some(section) = pending.take() {
            sections.push(section.finish(collapse_threshold)?);
        }

        if preamble > 0 {
            debug!("diff: skipped {} lines before the first section", preamble);
        }
        info!(
            "diff: parsed {} sections ({} collapsed)",
            sections.len(),
            sections.iter().filter(|s| s.is_collapsed()).count()
        );

        Ok(Self { sections })
    }

    /// Whether the text already holds at least one diff section
    pub fn is_ready(text: &str) -> bool {
        text.lines().any(|line| line.starts_with(DIFF_HEADER))
    }

    pub fn sections(&self) -> &[DiffSection] {
        &self.sections
    }

    pub fn section(&self, section: SectionRef) -> Option<&DiffSection> {
        self.sections.get(section.index())
    }
}

impl DiffPageAdapter for UnifiedDiffAdapter {
    fn list_diff_entries(&self) -> Result<Vec<FileRecord>, AdapterError> {
        Ok(self
            .sections
            .iter()
            .enumerate()
            .map(|(i, section)| {
                FileRecord::new(
                    section.path.clone(),
                    format!("#{}", section.anchor),
                    SectionRef::new(i),
                )
                .with_deleted(section.is_deleted)
                .with_new(section.is_new && !section.is_deleted)
            })
            .collect())
    }

    fn expand_if_collapsed(&mut self, section: SectionRef) {
        if let Some(diff) = self.sections.get_mut(section.index()) {
            if diff.collapsed {
                debug!("diff: expanding collapsed section {}", diff.path);
                diff.collapsed = false;
            }
        }
    }
}
