use super::view::{Entry, LeafStyle, SidebarView};

/// Plain text rendering for terminals
///
/// ```text
/// File List (3)
/// ├── a/
/// │   ├── b.txt
/// │   └── c.txt *
/// └── z.txt (deleted)
/// ```
pub fn render_text(view: &SidebarView) -> String {
    let heading = view.heading();
    let mut out = format!("{} ({})\n", heading.label, heading.count);

    let top: Vec<&Entry> = view.top_level().collect();
    render_level(view, &top, "", &mut out);
    out
}

fn render_level(view: &SidebarView, entries: &[&Entry], prefix: &str, out: &mut String) {
    for (i, entry) in entries.iter().enumerate() {
        let last = i + 1 == entries.len();
        let connector = if last { "└── " } else { "├── " };

        out.push_str(prefix);
        out.push_str(connector);
        out.push_str(&label(entry));
        out.push('\n');

        if entry.is_folder() && !entry.is_collapsed() {
            let children: Vec<&Entry> = view.children(entry.id).collect();
            let child_prefix = format!("{}{}", prefix, if last { "    " } else { "│   " });
            render_level(view, &children, &child_prefix, out);
        }
    }
}

fn label(entry: &Entry) -> String {
    if entry.is_folder() {
        let marker = if entry.is_collapsed() { " …" } else { "" };
        return format!("{}/{}", entry.name, marker);
    }

    match entry.style() {
        Some(LeafStyle::Deleted) => format!("{} (deleted)", entry.name),
        Some(LeafStyle::New) => format!("{} *", entry.name),
        _ => entry.name.clone(),
    }
}
