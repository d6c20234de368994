use super::style::{
    FILE_CLASS, FILE_DELETED_CLASS, FILE_NEW_CLASS, FOLDER_CLASS, FOLDER_COLLAPSED_CLASS,
    HEADING_CLASS, ICON_CLASS, TREE_CLASS, TREE_VIEW_CLASS, expand_script, stylesheet,
};
use super::view::{Entry, EntryKind, LeafStyle, SidebarView};
use crate::adapter::DiffSection;
use crate::config::SidebarConfig;
use std::fmt::Write;

/// Escape text for use in element content and quoted attributes
pub fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '&' => out.push_str("&amp;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(ch),
        }
    }
    out
}

/// The sidebar element: heading followed by the scrollable tree
///
/// Folders are `<details>` elements so they stay collapsible without
/// scripting; the summary row is the toggle.
pub fn render_fragment(view: &SidebarView) -> String {
    let mut html = String::new();
    let heading = view.heading();

    let _ = write!(
        html,
        "<li class=\"{tree}\"><a class=\"{heading_class}\">\
         <div class=\"nav-icon-container\"><i class=\"fa fa-list-ul\"></i></div>\
         <span class=\"nav-item-name\">{label}</span>\
         <span class=\"badge count\">{count}</span></a>",
        tree = TREE_CLASS,
        heading_class = HEADING_CLASS,
        label = escape(&heading.label),
        count = heading.count,
    );

    let _ = write!(html, "<div class=\"{}\"><ul>", TREE_VIEW_CLASS);
    for entry in view.top_level() {
        render_entry(view, entry, &mut html);
    }
    html.push_str("</ul></div></li>");

    html
}

fn render_entry(view: &SidebarView, entry: &Entry, html: &mut String) {
    match &entry.kind {
        EntryKind::Folder { collapsed, .. } => {
            let open = if *collapsed { "" } else { " open" };
            let list_class = if *collapsed {
                format!(" class=\"{}\"", FOLDER_COLLAPSED_CLASS)
            } else {
                String::new()
            };

            let _ = write!(
                html,
                "<li><details{open}><summary class=\"{folder}\">\
                 <i class=\"fa fa-{icon} {icon_class}\"></i><span>{name}</span></summary>\
                 <ul{list_class}>",
                folder = FOLDER_CLASS,
                icon = entry.icon(),
                icon_class = ICON_CLASS,
                name = escape(&entry.name),
            );
            for child in view.children(entry.id) {
                render_entry(view, child, html);
            }
            html.push_str("</ul></details></li>");
        }
        EntryKind::File { href, style, .. } => {
            let mut classes = FILE_CLASS.to_string();
            match style {
                LeafStyle::Deleted => {
                    classes.push(' ');
                    classes.push_str(FILE_DELETED_CLASS);
                }
                LeafStyle::New => {
                    classes.push(' ');
                    classes.push_str(FILE_NEW_CLASS);
                }
                LeafStyle::Normal => {}
            }

            let _ = write!(
                html,
                "<li><i class=\"fa fa-{icon} {icon_class}\"></i>\
                 <a class=\"{classes}\" href=\"{href}\">{name}</a></li>",
                icon = entry.icon(),
                icon_class = ICON_CLASS,
                href = escape(href),
                name = escape(&entry.name),
            );
        }
    }
}

/// Standalone page: navigation sidebar with the file tree placed right
/// after the configured anchor item, followed by the diff sections
///
/// Collapsed sections are closed `<details>`; the page script opens one
/// before its sidebar link navigates to it.
pub fn render_page(
    view: &SidebarView,
    sections: &[DiffSection],
    config: &SidebarConfig,
    generated_at: &str,
) -> String {
    let mut html = String::new();

    let _ = write!(
        html,
        "<!DOCTYPE html>\n<html>\n<head>\n<meta charset=\"utf-8\">\n\
         <title>{title}</title>\n<style>\n{css}</style>\n</head>\n<body>\n",
        title = escape(&view.heading().label),
        css = stylesheet(config.tree_height_px),
    );

    let _ = write!(
        html,
        "<aside class=\"nav-sidebar\"><ul class=\"sidebar-top-level-items\">\
         <li><a class=\"{anchor}\" href=\"#diffs\">Merge Requests</a></li>{tree}</ul></aside>\n",
        anchor = escape(&config.sidebar_anchor),
        tree = render_fragment(view),
    );

    html.push_str("<main id=\"diffs\" class=\"active\"><div class=\"files\">\n");
    for section in sections {
        render_section(section, &mut html);
    }
    html.push_str("</div></main>\n");

    // After the sections so a hash in the URL can be resolved on load
    let _ = write!(html, "<script>\n{}</script>\n", expand_script());

    let _ = write!(
        html,
        "<footer>Generated {}</footer>\n</body>\n</html>\n",
        escape(generated_at)
    );

    html
}

fn render_section(section: &DiffSection, html: &mut String) {
    let open = if section.is_collapsed() { "" } else { " open" };
    let status = if section.is_deleted {
        " <small>deleted</small>"
    } else if section.is_new {
        " <small>new</small>"
    } else {
        ""
    };
    let renamed = section
        .renamed_from
        .as_deref()
        .map(|from| format!(" <small>from {}</small>", escape(from)))
        .unwrap_or_default();

    let _ = write!(
        html,
        "<details class=\"diff-file file-holder\" id=\"{anchor}\"{open}>\
         <summary class=\"file-header-content\"><span class=\"file-title-name\">{path}</span>{status}{renamed}</summary>",
        anchor = escape(&section.anchor),
        path = escape(&section.path),
    );

    if section.is_binary {
        html.push_str("<p>Binary file</p>");
    } else {
        html.push_str("<pre>");
        for line in &section.lines {
            html.push_str(&escape(line));
            html.push('\n');
        }
        html.push_str("</pre>");
    }
    html.push_str("</details>\n");
}
