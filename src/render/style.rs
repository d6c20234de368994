pub const TREE_CLASS: &str = "gl-file-tree";
pub const HEADING_CLASS: &str = "gl-file-tree__heading";
pub const TREE_VIEW_CLASS: &str = "gl-file-tree__tree-view";
pub const FOLDER_CLASS: &str = "gl-file-tree__folder";
pub const FOLDER_COLLAPSED_CLASS: &str = "gl-file-tree__folder--collapsed";
pub const ICON_CLASS: &str = "gl-file-tree__icon";
pub const FILE_CLASS: &str = "gl-file-tree__file";
pub const FILE_DELETED_CLASS: &str = "gl-file-tree__file--deleted";
pub const FILE_NEW_CLASS: &str = "gl-file-tree__file--new";

/// Sidebar stylesheet; `tree_height_px` bounds the scrollable tree view
pub fn stylesheet(tree_height_px: u32) -> String {
    format!(
        r#".gl-file-tree {{
  border-top: 2px solid #e5e5e5;
  border-bottom: 2px solid #e5e5e5;
}}

.gl-file-tree__heading {{
  border-bottom: 2px solid #e5e5e5;
}}

.gl-file-tree__tree-view {{
  height: {height}px;
  overflow: auto;
}}

.gl-file-tree__tree-view ul {{
  margin: 0 0 0 8px;
  padding: 0;
}}

.gl-file-tree__folder--collapsed {{
  display: none;
}}

.gl-file-tree__tree-view li {{
  margin: 0;
  padding: 0;
  list-style: none;
}}

.gl-file-tree__folder {{
  cursor: pointer;
  list-style: none;
}}

.gl-file-tree__folder::-webkit-details-marker {{
  display: none;
}}

details:not([open]) > .gl-file-tree__folder .fa-folder-open::before {{
  content: "\f07b";
}}

.gl-file-tree__icon {{
  margin-right: 4px;
}}

.gl-file-tree__file--deleted {{
  text-decoration: line-through !important;
  color: darkred !important;
}}

.gl-file-tree__file--new {{
  color: green !important;
}}

.gl-file-tree__file--new::after {{
  color: green;
  content: '*';
}}

.gl-file-tree__file {{
  display: inline !important;
  padding: 0 !important;
}}

.gl-file-tree__tree-view::-webkit-scrollbar-track {{
  border-radius: 10px;
  background-color: #ffffff;
}}

.gl-file-tree__tree-view::-webkit-scrollbar {{
  width: 5px;
  height: 5px;
  background-color: #ffffff;
}}

.gl-file-tree__tree-view::-webkit-scrollbar-thumb {{
  border-radius: 10px;
  background-color: #e5e5e5;
}}

.gl-file-tree__tree-view::-webkit-scrollbar-corner {{
  background: transparent;
}}
"#,
        height = tree_height_px
    )
}

/// Page script: opens a collapsed diff section before a sidebar link
/// jumps to it, and on load when the URL already names a section
pub fn expand_script() -> String {
    format!(
        r#"function openSection(hash) {{
  var target = hash ? document.getElementById(decodeURIComponent(hash.slice(1))) : null;
  if (target && target.tagName === "DETAILS" && !target.open) {{
    target.open = true;
  }}
}}

document.addEventListener("click", function (event) {{
  var link = event.target.closest("a.{file}");
  if (link) {{
    openSection(link.hash);
  }}
}});

openSection(window.location.hash);
"#,
        file = FILE_CLASS
    )
}
