use crate::tree::TreeError;

pub struct PathSegments;

impl PathSegments {
    /// Split a diff path into its tree segments.
    ///
    /// Empty segments (leading, trailing or doubled slashes) and `.` markers
    /// are dropped. Parent directory segments are rejected since a diff path
    /// is always relative to the repository root.
    pub fn split(raw_path: &str) -> Result<Vec<&str>, TreeError> {
        if raw_path.trim().is_empty() {
            return Err(TreeError::InvalidPath("Empty path".to_string()));
        }

        let mut segments = Vec::new();
        for segment in raw_path.split('/') {
            match segment {
                "" | "." => continue,
                ".." => {
                    return Err(TreeError::InvalidPath(format!(
                        "Parent directory segment not allowed: {}",
                        raw_path
                    )));
                }
                _ => segments.push(segment),
            }
        }

        if segments.is_empty() {
            return Err(TreeError::InvalidPath(format!(
                "No valid segments: {}",
                raw_path
            )));
        }

        Ok(segments)
    }

    /// Normalized slash-joined form, used as the tree's lookup key
    pub fn normalize(raw_path: &str) -> Result<String, TreeError> {
        Ok(Self::split(raw_path)?.join("/"))
    }
}
