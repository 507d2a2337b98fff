//! Front-matter parsing

use serde::{Deserialize, Serialize};

/// Where the front-matter block sits inside a markdown file
#[derive(Debug, PartialEq, Eq)]
pub enum Split<'a> {
    /// `yaml` is the text between the delimiters, `body` everything after
    Found { yaml: &'a str, body: &'a str },
    /// File does not start with `---`
    Missing,
    /// Opening `---` without a closing one
    Unterminated,
}

/// Front-matter data from a post
///
/// `date` stays a string: posts are ordered by comparing it verbatim.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FrontMatter {
    pub title: String,
    pub date: String,
    #[serde(default)]
    pub image: String,
    #[serde(default)]
    pub excerpt: String,
    #[serde(rename = "isFeatured", default)]
    pub is_featured: bool,
}

impl FrontMatter {
    /// Parse the YAML text of a front-matter block
    pub fn from_yaml(yaml: &str) -> Result<Self, serde_yaml::Error> {
        serde_yaml::from_str(yaml)
    }

    /// Locate the `---` delimited block at the top of `content`
    pub fn split(content: &str) -> Split<'_> {
        let content = content.trim_start_matches('\u{feff}').trim_start();

        let Some(rest) = content.strip_prefix("---") else {
            return Split::Missing;
        };
        // The opening delimiter must be alone on its line
        let Some(rest) = strip_line_end(rest) else {
            return Split::Missing;
        };

        let mut offset = 0;
        for line in rest.split_inclusive('\n') {
            if line.trim_end_matches(['\n', '\r']) == "---" {
                let yaml = &rest[..offset];
                let body = &rest[offset + line.len()..];
                return Split::Found { yaml, body };
            }
            offset += line.len();
        }

        Split::Unterminated
    }

    /// Serialize back into a front-matter block, used by `folio new`
    pub fn to_block(&self) -> Result<String, serde_yaml::Error> {
        let yaml = serde_yaml::to_string(self)?;
        Ok(format!("---\n{}---\n", yaml))
    }
}

fn strip_line_end(s: &str) -> Option<&str> {
    let trimmed = s.trim_start_matches([' ', '\t']);
    if let Some(rest) = trimmed.strip_prefix("\r\n") {
        Some(rest)
    } else if let Some(rest) = trimmed.strip_prefix('\n') {
        Some(rest)
    } else if trimmed.is_empty() {
        Some(trimmed)
    } else {
        None
    }
}
