use serde::{Deserialize, Serialize};

use crate::version::Version;

/// Static metadata stamped into the generated config module.
///
/// Field order here is the serialization order of the generated file; keep
/// `version` last.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Metadata {
    pub author: String,
    pub description: String,
    pub company: String,
    pub copyright: String,
    pub version: Version,
}

impl Metadata {
    /// Render as 4-space-indented JSON, the stable human-diffable encoding
    /// embedded in the metadata stamp file.
    pub fn render(&self) -> String {
        let mut buf = Vec::new();
        let fmt = serde_json::ser::PrettyFormatter::with_indent(b"    ");
        let mut ser = serde_json::Serializer::with_formatter(&mut buf, fmt);
        self.serialize(&mut ser)
            .expect("metadata record serializes to JSON");
        String::from_utf8(buf).expect("serde_json emits UTF-8")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn render_is_stable_and_indented() {
        let meta = Metadata {
            author: "Your Name".to_string(),
            description: "App Description".to_string(),
            company: "Your Company".to_string(),
            copyright: "Copyright © 2025".to_string(),
            version: Version::new(1, 2, 3),
        };
        let expected = r#"{
    "author": "Your Name",
    "description": "App Description",
    "company": "Your Company",
    "copyright": "Copyright © 2025",
    "version": "1.2.3"
}"#;
        assert_eq!(meta.render(), expected);
    }
}
