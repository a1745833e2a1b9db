//! `docProps/core.xml` — Dublin Core metadata (title, author, timestamps).

use chrono::{DateTime, Utc};
use crate::core::xml_utils::escape_xml;

#[derive(Debug, Clone)]
pub struct CoreProperties {
    pub title: String,
    pub creator: String,
    pub created: DateTime<Utc>,
    pub modified: DateTime<Utc>,
}

impl CoreProperties {
    pub fn new(title: impl Into<String>) -> Self {
        let now = Utc::now();
        CoreProperties {
            title: title.into(),
            creator: "html2pptx".to_string(),
            created: now,
            modified: now,
        }
    }

    pub fn to_xml(&self) -> String {
        let stamp = |t: &DateTime<Utc>| t.format("%Y-%m-%dT%H:%M:%SZ").to_string();
        format!(
            r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<cp:coreProperties xmlns:cp="http://schemas.openxmlformats.org/package/2006/metadata/core-properties" xmlns:dc="http://purl.org/dc/elements/1.1/" xmlns:dcterms="http://purl.org/dc/terms/" xmlns:dcmitype="http://purl.org/dc/dcmitype/" xmlns:xsi="http://www.w3.org/2001/XMLSchema-instance">
<dc:title>{}</dc:title>
<dc:creator>{}</dc:creator>
<cp:lastModifiedBy>{}</cp:lastModifiedBy>
<dcterms:created xsi:type="dcterms:W3CDTF">{}</dcterms:created>
<dcterms:modified xsi:type="dcterms:W3CDTF">{}</dcterms:modified>
</cp:coreProperties>"#,
            escape_xml(&self.title),
            escape_xml(&self.creator),
            escape_xml(&self.creator),
            stamp(&self.created),
            stamp(&self.modified),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_core_properties_xml() {
        let props = CoreProperties::new("My Deck");
        let xml = props.to_xml();
        assert!(xml.contains("<dc:title>My Deck</dc:title>"));
        assert!(xml.contains("dcterms:created"));
    }
}
