//! `.rels` part generation shared by every package relationship list
//! (`_rels/.rels`, `ppt/_rels/presentation.xml.rels`, slide rels, ...).

use super::base::PartType;
use crate::core::xml_utils::escape_xml;

#[derive(Debug, Clone)]
pub struct Relationship {
    pub id: String,
    pub rel_type: PartType,
    pub target: String,
}

impl Relationship {
    pub fn new(id: impl Into<String>, rel_type: PartType, target: impl Into<String>) -> Self {
        Relationship { id: id.into(), rel_type, target: target.into() }
    }

    fn to_xml(&self) -> String {
        format!(
            r#"<Relationship Id="{}" Type="{}" Target="{}"/>"#,
            escape_xml(&self.id),
            self.rel_type.relationship_type(),
            escape_xml(&self.target)
        )
    }
}

#[derive(Debug, Clone, Default)]
pub struct Relationships(pub Vec<Relationship>);

impl Relationships {
    pub fn new() -> Self {
        Relationships(Vec::new())
    }

    pub fn push(&mut self, rel: Relationship) {
        self.0.push(rel);
    }

    pub fn to_xml(&self) -> String {
        let mut xml = String::from(
            "<?xml version=\"1.0\" encoding=\"UTF-8\" standalone=\"yes\"?>\n\
             <Relationships xmlns=\"http://schemas.openxmlformats.org/package/2006/relationships\">\n",
        );
        for rel in &self.0 {
            xml.push_str(&rel.to_xml());
            xml.push('\n');
        }
        xml.push_str("</Relationships>");
        xml
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_relationships_roundtrip() {
        let mut rels = Relationships::new();
        rels.push(Relationship::new("rId1", PartType::Slide, "slides/slide1.xml"));
        let xml = rels.to_xml();
        assert!(xml.contains(r#"Id="rId1""#));
        assert!(xml.contains("slides/slide1.xml"));
        assert!(xml.contains("/relationships/slide\""));
    }

    #[test]
    fn test_empty_relationships() {
        let rels = Relationships::new();
        let xml = rels.to_xml();
        assert!(xml.contains("<Relationships"));
        assert!(xml.contains("</Relationships>"));
    }
}
