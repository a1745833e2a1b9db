//! `docProps/app.xml` — application-specific metadata.

/// Application properties part (docProps/app.xml)
#[derive(Debug, Clone)]
pub struct AppProperties {
    pub application: String,
    pub slides: u32,
}

impl AppProperties {
    pub fn new(slides: u32) -> Self {
        AppProperties {
            application: "html2pptx".to_string(),
            slides,
        }
    }

    pub fn to_xml(&self) -> String {
        format!(
            r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Properties xmlns="http://schemas.openxmlformats.org/officeDocument/2006/extended-properties" xmlns:vt="http://schemas.openxmlformats.org/officeDocument/2006/docPropsVTypes">
<Application>{}</Application>
<Slides>{}</Slides>
<PresentationFormat>Widescreen</PresentationFormat>
<Company></Company>
<LinksUpToDate>false</LinksUpToDate>
<SharedDoc>false</SharedDoc>
<HyperlinksChanged>false</HyperlinksChanged>
<AppVersion>16.0000</AppVersion>
</Properties>"#,
            crate::core::xml_utils::escape_xml(&self.application),
            self.slides
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_app_properties_xml() {
        let props = AppProperties::new(3);
        let xml = props.to_xml();
        assert!(xml.contains("<Slides>3</Slides>"));
        assert!(xml.contains("html2pptx"));
    }
}
