//! `[Content_Types].xml` generation.

/// One embedded image part, as (file stem under `ppt/media/`, extension).
pub struct ImagePartRef {
    pub name: String,
    pub extension: String,
}

/// Build `[Content_Types].xml` for a deck with `slide_count` slides and the
/// given embedded raster images (one `Default` per distinct extension, per
/// the OPC spec — PowerPoint rejects a content-types part with duplicate
/// `Extension` attributes).
pub fn create_content_types_xml(slide_count: usize, images: &[ImagePartRef]) -> String {
    let mut xml = String::from(
        r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Types xmlns="http://schemas.openxmlformats.org/package/2006/content-types">
<Default Extension="rels" ContentType="application/vnd.openxmlformats-package.relationships+xml"/>
<Default Extension="xml" ContentType="application/xml"/>"#,
    );

    let mut seen_extensions: Vec<&str> = Vec::new();
    for image in images {
        let ext = image.extension.as_str();
        if !seen_extensions.contains(&ext) {
            seen_extensions.push(ext);
            let content_type = super::base::ContentType::Image(ext.to_string()).mime_type();
            xml.push_str(&format!(
                "\n<Default Extension=\"{ext}\" ContentType=\"{content_type}\"/>"
            ));
        }
    }

    xml.push_str(
        "\n<Override PartName=\"/ppt/presentation.xml\" ContentType=\"application/vnd.openxmlformats-officedocument.presentationml.presentation.main+xml\"/>",
    );

    for i in 1..=slide_count {
        xml.push_str(&format!(
            "\n<Override PartName=\"/ppt/slides/slide{i}.xml\" ContentType=\"application/vnd.openxmlformats-officedocument.presentationml.slide+xml\"/>"
        ));
    }

    xml.push_str(
        r#"
<Override PartName="/ppt/slideLayouts/slideLayout1.xml" ContentType="application/vnd.openxmlformats-officedocument.presentationml.slideLayout+xml"/>
<Override PartName="/ppt/slideMasters/slideMaster1.xml" ContentType="application/vnd.openxmlformats-officedocument.presentationml.slideMaster+xml"/>
<Override PartName="/ppt/theme/theme1.xml" ContentType="application/vnd.openxmlformats-officedocument.theme+xml"/>
<Override PartName="/docProps/core.xml" ContentType="application/vnd.openxmlformats-package.core-properties+xml"/>
<Override PartName="/docProps/app.xml" ContentType="application/vnd.openxmlformats-officedocument.extended-properties+xml"/>
</Types>"#,
    );
    xml
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_content_types_no_images() {
        let xml = create_content_types_xml(2, &[]);
        assert!(xml.contains("slide1.xml"));
        assert!(xml.contains("slide2.xml"));
        assert!(!xml.contains("slide3.xml"));
    }

    #[test]
    fn test_content_types_dedupes_extensions() {
        let images = vec![
            ImagePartRef { name: "image1".into(), extension: "png".into() },
            ImagePartRef { name: "image2".into(), extension: "png".into() },
        ];
        let xml = create_content_types_xml(1, &images);
        assert_eq!(xml.matches(r#"Extension="png""#).count(), 1);
    }
}
