//! The pre-materialised style tree design note §9 recommends: one JS
//! snapshot evaluated in-page, returned as JSON, and deserialized into
//! [`CapturedNode`]. C2/C3/C4 only ever see this tree — never
//! `headless_chrome` or a live DOM handle — which is what lets them be
//! unit-tested without a browser.

use serde::{Deserialize, Serialize};

/// One DOM node's computed style and geometry, captured synchronously by
/// [`SNAPSHOT_SCRIPT`]. Mirrors exactly the fields C2/C3/C4 need; nothing
/// from the live DOM is consulted after this point.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CapturedNode {
    pub id: String,
    pub tag: String,
    #[serde(default)]
    pub class: String,
    #[serde(default)]
    pub text_content: String,
    pub x: f64,
    pub y: f64,
    pub w: f64,
    pub h: f64,
    #[serde(default)]
    pub offset_w: f64,
    #[serde(default)]
    pub offset_h: f64,
    #[serde(default)]
    pub background_color: String,
    #[serde(default)]
    pub background_image: String,
    #[serde(default)]
    pub border_radius: String,
    #[serde(default)]
    pub box_shadow: String,
    #[serde(default)]
    pub border_top_width: String,
    #[serde(default)]
    pub border_right_width: String,
    #[serde(default)]
    pub border_bottom_width: String,
    #[serde(default)]
    pub border_left_width: String,
    #[serde(default)]
    pub border_top_color: String,
    #[serde(default)]
    pub border_right_color: String,
    #[serde(default)]
    pub border_bottom_color: String,
    #[serde(default)]
    pub border_left_color: String,
    #[serde(default)]
    pub border_top_style: String,
    #[serde(default)]
    pub border_right_style: String,
    #[serde(default)]
    pub border_bottom_style: String,
    #[serde(default)]
    pub border_left_style: String,
    #[serde(default)]
    pub color: String,
    #[serde(default)]
    pub font_size_px: f64,
    #[serde(default)]
    pub font_weight: u32,
    #[serde(default)]
    pub font_style: String,
    #[serde(default)]
    pub font_family: String,
    #[serde(default)]
    pub text_decoration: String,
    #[serde(default)]
    pub text_transform: String,
    #[serde(default)]
    pub text_align: String,
    #[serde(default)]
    pub writing_mode: String,
    #[serde(default)]
    pub transform: String,
    #[serde(default)]
    pub object_fit: String,
    #[serde(default)]
    pub src: String,
    #[serde(default)]
    pub padding_left_px: f64,
    #[serde(default)]
    pub is_block: bool,
    #[serde(default)]
    pub is_flex: bool,
    #[serde(default)]
    pub is_svg: bool,
    #[serde(default)]
    pub is_visible: bool,
    #[serde(default)]
    pub children: Vec<CapturedNode>,
}

/// Evaluated once per page in [`crate::orchestrator::convert_slide`] via
/// the browser engine's `evaluate`. Returns the body's `CapturedNode` tree
/// as JSON; every computed style field above is read with
/// `getComputedStyle` at capture time, matching spec.md §1's "only computed
/// styles at the instant of capture matter."
pub const SNAPSHOT_SCRIPT: &str = r#"
(function capture(el, nextId) {
  const style = getComputedStyle(el);
  const rect = el.getBoundingClientRect();
  if (!el.dataset.h2pId) { el.dataset.h2pId = 'h2p-' + (nextId.n++); }
  const node = {
    id: el.dataset.h2pId,
    tag: el.tagName.toLowerCase(),
    class: el.className && el.className.baseVal !== undefined ? el.className.baseVal : (el.className || ''),
    textContent: Array.prototype.slice.call(el.childNodes)
      .filter(function(n) { return n.nodeType === 3; })
      .map(function(n) { return n.textContent; })
      .join('')
      .trim(),
    x: rect.left, y: rect.top, w: rect.width, h: rect.height,
    offsetW: el.offsetWidth, offsetH: el.offsetHeight,
    backgroundColor: style.backgroundColor,
    backgroundImage: style.backgroundImage,
    borderRadius: style.borderRadius,
    boxShadow: style.boxShadow,
    borderTopWidth: style.borderTopWidth,
    borderRightWidth: style.borderRightWidth,
    borderBottomWidth: style.borderBottomWidth,
    borderLeftWidth: style.borderLeftWidth,
    borderTopColor: style.borderTopColor,
    borderRightColor: style.borderRightColor,
    borderBottomColor: style.borderBottomColor,
    borderLeftColor: style.borderLeftColor,
    borderTopStyle: style.borderTopStyle,
    borderRightStyle: style.borderRightStyle,
    borderBottomStyle: style.borderBottomStyle,
    borderLeftStyle: style.borderLeftStyle,
    color: style.color,
    fontSizePx: parseFloat(style.fontSize),
    fontWeight: parseInt(style.fontWeight, 10) || 400,
    fontStyle: style.fontStyle,
    fontFamily: style.fontFamily,
    textDecoration: style.textDecorationLine,
    textTransform: style.textTransform,
    textAlign: style.textAlign,
    writingMode: style.writingMode,
    transform: style.transform,
    objectFit: style.objectFit,
    src: el.tagName === 'IMG' ? el.src : '',
    paddingLeftPx: parseFloat(style.paddingLeft) || 0,
    isBlock: style.display === 'block' || style.display === 'flex' || style.display === 'list-item',
    isFlex: style.display === 'flex' || style.display === 'inline-flex',
    isSvg: el.tagName.toLowerCase() === 'svg',
    isVisible: style.display !== 'none' && style.visibility !== 'hidden',
    children: [],
  };
  for (const child of el.children) { node.children.push(capture(child, nextId)); }
  return node;
})(document.body, { n: 0 });
"#;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_captured_node_deserializes_minimal_json() {
        let json = r#"{"id":"h2p-0","tag":"div","x":0,"y":0,"w":100,"h":50}"#;
        let node: CapturedNode = serde_json::from_str(json).expect("minimal node should deserialize");
        assert_eq!(node.tag, "div");
        assert_eq!(node.w, 100.0);
        assert!(node.children.is_empty());
    }
}
