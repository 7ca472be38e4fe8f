// Central place for UI strings and other non-localized constants.
// Keep these out of gui.rs and panel.rs so both agree on wording.

// English UI strings (EN_ prefix to make future localization easier)
pub const EN_APP_TITLE: &str = "propsync: Property Inspector";

pub const EN_UNKNOWN_ELEMENT: &str = "<unknown>";
pub const EN_HEADING_PROPERTIES: &str = "Properties";
pub const EN_HEADING_SOURCE: &str = "Source";
pub const EN_LABEL_ID: &str = "id:";
pub const EN_TOOLTIP_TYPE: &str = "Type:";
pub const EN_HINT_NO_BINDING: &str = "no binding";
pub const EN_STATUS_NAVIGATED: &str = "Definition at";
pub const EN_BTN_TOGGLE_THEME: &str = "Theme";

// Display-category tags. Named types pass their own name through.
pub const TAG_CALLBACK: &str = "callback";
pub const TAG_ENUM: &str = "enum";
pub const TAG_FUNCTION: &str = "function";
pub const TAG_ELEMENT_REF: &str = "element-ref";
pub const TAG_UNKNOWN: &str = "unknown";

// Row style tags.
pub const STYLE_BUILTIN: &str = "builtin";
pub const STYLE_UNDEFINED: &str = "undefined";
pub const STYLE_CHANGED: &str = "changed";

pub const WINDOW_SIZE: [f32; 2] = [1100.0, 720.0];

// Built-in demo scenario used when no file is given on the command line.
pub const SAMPLE_URI: &str = "file:///sample.60";

pub const SAMPLE_SOURCE: &str = r#"export Demo := Window {
    rect1 := Rectangle {
        width: 40px;
        height: parent.height / 2;
        background: #3060c0;
        clicked => { debug("hello"); }
    }
}
"#;

pub const SAMPLE_QUERY: &str = r#"{
  element: { typeName: "Rectangle", id: "rect1" },
  properties: [
    { name: "width", group: "geometry", typeName: "length",
      declaredAt: { line: 2, character: 8 }, definedAt: { line: 2, character: 8 } },
    { name: "height", group: "geometry", typeName: "length",
      declaredAt: { line: 3, character: 8 }, definedAt: { line: 3, character: 8 } },
    { name: "x", group: "geometry", typeName: "length" },
    { name: "background", group: "appearance", typeName: "brush",
      definedAt: { line: 4, character: 8 } },
    { name: "opacity", group: "appearance", typeName: "float" },
    { name: "clicked", group: "callbacks", typeName: "callback()",
      declaredAt: { line: 5, character: 8 }, definedAt: { line: 5, character: 8 } },
  ],
  sourceUri: "file:///sample.60",
}"#;
