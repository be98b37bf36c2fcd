//! Static documents used across harnesses.

/// A scene using every registered YAML tag, including nesting.
pub const SCENE_YAML: &str = r#"
name: demo
background: !rect {width: 10.0, height: 5.0}
shapes:
  - !circle
    radius: 1.0
  - !square 2.0
  - !group
    children:
      - !square 1.0
      - !rect {width: 2.0, height: 3.0}
"#;

/// The same scene in the JSON `{tag: payload}` form.
pub const SCENE_JSON: &str = r#"{
  "name": "demo",
  "background": {"rect": {"width": 10.0, "height": 5.0}},
  "shapes": [
    {"circle": {"radius": 1.0}},
    {"square": 2.0},
    {"group": {"children": [{"square": 1.0}, {"rect": {"width": 2.0, "height": 3.0}}]}}
  ]
}"#;

/// Total area of the shapes list in both scenes.
pub const SCENE_SHAPES_AREA: f64 = std::f64::consts::PI + 4.0 + 1.0 + 6.0;

/// A generated API-reference search table (21 entries, all well formed).
pub const SEARCH_DATA: &str = include_str!("../data/search_all_1.js");

/// Write `contents` to a fresh temp file named `name`; keep the dir alive.
pub fn temp_file(name: &str, contents: &str) -> (tempfile::TempDir, std::path::PathBuf) {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join(name);
    std::fs::write(&path, contents).unwrap();
    (dir, path)
}
