use std::collections::HashMap;

use figstack::{
    convert::{DesignProvider, ImageResolver},
    ConvertOpts, Converter, FigstackError, FigstackResult, Fit, Node,
};

/// In-memory stand-in for the Figma API backed by the JSON fixture.
struct MockApi {
    document: Node,
    images: HashMap<String, String>,
    fail_images: bool,
}

impl MockApi {
    fn from_fixture() -> Self {
        let document: Node =
            serde_json::from_str(include_str!("data/template_file.json")).unwrap();
        Self {
            document,
            images: HashMap::new(),
            fail_images: false,
        }
    }
}

impl DesignProvider for MockApi {
    fn get_document(&self, _file_key: &str) -> FigstackResult<Node> {
        Ok(self.document.clone())
    }
}

impl ImageResolver for MockApi {
    fn fetch_images(
        &self,
        _file_key: &str,
        _node_ids: &[String],
        _format: &str,
        _scale: f64,
    ) -> FigstackResult<HashMap<String, String>> {
        if self.fail_images {
            return Err(FigstackError::upstream("fetch images: boom"));
        }
        Ok(self.images.clone())
    }
}

fn converter() -> Converter<MockApi> {
    Converter::new(MockApi::from_fixture())
}

fn clip_srcs(template: &figstack::Template) -> Vec<Option<String>> {
    template
        .timeline
        .tracks
        .iter()
        .map(|t| t.clips[0].asset.src().map(str::to_string))
        .collect()
}

#[test]
fn page_converts_with_stacking_order_and_placeholders() {
    let template = converter()
        .convert("file", Some("Template 1"), &ConvertOpts::default())
        .unwrap();

    // Logo front-most, then background, frame 2, frame 3, unranked text last.
    assert_eq!(
        clip_srcs(&template),
        vec![
            Some("{{ FRAME_4_LOGO }}".to_string()),
            Some("{{ FRAME_1_BACKGROUND }}".to_string()),
            Some("{{ FRAME_2_HERO }}".to_string()),
            Some("{{ FRAME_3_DETAIL }}".to_string()),
            None, // text layer carries an html asset
        ]
    );

    let finds: Vec<_> = template.merge.iter().map(|m| m.find.as_str()).collect();
    assert_eq!(
        finds,
        vec![
            "FRAME_4_LOGO",
            "FRAME_1_BACKGROUND",
            "FRAME_2_HERO",
            "FRAME_3_DETAIL"
        ]
    );
}

#[test]
fn composite_fit_modes_follow_the_small_landscape_rule() {
    let template = converter()
        .convert("file", Some("Template 1"), &ConvertOpts::default())
        .unwrap();
    let clips: Vec<_> = template
        .timeline
        .tracks
        .iter()
        .map(|t| &t.clips[0])
        .collect();

    // 100x50 logo frame: landscape and small -> contain.
    assert_eq!(clips[0].fit, Fit::Contain);
    // 1200x1200 and 600x488 frames: crop.
    assert_eq!(clips[1].fit, Fit::Crop);
    assert_eq!(clips[2].fit, Fit::Crop);
}

#[test]
fn offsets_and_scales_match_the_canvas_math() {
    let template = converter()
        .convert("file", Some("Template 1"), &ConvertOpts::default())
        .unwrap();
    let clips: Vec<_> = template
        .timeline
        .tracks
        .iter()
        .map(|t| &t.clips[0])
        .collect();

    // Logo frame at (50, 1000) size 100x50 on a 1200x1200 canvas.
    let logo_offset = clips[0].offset.unwrap();
    assert_eq!(logo_offset.x, -0.417);
    assert_eq!(logo_offset.y, -0.354);
    assert_eq!(clips[0].scale, 0.063);

    // Full-canvas background: centered, scale 1.
    let bg_offset = clips[1].offset.unwrap();
    assert_eq!(bg_offset.x, 0.0);
    assert_eq!(bg_offset.y, 0.0);
    assert_eq!(clips[1].scale, 1.0);
}

#[test]
fn unnamed_page_falls_back_to_the_first() {
    let c = converter();
    let by_default = c.convert("file", None, &ConvertOpts::default()).unwrap();
    let by_name = c
        .convert("file", Some("Template 1"), &ConvertOpts::default())
        .unwrap();
    assert_eq!(
        serde_json::to_string(&by_default).unwrap(),
        serde_json::to_string(&by_name).unwrap()
    );
}

#[test]
fn missing_page_is_a_not_found_error() {
    let err = converter()
        .convert("file", Some("No Such Page"), &ConvertOpts::default())
        .unwrap_err();
    assert!(matches!(err, FigstackError::NotFound(_)), "got {err}");
}

#[test]
fn conversion_is_idempotent() {
    let c = converter();
    let a = c
        .convert("file", Some("Template 1"), &ConvertOpts::default())
        .unwrap();
    let b = c
        .convert("file", Some("Template 1"), &ConvertOpts::default())
        .unwrap();
    assert_eq!(
        serde_json::to_string(&a).unwrap(),
        serde_json::to_string(&b).unwrap()
    );
}

#[test]
fn image_only_mode_shapes_the_output_block() {
    let opts = ConvertOpts {
        image_only: true,
        duration: 9.0,
        ..ConvertOpts::default()
    };
    let template = converter()
        .convert("file", Some("Template 1"), &opts)
        .unwrap();

    assert_eq!(template.output.fps, None);
    assert!(template
        .timeline
        .tracks
        .iter()
        .all(|t| t.clips[0].length == 1.0));

    let json = serde_json::to_value(&template).unwrap();
    assert!(json["output"].get("fps").is_none());
}

#[test]
fn resolved_images_replace_placeholders_and_suppress_merge() {
    let mut api = MockApi::from_fixture();
    // 5:2 is the logo frame's vector child, the composite fetch target.
    api.images.insert(
        "5:2".to_string(),
        "https://cdn.example.com/logo.png".to_string(),
    );
    let c = Converter::new(api);

    let opts = ConvertOpts {
        populate_images: true,
        ..ConvertOpts::default()
    };
    let template = c.convert("file", Some("Template 1"), &opts).unwrap();

    assert_eq!(
        clip_srcs(&template)[0].as_deref(),
        Some("https://cdn.example.com/logo.png")
    );
    let finds: Vec<_> = template.merge.iter().map(|m| m.find.as_str()).collect();
    assert!(!finds.contains(&"FRAME_4_LOGO"));
    assert_eq!(finds.len(), 3);
}

#[test]
fn image_fetch_failure_degrades_to_placeholders() {
    let mut api = MockApi::from_fixture();
    api.fail_images = true;
    let c = Converter::new(api);

    let opts = ConvertOpts {
        populate_images: true,
        ..ConvertOpts::default()
    };
    let template = c.convert("file", Some("Template 1"), &opts).unwrap();
    assert_eq!(template.merge.len(), 4);
    assert_eq!(
        clip_srcs(&template)[0].as_deref(),
        Some("{{ FRAME_4_LOGO }}")
    );
}

#[test]
fn convert_all_pages_sanitizes_keys_and_keeps_names() {
    let templates = converter()
        .convert_all_pages("file", &ConvertOpts::default())
        .unwrap();

    let keys: Vec<_> = templates.keys().cloned().collect();
    assert!(keys.contains(&"Template_1".to_string()));
    assert!(keys.contains(&"Page_One".to_string()));
    assert!(keys.contains(&"Page_Two".to_string()));

    assert_eq!(templates["Page_One"].original_name, "Page/One");
    assert_eq!(templates["Page_Two"].original_name, "Page Two");

    // Empty page: no tracks, merge key absent from the JSON.
    let empty = serde_json::to_value(&templates["Page_Two"].template).unwrap();
    assert_eq!(empty["timeline"]["tracks"].as_array().unwrap().len(), 0);
    assert!(empty.get("merge").is_none());
}

#[test]
fn canvas_comes_from_the_pages_main_frame() {
    // Page/One's frame is 800x600; its full-bleed vector centers at (0, 0).
    let templates = converter()
        .convert_all_pages("file", &ConvertOpts::default())
        .unwrap();
    let template = &templates["Page_One"].template;
    assert_eq!(template.timeline.tracks.len(), 1);
    let clip = &template.timeline.tracks[0].clips[0];
    let offset = clip.offset.unwrap();
    assert_eq!(offset.x, 0.0);
    assert_eq!(offset.y, 0.0);
    assert_eq!(clip.scale, 1.0);
}
