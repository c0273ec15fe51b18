//! Comprehensive taxonomy tests covering registry stability, serialization,
//! message rendering, and DTO snapshots across the diagnostics crates.

use std::collections::HashSet;
use std::str::FromStr;

use vitrine_error::{
    Category, CategoryGroup, MissingStoryAfterHmrError, MissingStoryData, StructuredError,
    StructuredErrorDto,
};
use vitrine_text::dedent;

fn missing(id: &str) -> MissingStoryAfterHmrError {
    MissingStoryAfterHmrError::new(MissingStoryData {
        story_id: id.to_owned(),
    })
}

// ═══════════════════════════════════════════════════════════════════════════
// 1. Registry stability
// ═══════════════════════════════════════════════════════════════════════════

/// Golden list of every released tag. A diff here means a released string
/// changed, which breaks persisted logs and documentation links.
const RELEASED_TAGS: &[&str] = &[
    "PREVIEW_CLIENT-LOGGER",
    "PREVIEW_CHANNELS",
    "PREVIEW_CORE-EVENTS",
    "PREVIEW_INSTRUMENTER",
    "PREVIEW_API",
    "PREVIEW_REACT-DOM-SHIM",
    "PREVIEW_ROUTER",
    "PREVIEW_THEMING",
    "FRAMEWORK_ANGULAR",
    "FRAMEWORK_EMBER",
    "FRAMEWORK_HTML-VITE",
    "FRAMEWORK_HTML-WEBPACK5",
    "FRAMEWORK_NEXTJS",
    "FRAMEWORK_PREACT-VITE",
    "FRAMEWORK_PREACT-WEBPACK5",
    "FRAMEWORK_REACT-VITE",
    "FRAMEWORK_REACT-WEBPACK5",
    "FRAMEWORK_SERVER-WEBPACK5",
    "FRAMEWORK_SVELTE-VITE",
    "FRAMEWORK_SVELTE-WEBPACK5",
    "FRAMEWORK_SVELTEKIT",
    "FRAMEWORK_VUE-VITE",
    "FRAMEWORK_VUE-WEBPACK5",
    "FRAMEWORK_VUE3-VITE",
    "FRAMEWORK_VUE3-WEBPACK5",
    "FRAMEWORK_WEB-COMPONENTS-VITE",
    "FRAMEWORK_WEB-COMPONENTS-WEBPACK5",
    "RENDERER_HTML",
    "RENDERER_PREACT",
    "RENDERER_REACT",
    "RENDERER_SERVER",
    "RENDERER_SVELTE",
    "RENDERER_VUE",
    "RENDERER_VUE3",
    "RENDERER_WEB-COMPONENTS",
];

#[test]
fn registry_matches_the_released_tag_list() {
    let tags: Vec<&str> = Category::ALL.iter().map(|c| c.as_str()).collect();
    assert_eq!(tags, RELEASED_TAGS);
}

#[test]
fn no_two_entries_share_a_tag() {
    let mut seen = HashSet::new();
    for cat in Category::ALL {
        assert!(seen.insert(cat.as_str()), "duplicate: {}", cat.as_str());
    }
}

#[test]
fn no_two_entries_share_a_serde_representation() {
    let mut seen = HashSet::new();
    for cat in Category::ALL {
        let json = serde_json::to_string(cat).unwrap();
        assert!(seen.insert(json.clone()), "duplicate serde: {json}");
    }
}

#[test]
fn every_tag_parses_back_to_its_entry() {
    for cat in Category::ALL {
        assert_eq!(Category::from_str(cat.as_str()).unwrap(), *cat);
    }
}

#[test]
fn parsing_preserves_the_offending_tag() {
    let err = Category::from_str("MANAGER_API").unwrap_err();
    assert_eq!(err.to_string(), "unknown category tag 'MANAGER_API'");
}

#[test]
fn every_group_is_populated() {
    let mut covered: HashSet<CategoryGroup> = HashSet::new();
    for cat in Category::ALL {
        covered.insert(cat.group());
    }
    assert_eq!(covered.len(), 3);
}

#[test]
fn serde_rejects_unknown_tags() {
    let result = serde_json::from_str::<Category>(r#""PREVIEW_UNKNOWN""#);
    assert!(result.is_err());
}

#[test]
fn category_deserializes_from_released_tag() {
    let cat: Category = serde_json::from_str(r#""PREVIEW_REACT-DOM-SHIM""#).unwrap();
    assert_eq!(cat, Category::PreviewReactDomShim);
}

// ═══════════════════════════════════════════════════════════════════════════
// 2. Message rendering
// ═══════════════════════════════════════════════════════════════════════════

#[test]
fn missing_story_message_golden() {
    let expected = "Couldn't find story matching id 'button--primary' after HMR.\n\
                    - Did you just rename a story?\n\
                    - Did you remove it from your CSF file?\n\
                    - Are you sure a story with the id 'button--primary' exists?\n\
                    - Please check the values in the stories field of your main.js config and see if they would match your CSF File.\n\
                    - Also check the browser console and terminal for potential error messages.";
    assert_eq!(missing("button--primary").message(), expected);
}

#[test]
fn scenario_from_the_preview_overlay() {
    let err = missing("button--primary");
    assert_eq!(err.category().as_str(), "PREVIEW_API");
    assert_eq!(err.code(), 1);
    let msg = err.message();
    assert!(msg.contains("id 'button--primary'"));
    for line in msg.lines() {
        assert!(!line.starts_with(' '), "indented line: {line:?}");
    }
}

#[test]
fn template_keeps_source_indentation_but_message_does_not() {
    let err = missing("x");
    assert!(err.template().lines().any(|l| l.starts_with(' ')));
    assert!(err.message().lines().all(|l| !l.starts_with(' ')));
}

#[test]
fn message_equals_dedented_template() {
    let err = missing("button--primary");
    assert_eq!(err.message(), dedent(&err.template()));
}

#[test]
fn error_trait_object_renders_the_message() {
    let err = missing("button--primary");
    let boxed: Box<dyn std::error::Error> = Box::new(err.clone());
    assert_eq!(boxed.to_string(), err.message());
    assert!(std::error::Error::source(boxed.as_ref()).is_none());
}

// ═══════════════════════════════════════════════════════════════════════════
// 3. DTO snapshots
// ═══════════════════════════════════════════════════════════════════════════

#[test]
fn dto_json_snapshot() {
    let err = missing("button--primary");
    let dto: StructuredErrorDto = (&err).into();
    let json = serde_json::to_value(&dto).unwrap();
    assert_eq!(json["category"], "PREVIEW_API");
    assert_eq!(json["code"], 1);
    assert_eq!(json["full_code"], "VIT_PREVIEW_API_0001");
    assert_eq!(json["data"]["storyId"], "button--primary");
    assert!(json["message"]
        .as_str()
        .unwrap()
        .starts_with("Couldn't find story matching id"));
}

#[test]
fn dto_roundtrip_preserves_everything() {
    let err = missing("header--dark");
    let dto: StructuredErrorDto = (&err).into();
    let json = serde_json::to_string(&dto).unwrap();
    let back: StructuredErrorDto = serde_json::from_str(&json).unwrap();
    assert_eq!(dto, back);
}

#[test]
fn dto_exact_serialization() {
    let dto = StructuredErrorDto {
        category: Category::RendererReact,
        code: 2,
        full_code: "VIT_RENDERER_REACT_0002".to_owned(),
        message: "m".to_owned(),
        data: serde_json::Map::new(),
    };
    assert_eq!(
        serde_json::to_string(&dto).unwrap(),
        r#"{"category":"RENDERER_REACT","code":2,"full_code":"VIT_RENDERER_REACT_0002","message":"m"}"#
    );
}

#[test]
fn dto_data_defaults_to_empty_on_deserialize() {
    let json = r#"{"category":"PREVIEW_API","code":1,"full_code":"VIT_PREVIEW_API_0001","message":"m"}"#;
    let dto: StructuredErrorDto = serde_json::from_str(json).unwrap();
    assert!(dto.data.is_empty());
}

#[test]
fn dto_schema_derives() {
    let schema = schemars::schema_for!(StructuredErrorDto);
    let json = serde_json::to_string(&schema).unwrap();
    assert!(json.contains("full_code"));
    assert!(json.contains("PREVIEW_API"));
}
