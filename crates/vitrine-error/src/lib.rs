//! Structured diagnostics taxonomy for Vitrine.
//!
//! Every user-facing Vitrine diagnostic carries a stable [`Category`] (a
//! machine-readable tag naming the package it originates from), a small
//! integer code unique within that category, and a message template rendered
//! from the data captured at the failure site.  The [`StructuredError`]
//! contract ties the three together and derives the final message and the
//! combined `VIT_<CATEGORY>_<code>` identifier from them.

#![deny(unsafe_code)]
#![warn(missing_docs)]

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;
use vitrine_text::dedent;

// ---------------------------------------------------------------------------
// Category
// ---------------------------------------------------------------------------

/// Closed registry of error-origin tags, one per Vitrine package.
///
/// Values are namespaced by a subsystem prefix (`PREVIEW_`, `FRAMEWORK_`,
/// `RENDERER_`) so that two packages never collide on a `(category, code)`
/// pair.  A diagnostic raised from a package without an entry here gets a new
/// variant named after the package, e.g. `PREVIEW_CLIENT-LOGGER` for the
/// preview client-logger.
///
/// The registry is additive-only: existing variants and their string
/// representations never change once released, since consumers persist them
/// in logs, telemetry, and documentation cross-references.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Category {
    // -- Preview runtime --
    /// Preview client-logger package.
    #[serde(rename = "PREVIEW_CLIENT-LOGGER")]
    PreviewClientLogger,
    /// Preview channels (manager/preview message bus).
    PreviewChannels,
    /// Preview core-events package.
    #[serde(rename = "PREVIEW_CORE-EVENTS")]
    PreviewCoreEvents,
    /// Preview instrumenter.
    PreviewInstrumenter,
    /// Preview store and its public API.
    PreviewApi,
    /// React DOM shim used by the preview.
    #[serde(rename = "PREVIEW_REACT-DOM-SHIM")]
    PreviewReactDomShim,
    /// Preview router.
    PreviewRouter,
    /// Preview theming package.
    PreviewTheming,

    // -- Framework integrations --
    /// Angular framework integration.
    FrameworkAngular,
    /// Ember framework integration.
    FrameworkEmber,
    /// HTML + Vite framework integration.
    #[serde(rename = "FRAMEWORK_HTML-VITE")]
    FrameworkHtmlVite,
    /// HTML + webpack 5 framework integration.
    #[serde(rename = "FRAMEWORK_HTML-WEBPACK5")]
    FrameworkHtmlWebpack5,
    /// Next.js framework integration.
    FrameworkNextjs,
    /// Preact + Vite framework integration.
    #[serde(rename = "FRAMEWORK_PREACT-VITE")]
    FrameworkPreactVite,
    /// Preact + webpack 5 framework integration.
    #[serde(rename = "FRAMEWORK_PREACT-WEBPACK5")]
    FrameworkPreactWebpack5,
    /// React + Vite framework integration.
    #[serde(rename = "FRAMEWORK_REACT-VITE")]
    FrameworkReactVite,
    /// React + webpack 5 framework integration.
    #[serde(rename = "FRAMEWORK_REACT-WEBPACK5")]
    FrameworkReactWebpack5,
    /// Server-rendered + webpack 5 framework integration.
    #[serde(rename = "FRAMEWORK_SERVER-WEBPACK5")]
    FrameworkServerWebpack5,
    /// Svelte + Vite framework integration.
    #[serde(rename = "FRAMEWORK_SVELTE-VITE")]
    FrameworkSvelteVite,
    /// Svelte + webpack 5 framework integration.
    #[serde(rename = "FRAMEWORK_SVELTE-WEBPACK5")]
    FrameworkSvelteWebpack5,
    /// SvelteKit framework integration.
    FrameworkSveltekit,
    /// Vue 2 + Vite framework integration.
    #[serde(rename = "FRAMEWORK_VUE-VITE")]
    FrameworkVueVite,
    /// Vue 2 + webpack 5 framework integration.
    #[serde(rename = "FRAMEWORK_VUE-WEBPACK5")]
    FrameworkVueWebpack5,
    /// Vue 3 + Vite framework integration.
    #[serde(rename = "FRAMEWORK_VUE3-VITE")]
    FrameworkVue3Vite,
    /// Vue 3 + webpack 5 framework integration.
    #[serde(rename = "FRAMEWORK_VUE3-WEBPACK5")]
    FrameworkVue3Webpack5,
    /// Web components + Vite framework integration.
    #[serde(rename = "FRAMEWORK_WEB-COMPONENTS-VITE")]
    FrameworkWebComponentsVite,
    /// Web components + webpack 5 framework integration.
    #[serde(rename = "FRAMEWORK_WEB-COMPONENTS-WEBPACK5")]
    FrameworkWebComponentsWebpack5,

    // -- Renderer adapters --
    /// Plain HTML renderer.
    RendererHtml,
    /// Preact renderer.
    RendererPreact,
    /// React renderer.
    RendererReact,
    /// Server-side renderer.
    RendererServer,
    /// Svelte renderer.
    RendererSvelte,
    /// Vue 2 renderer.
    RendererVue,
    /// Vue 3 renderer.
    RendererVue3,
    /// Web components renderer.
    #[serde(rename = "RENDERER_WEB-COMPONENTS")]
    RendererWebComponents,
}

impl Category {
    /// Every registry entry, for iteration by consumers and tests.
    pub const ALL: &'static [Category] = &[
        Self::PreviewClientLogger,
        Self::PreviewChannels,
        Self::PreviewCoreEvents,
        Self::PreviewInstrumenter,
        Self::PreviewApi,
        Self::PreviewReactDomShim,
        Self::PreviewRouter,
        Self::PreviewTheming,
        Self::FrameworkAngular,
        Self::FrameworkEmber,
        Self::FrameworkHtmlVite,
        Self::FrameworkHtmlWebpack5,
        Self::FrameworkNextjs,
        Self::FrameworkPreactVite,
        Self::FrameworkPreactWebpack5,
        Self::FrameworkReactVite,
        Self::FrameworkReactWebpack5,
        Self::FrameworkServerWebpack5,
        Self::FrameworkSvelteVite,
        Self::FrameworkSvelteWebpack5,
        Self::FrameworkSveltekit,
        Self::FrameworkVueVite,
        Self::FrameworkVueWebpack5,
        Self::FrameworkVue3Vite,
        Self::FrameworkVue3Webpack5,
        Self::FrameworkWebComponentsVite,
        Self::FrameworkWebComponentsWebpack5,
        Self::RendererHtml,
        Self::RendererPreact,
        Self::RendererReact,
        Self::RendererServer,
        Self::RendererSvelte,
        Self::RendererVue,
        Self::RendererVue3,
        Self::RendererWebComponents,
    ];

    /// Stable `&'static str` representation of the tag (e.g.
    /// `"PREVIEW_CLIENT-LOGGER"`).
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::PreviewClientLogger => "PREVIEW_CLIENT-LOGGER",
            Self::PreviewChannels => "PREVIEW_CHANNELS",
            Self::PreviewCoreEvents => "PREVIEW_CORE-EVENTS",
            Self::PreviewInstrumenter => "PREVIEW_INSTRUMENTER",
            Self::PreviewApi => "PREVIEW_API",
            Self::PreviewReactDomShim => "PREVIEW_REACT-DOM-SHIM",
            Self::PreviewRouter => "PREVIEW_ROUTER",
            Self::PreviewTheming => "PREVIEW_THEMING",
            Self::FrameworkAngular => "FRAMEWORK_ANGULAR",
            Self::FrameworkEmber => "FRAMEWORK_EMBER",
            Self::FrameworkHtmlVite => "FRAMEWORK_HTML-VITE",
            Self::FrameworkHtmlWebpack5 => "FRAMEWORK_HTML-WEBPACK5",
            Self::FrameworkNextjs => "FRAMEWORK_NEXTJS",
            Self::FrameworkPreactVite => "FRAMEWORK_PREACT-VITE",
            Self::FrameworkPreactWebpack5 => "FRAMEWORK_PREACT-WEBPACK5",
            Self::FrameworkReactVite => "FRAMEWORK_REACT-VITE",
            Self::FrameworkReactWebpack5 => "FRAMEWORK_REACT-WEBPACK5",
            Self::FrameworkServerWebpack5 => "FRAMEWORK_SERVER-WEBPACK5",
            Self::FrameworkSvelteVite => "FRAMEWORK_SVELTE-VITE",
            Self::FrameworkSvelteWebpack5 => "FRAMEWORK_SVELTE-WEBPACK5",
            Self::FrameworkSveltekit => "FRAMEWORK_SVELTEKIT",
            Self::FrameworkVueVite => "FRAMEWORK_VUE-VITE",
            Self::FrameworkVueWebpack5 => "FRAMEWORK_VUE-WEBPACK5",
            Self::FrameworkVue3Vite => "FRAMEWORK_VUE3-VITE",
            Self::FrameworkVue3Webpack5 => "FRAMEWORK_VUE3-WEBPACK5",
            Self::FrameworkWebComponentsVite => "FRAMEWORK_WEB-COMPONENTS-VITE",
            Self::FrameworkWebComponentsWebpack5 => "FRAMEWORK_WEB-COMPONENTS-WEBPACK5",
            Self::RendererHtml => "RENDERER_HTML",
            Self::RendererPreact => "RENDERER_PREACT",
            Self::RendererReact => "RENDERER_REACT",
            Self::RendererServer => "RENDERER_SERVER",
            Self::RendererSvelte => "RENDERER_SVELTE",
            Self::RendererVue => "RENDERER_VUE",
            Self::RendererVue3 => "RENDERER_VUE3",
            Self::RendererWebComponents => "RENDERER_WEB-COMPONENTS",
        }
    }

    /// Returns the broad [`CategoryGroup`] this tag belongs to.
    pub fn group(&self) -> CategoryGroup {
        match self {
            Self::PreviewClientLogger
            | Self::PreviewChannels
            | Self::PreviewCoreEvents
            | Self::PreviewInstrumenter
            | Self::PreviewApi
            | Self::PreviewReactDomShim
            | Self::PreviewRouter
            | Self::PreviewTheming => CategoryGroup::Preview,

            Self::FrameworkAngular
            | Self::FrameworkEmber
            | Self::FrameworkHtmlVite
            | Self::FrameworkHtmlWebpack5
            | Self::FrameworkNextjs
            | Self::FrameworkPreactVite
            | Self::FrameworkPreactWebpack5
            | Self::FrameworkReactVite
            | Self::FrameworkReactWebpack5
            | Self::FrameworkServerWebpack5
            | Self::FrameworkSvelteVite
            | Self::FrameworkSvelteWebpack5
            | Self::FrameworkSveltekit
            | Self::FrameworkVueVite
            | Self::FrameworkVueWebpack5
            | Self::FrameworkVue3Vite
            | Self::FrameworkVue3Webpack5
            | Self::FrameworkWebComponentsVite
            | Self::FrameworkWebComponentsWebpack5 => CategoryGroup::Framework,

            Self::RendererHtml
            | Self::RendererPreact
            | Self::RendererReact
            | Self::RendererServer
            | Self::RendererSvelte
            | Self::RendererVue
            | Self::RendererVue3
            | Self::RendererWebComponents => CategoryGroup::Renderer,
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Category {
    type Err = UnknownCategoryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .iter()
            .copied()
            .find(|c| c.as_str() == s)
            .ok_or_else(|| UnknownCategoryError { tag: s.to_owned() })
    }
}

/// Error returned when a persisted category tag does not match any registry
/// entry.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown category tag '{tag}'")]
pub struct UnknownCategoryError {
    /// The tag that failed to parse.
    pub tag: String,
}

// ---------------------------------------------------------------------------
// CategoryGroup
// ---------------------------------------------------------------------------

/// Broad subsystem family that a [`Category`] belongs to.
///
/// The family is the leading segment of the tag; it keeps diagnostics from
/// different halves of the product (preview runtime, framework builders,
/// renderer adapters) in separate code namespaces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum CategoryGroup {
    /// Packages of the preview runtime.
    Preview,
    /// Per-framework build integrations.
    Framework,
    /// Per-renderer adapters.
    Renderer,
}

impl fmt::Display for CategoryGroup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Preview => "preview",
            Self::Framework => "framework",
            Self::Renderer => "renderer",
        };
        f.write_str(s)
    }
}

// ---------------------------------------------------------------------------
// StructuredError
// ---------------------------------------------------------------------------

/// Contract implemented by every concrete Vitrine diagnostic.
///
/// `category` and `code` are fixed at the type level, never supplied by the
/// caller, so two instances of the same variant always classify identically.
/// A code is scoped to its category, starts at 1, and is never reassigned to
/// a different meaning once released.
///
/// The diagnostic itself is an inert value: constructing one performs no
/// I/O, no logging, and touches no shared state.  Whatever layer catches it
/// reads [`StructuredError::message`] for display and `category`/`code` for
/// programmatic dispatch.
pub trait StructuredError: std::error::Error {
    /// Registry tag of the package this diagnostic originates from.
    fn category(&self) -> Category;

    /// Integer identifying this diagnostic within its category.
    fn code(&self) -> u32;

    /// Message template rendered from the captured data.
    ///
    /// Implementations interpolate their data into a multi-line literal and
    /// may keep the source indentation; [`StructuredError::message`] strips
    /// it before the text reaches a user.
    fn template(&self) -> String;

    /// Captured payload as plain key/value data.
    ///
    /// Defaults to empty for diagnostics that carry no context.
    fn data(&self) -> serde_json::Map<String, serde_json::Value> {
        serde_json::Map::new()
    }

    /// Stable identifier combining category and zero-padded code, e.g.
    /// `VIT_PREVIEW_API_0001`.
    ///
    /// Suitable as a log key or a documentation deep-link slug.
    fn full_code(&self) -> String {
        format!("VIT_{}_{:04}", self.category(), self.code())
    }

    /// Final user-facing message: the template with the common leading
    /// whitespace stripped.
    ///
    /// Pure function of the captured data; rendering twice yields
    /// byte-identical output.
    fn message(&self) -> String {
        dedent(&self.template())
    }
}

// ---------------------------------------------------------------------------
// StructuredErrorDto
// ---------------------------------------------------------------------------

/// Serialisable snapshot of a [`StructuredError`] for logs, telemetry, and
/// the preview overlay.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct StructuredErrorDto {
    /// Originating package tag.
    pub category: Category,
    /// Code within the category.
    pub code: u32,
    /// Combined stable identifier (`VIT_<CATEGORY>_<code>`).
    pub full_code: String,
    /// Rendered user-facing message.
    pub message: String,
    /// Captured payload.
    #[serde(default, skip_serializing_if = "serde_json::Map::is_empty")]
    pub data: serde_json::Map<String, serde_json::Value>,
}

impl<E: StructuredError> From<&E> for StructuredErrorDto {
    fn from(err: &E) -> Self {
        Self {
            category: err.category(),
            code: err.code(),
            full_code: err.full_code(),
            message: err.message(),
            data: err.data(),
        }
    }
}

// ---------------------------------------------------------------------------
// MissingStoryAfterHmrError
// ---------------------------------------------------------------------------

/// Payload for [`MissingStoryAfterHmrError`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct MissingStoryData {
    /// The story id that failed to resolve.
    #[serde(rename = "storyId")]
    pub story_id: String,
}

/// Raised by the preview store when a story id no longer resolves after a
/// hot-module-reload cycle.
///
/// The id is interpolated into the message verbatim, so callers must not
/// pass sensitive data in it.  An empty id is accepted and renders as
/// `id ''`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MissingStoryAfterHmrError {
    /// Payload captured at the failing lookup site.
    pub data: MissingStoryData,
}

impl MissingStoryAfterHmrError {
    /// Capture a failed story lookup.
    pub fn new(data: MissingStoryData) -> Self {
        Self { data }
    }
}

impl StructuredError for MissingStoryAfterHmrError {
    fn category(&self) -> Category {
        Category::PreviewApi
    }

    fn code(&self) -> u32 {
        1
    }

    fn template(&self) -> String {
        format!(
            "
            Couldn't find story matching id '{id}' after HMR.
            - Did you just rename a story?
            - Did you remove it from your CSF file?
            - Are you sure a story with the id '{id}' exists?
            - Please check the values in the stories field of your main.js config and see if they would match your CSF File.
            - Also check the browser console and terminal for potential error messages.",
            id = self.data.story_id
        )
    }

    fn data(&self) -> serde_json::Map<String, serde_json::Value> {
        let mut data = serde_json::Map::new();
        data.insert(
            "storyId".to_owned(),
            serde_json::Value::String(self.data.story_id.clone()),
        );
        data
    }
}

impl fmt::Display for MissingStoryAfterHmrError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message())
    }
}

impl std::error::Error for MissingStoryAfterHmrError {}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
