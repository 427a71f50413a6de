//! Discovery and in-place rewriting of same-origin asset references.
//!
//! The rewriter only talks to the document through [`ResourceDocument`] and
//! [`ResourceElement`], so the parser behind [`HtmlDocument`] can be swapped
//! without touching the classification rules.

use crate::error::{LoadError, Result};
use crate::naming;
use kuchikiki::traits::TendrilSink;
use kuchikiki::{ElementData, NodeDataRef, NodeRef};
use std::hash::{Hash, Hasher};
use tracing::{debug, info};
use url::Url;

const RESOURCE_SELECTOR: &str = "img[src], link[href], script[src], a[href]";

/// Element/attribute pairs that can point at a local resource.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AssetKind {
    Image,
    Link,
    Script,
    Anchor,
}

impl AssetKind {
    pub fn from_tag(tag: &str) -> Option<Self> {
        match tag.to_ascii_lowercase().as_str() {
            "img" => Some(AssetKind::Image),
            "link" => Some(AssetKind::Link),
            "script" => Some(AssetKind::Script),
            "a" => Some(AssetKind::Anchor),
            _ => None,
        }
    }

    pub fn tag(self) -> &'static str {
        match self {
            AssetKind::Image => "img",
            AssetKind::Link => "link",
            AssetKind::Script => "script",
            AssetKind::Anchor => "a",
        }
    }

    pub fn attribute(self) -> &'static str {
        match self {
            AssetKind::Image | AssetKind::Script => "src",
            AssetKind::Link | AssetKind::Anchor => "href",
        }
    }
}

/// An absolute asset URL and the path the page now uses for it.
///
/// Two resolved assets are equal when their URLs are equal.
#[derive(Debug, Clone)]
pub struct ResolvedAsset {
    pub url: Url,
    pub relative_path: String,
}

impl PartialEq for ResolvedAsset {
    fn eq(&self, other: &Self) -> bool {
        self.url == other.url
    }
}

impl Eq for ResolvedAsset {}

impl Hash for ResolvedAsset {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.url.hash(state);
    }
}

impl ResolvedAsset {
    pub fn file_name(&self) -> String {
        naming::resolved_file_name(&self.url)
    }
}

/// A local reference found in the page, with the raw string as it appeared.
#[derive(Debug, Clone)]
pub struct AssetReference {
    pub kind: AssetKind,
    pub raw: String,
    pub resolved: ResolvedAsset,
}

#[derive(Debug, Clone)]
pub struct PageAssets {
    pub html: String,
    pub assets: Vec<AssetReference>,
}

/// Mutable view of a parsed document, limited to what rewriting needs.
pub trait ResourceDocument {
    type Element: ResourceElement;

    /// Elements that may carry a resource attribute, in document order.
    fn resource_elements(&self) -> Result<Vec<Self::Element>>;

    fn serialize(&self) -> Result<String>;
}

pub trait ResourceElement {
    fn kind(&self) -> Option<AssetKind>;
    fn attribute(&self, name: &str) -> Option<String>;
    fn set_attribute(&self, name: &str, value: String);
}

/// HTML document backed by an html5ever tree.
pub struct HtmlDocument {
    root: NodeRef,
}

impl HtmlDocument {
    pub fn parse(html: &str) -> Self {
        Self {
            root: kuchikiki::parse_html().one(html),
        }
    }
}

impl ResourceDocument for HtmlDocument {
    type Element = NodeDataRef<ElementData>;

    fn resource_elements(&self) -> Result<Vec<Self::Element>> {
        let matches = self
            .root
            .select(RESOURCE_SELECTOR)
            .map_err(|()| LoadError::Parse(format!("invalid selector: {RESOURCE_SELECTOR}")))?;
        Ok(matches.collect())
    }

    fn serialize(&self) -> Result<String> {
        let mut buf = Vec::new();
        self.root
            .serialize(&mut buf)
            .map_err(|e| LoadError::Parse(format!("failed to serialize document: {e}")))?;
        String::from_utf8(buf).map_err(|e| LoadError::Parse(e.to_string()))
    }
}

impl ResourceElement for NodeDataRef<ElementData> {
    fn kind(&self) -> Option<AssetKind> {
        AssetKind::from_tag(&self.name.local)
    }

    fn attribute(&self, name: &str) -> Option<String> {
        self.attributes.borrow().get(name).map(str::to_string)
    }

    fn set_attribute(&self, name: &str, value: String) {
        self.attributes.borrow_mut().insert(name, value);
    }
}

/// Rewrite every same-origin reference in `html` to its local copy.
///
/// When nothing local is found the input comes back byte for byte.
pub fn process(page_url: &Url, html: &str) -> Result<PageAssets> {
    let document = HtmlDocument::parse(html);
    rewrite_document(page_url, html, &document)
}

pub fn rewrite_document<D: ResourceDocument>(
    page_url: &Url,
    original: &str,
    document: &D,
) -> Result<PageAssets> {
    let mut assets = Vec::new();

    for element in document.resource_elements()? {
        let Some(kind) = element.kind() else {
            continue;
        };
        let Some(raw) = element.attribute(kind.attribute()) else {
            continue;
        };

        let Some(url) = local_target(page_url, &raw) else {
            debug!(tag = kind.tag(), reference = %raw, "Skipping non-local reference");
            continue;
        };

        let relative_path = naming::asset_relative_path(page_url, &url);
        debug!(tag = kind.tag(), reference = %raw, local = %relative_path, "Rewriting reference");
        element.set_attribute(kind.attribute(), relative_path.clone());

        assets.push(AssetReference {
            kind,
            raw,
            resolved: ResolvedAsset { url, relative_path },
        });
    }

    info!(page = %page_url, local_assets = assets.len(), "Asset discovery finished");

    if assets.is_empty() {
        return Ok(PageAssets {
            html: original.to_string(),
            assets,
        });
    }

    Ok(PageAssets {
        html: document.serialize()?,
        assets,
    })
}

/// The absolute URL of `reference` if it shares the page's origin.
fn local_target(page_url: &Url, reference: &str) -> Option<Url> {
    let reference = reference.trim();
    if reference.is_empty() || reference.starts_with('#') {
        return None;
    }

    let resolved = naming::resolve(page_url, reference).ok()?;
    (resolved.origin() == page_url.origin()).then_some(resolved)
}
