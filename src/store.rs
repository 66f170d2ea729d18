use std::collections::HashSet;
use std::fs;
use std::sync::{Arc, RwLock};

use log::{error, info, warn};
use serde_json::Value;

use crate::models::content::ContentDocument;
use crate::pricing;

/// Well-known static path the catalog document is deployed to.
pub const DEFAULT_CONTENT_PATH: &str = "website/content.json";

/// Filename offered on export, for manual re-upload to the hosting location.
pub const EXPORT_FILENAME: &str = "content.json";

/// Top-level sections a document must carry before it is trusted.
const REQUIRED_SECTIONS: &[&str] = &[
    "branding",
    "hero",
    "marketplaces",
    "categories",
    "offers",
    "about",
    "contact",
    "admin",
];

const ARRAY_SECTIONS: &[&str] = &["marketplaces", "categories", "offers"];

pub fn content_path() -> String {
    std::env::var("VITRINE_CONTENT").unwrap_or_else(|_| DEFAULT_CONTENT_PATH.to_string())
}

/// Coarse presence check of all required top-level sections. Non-deep:
/// field-level problems surface later as a deserialization error.
pub fn validate_shape(candidate: &Value) -> bool {
    let obj = match candidate.as_object() {
        Some(o) => o,
        None => return false,
    };
    for section in REQUIRED_SECTIONS {
        match obj.get(*section) {
            Some(v) if ARRAY_SECTIONS.contains(section) => {
                if !v.is_array() {
                    return false;
                }
            }
            Some(v) => {
                if !v.is_object() {
                    return false;
                }
            }
            None => return false,
        }
    }
    true
}

/// Normalize arbitrary text to a lowercase, accent-stripped, hyphen-separated
/// identifier: "Casa & Jardim" → "casa-jardim".
pub fn generate_slug(text: &str) -> String {
    slug::slugify(text)
}

pub fn is_valid_url(s: &str) -> bool {
    url::Url::parse(s).is_ok()
}

/// One typed edit per admin-editable field. The original surface only wires
/// the site name and the two hero texts; the rest of the document is edited
/// by re-uploading content.json by hand.
#[derive(Debug, Clone)]
pub enum ContentEdit {
    SiteName(String),
    HeroTitle(String),
    HeroSubtitle(String),
}

impl ContentEdit {
    /// Apply to a document, returning a new snapshot. The input is left
    /// untouched so the previous snapshot stays valid for readers.
    pub fn apply(&self, doc: &ContentDocument) -> ContentDocument {
        let mut next = doc.clone();
        match self {
            ContentEdit::SiteName(v) => next.branding.site_name = v.clone(),
            ContentEdit::HeroTitle(v) => next.hero.title = v.clone(),
            ContentEdit::HeroSubtitle(v) => next.hero.subtitle = v.clone(),
        }
        next
    }
}

/// Owns the in-memory catalog document. Loaded once at boot; `None` means
/// the load failed and every public page renders the loading placeholder
/// until the operator fixes the file and restarts.
pub struct ContentStore {
    current: RwLock<Option<Arc<ContentDocument>>>,
}

impl ContentStore {
    pub fn empty() -> Self {
        ContentStore {
            current: RwLock::new(None),
        }
    }

    pub fn with_document(doc: ContentDocument) -> Self {
        ContentStore {
            current: RwLock::new(Some(Arc::new(doc))),
        }
    }

    /// Read, parse and shape-validate the document at `path`. A failure
    /// leaves any prior in-memory document untouched; there is no retry.
    pub fn load(path: &str) -> Result<ContentDocument, String> {
        let raw = fs::read_to_string(path)
            .map_err(|e| format!("failed to read {}: {}", path, e))?;
        let value: Value = serde_json::from_str(&raw)
            .map_err(|e| format!("failed to parse {}: {}", path, e))?;
        if !validate_shape(&value) {
            return Err(format!("{} is missing required sections", path));
        }
        serde_json::from_value(value).map_err(|e| format!("invalid content in {}: {}", path, e))
    }

    /// Load at boot. On failure the store starts empty and the error goes to
    /// the operator log; end users only ever see the loading placeholder.
    pub fn boot(path: &str) -> Self {
        match Self::load(path) {
            Ok(doc) => {
                info!(
                    "Loaded content from {}: {} marketplaces, {} categories, {} offers",
                    path,
                    doc.marketplaces.len(),
                    doc.categories.len(),
                    doc.offers.len()
                );
                lint(&doc);
                Self::with_document(doc)
            }
            Err(e) => {
                error!("Content load failed: {}", e);
                Self::empty()
            }
        }
    }

    pub fn snapshot(&self) -> Option<Arc<ContentDocument>> {
        self.current.read().ok().and_then(|g| g.clone())
    }

    /// Apply a typed edit, installing the new snapshot. Readers holding the
    /// previous `Arc` are unaffected.
    pub fn apply(&self, edit: ContentEdit) -> Result<(), String> {
        let mut guard = self
            .current
            .write()
            .map_err(|_| "content store lock poisoned".to_string())?;
        let doc = guard.as_ref().ok_or("no content loaded")?;
        *guard = Some(Arc::new(edit.apply(doc)));
        Ok(())
    }

    /// Pretty-printed document for the export download. Export has no other
    /// failure path: if a document is loaded, serializing it succeeds.
    pub fn export_json(&self) -> Option<String> {
        let doc = self.snapshot()?;
        serde_json::to_string_pretty(doc.as_ref()).ok()
    }
}

/// Surface the document's expected-but-unenforced invariants as operator
/// warnings. None of these block rendering: a dangling reference just
/// degrades to an empty filtered list.
pub fn lint(doc: &ContentDocument) {
    let marketplace_names: HashSet<&str> =
        doc.marketplaces.iter().map(|m| m.name.as_str()).collect();
    let category_names: HashSet<&str> = doc.categories.iter().map(|c| c.name.as_str()).collect();

    let mut slugs = HashSet::new();
    for cat in &doc.categories {
        if !slugs.insert(cat.slug.as_str()) {
            warn!("Duplicate category slug: {}", cat.slug);
        }
        if cat.slug != generate_slug(&cat.slug) {
            warn!("Category slug is not URL-safe: {:?}", cat.slug);
        }
    }

    let mut ids = HashSet::new();
    for offer in &doc.offers {
        if !ids.insert(offer.id) {
            warn!("Duplicate offer id: {}", offer.id);
        }
        if !marketplace_names.contains(offer.marketplace.as_str()) {
            warn!(
                "Offer {} references unknown marketplace {:?}",
                offer.id, offer.marketplace
            );
        }
        if !category_names.contains(offer.category.as_str()) {
            warn!(
                "Offer {} references unknown category {:?}",
                offer.id, offer.category
            );
        }
        if !is_valid_url(&offer.affiliate_url) {
            warn!("Offer {} has an invalid affiliate URL", offer.id);
        }
        let computed = pricing::discount_label(&offer.original_price, &offer.sale_price);
        if !offer.discount.is_empty() && offer.discount != computed {
            warn!(
                "Offer {} discount label {:?} does not match prices (computed {})",
                offer.id, offer.discount, computed
            );
        }
    }

    for mp in &doc.marketplaces {
        if !is_valid_url(&mp.affiliate_url) {
            warn!("Marketplace {:?} has an invalid affiliate URL", mp.name);
        }
    }
}
