//! STAC document classification.
//!
//! Classification is a single explicit step returning a closed set of
//! variants. Handlers branch on the result instead of probing documents
//! for capabilities.

use serde_json::Value;

/// Outcome of classifying a fetched JSON document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Classified {
    /// A document whose role is to link to child catalogs/collections.
    Catalog,
    /// A document describing one dataset/series.
    Collection,
    /// Malformed or non-compliant STAC.
    Invalid,
}

/// The shape of a listing document, tried in order: an API response object
/// carrying its collections, a bare array, or a wrapped `collections`
/// property. The first shape that matches is used exclusively.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Listing<'a> {
    /// STAC API `/collections` response (`collections` array plus `links`).
    Api(&'a [Value]),
    /// The raw document is itself an array of collections.
    Array(&'a [Value]),
    /// An object with a `collections` array and nothing API-shaped about it.
    Wrapped(&'a [Value]),
}

impl<'a> Listing<'a> {
    /// The contained collection elements, whatever the shape.
    pub fn elements(&self) -> &'a [Value] {
        match *self {
            Listing::Api(items) | Listing::Array(items) | Listing::Wrapped(items) => items,
        }
    }
}

/// A link object from a STAC document, read leniently: any of the fields
/// may be missing or null without failing the surrounding document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Link {
    pub rel: Option<String>,
    pub href: Option<String>,
    pub title: Option<String>,
}

/// Classify a fetched document as catalog, collection, or invalid.
///
/// Recognizes the explicit `type` field of STAC >= 1.0 and falls back to
/// shape heuristics for older documents that predate it: a collection
/// carries `extent` and `license`, a catalog carries `links`.
pub fn classify(doc: &Value) -> Classified {
    let Some(obj) = doc.as_object() else {
        return Classified::Invalid;
    };

    match obj.get("type").and_then(Value::as_str) {
        Some("Catalog") => return Classified::Catalog,
        Some("Collection") => return Classified::Collection,
        Some(_) => return Classified::Invalid,
        None => {}
    }

    if !obj.contains_key("stac_version") {
        return Classified::Invalid;
    }
    if obj.contains_key("extent") && obj.contains_key("license") {
        return Classified::Collection;
    }
    if obj.get("links").map(Value::is_array).unwrap_or(false) {
        return Classified::Catalog;
    }
    Classified::Invalid
}

/// Detect the listing shape of a document, if it has one.
pub fn classify_listing(doc: &Value) -> Option<Listing<'_>> {
    if let Some(obj) = doc.as_object() {
        if let Some(items) = obj.get("collections").and_then(Value::as_array) {
            if obj.get("links").map(Value::is_array).unwrap_or(false) {
                return Some(Listing::Api(items));
            }
            return Some(Listing::Wrapped(items));
        }
        return None;
    }
    doc.as_array().map(|items| Listing::Array(items.as_slice()))
}

/// Lenient per-element check for listing entries.
///
/// Listing pages routinely carry abbreviated collection objects, so an
/// element passes when it is typed `Collection` or at least carries a
/// string `id`.
pub fn is_collection_like(element: &Value) -> bool {
    let Some(obj) = element.as_object() else {
        return false;
    };
    match obj.get("type").and_then(Value::as_str) {
        Some("Collection") => true,
        Some(_) => false,
        None => obj.get("id").map(Value::is_string).unwrap_or(false),
    }
}

/// All links on a document, read leniently.
pub fn links(doc: &Value) -> Vec<Link> {
    doc.get("links")
        .and_then(Value::as_array)
        .map(|raw| {
            raw.iter()
                .filter_map(Value::as_object)
                .map(|obj| Link {
                    rel: obj.get("rel").and_then(Value::as_str).map(str::to_owned),
                    href: obj.get("href").and_then(Value::as_str).map(str::to_owned),
                    title: obj.get("title").and_then(Value::as_str).map(str::to_owned),
                })
                .collect()
        })
        .unwrap_or_default()
}

/// Links a catalog uses to point at child catalogs and collections.
pub fn child_links(doc: &Value) -> Vec<Link> {
    links(doc)
        .into_iter()
        .filter(|link| link.rel.as_deref() == Some("child"))
        .collect()
}

/// The document's declared self link, when present.
pub fn self_link(doc: &Value) -> Option<&str> {
    doc.get("links")
        .and_then(Value::as_array)?
        .iter()
        .find(|link| link.get("rel").and_then(Value::as_str) == Some("self"))
        .and_then(|link| link.get("href"))
        .and_then(Value::as_str)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_classify_typed_documents() {
        assert_eq!(classify(&json!({"type": "Catalog"})), Classified::Catalog);
        assert_eq!(
            classify(&json!({"type": "Collection"})),
            Classified::Collection
        );
        assert_eq!(classify(&json!({"type": "Feature"})), Classified::Invalid);
        assert_eq!(classify(&json!([1, 2])), Classified::Invalid);
        assert_eq!(classify(&json!({"id": "x"})), Classified::Invalid);
    }

    #[test]
    fn test_classify_legacy_documents_by_shape() {
        let legacy_collection = json!({
            "stac_version": "0.9.0",
            "id": "c",
            "extent": {},
            "license": "CC-BY-4.0"
        });
        assert_eq!(classify(&legacy_collection), Classified::Collection);

        let legacy_catalog = json!({
            "stac_version": "0.9.0",
            "id": "cat",
            "links": []
        });
        assert_eq!(classify(&legacy_catalog), Classified::Catalog);
    }

    #[test]
    fn test_listing_shape_order() {
        let api = json!({"collections": [{"id": "a"}], "links": []});
        assert!(matches!(classify_listing(&api), Some(Listing::Api(_))));

        let wrapped = json!({"collections": [{"id": "a"}]});
        assert!(matches!(
            classify_listing(&wrapped),
            Some(Listing::Wrapped(_))
        ));

        let array = json!([{"id": "a"}]);
        assert!(matches!(classify_listing(&array), Some(Listing::Array(_))));

        assert!(classify_listing(&json!({"type": "Catalog"})).is_none());
        assert!(classify_listing(&json!("nope")).is_none());
    }

    #[test]
    fn test_is_collection_like() {
        assert!(is_collection_like(&json!({"id": "a"})));
        assert!(is_collection_like(&json!({"type": "Collection"})));
        assert!(!is_collection_like(&json!({"invalid": true})));
        assert!(!is_collection_like(&json!({"type": "Feature", "id": "a"})));
        assert!(!is_collection_like(&json!("a")));
    }

    #[test]
    fn test_child_links_keeps_null_hrefs() {
        let doc = json!({
            "links": [
                {"rel": "child", "href": "./a.json", "title": "A"},
                {"rel": "child", "href": null},
                {"rel": "self", "href": "./me.json"},
                {"rel": "item", "href": "./i.json"}
            ]
        });
        let children = child_links(&doc);
        assert_eq!(children.len(), 2);
        assert_eq!(children[0].href.as_deref(), Some("./a.json"));
        assert_eq!(children[1].href, None);
    }

    #[test]
    fn test_self_link() {
        let doc = json!({
            "links": [{"rel": "self", "href": "https://ex.com/cat.json"}]
        });
        assert_eq!(self_link(&doc), Some("https://ex.com/cat.json"));
        assert_eq!(self_link(&json!({})), None);
    }
}
