// Integration tests for the pangea gallery and search tools

use pangea::{
    Aggregator, CategoryMap, Error, Fetch, Gallery, SearchIndex, SiteConfig, SiteKind,
    TemplateEngine, Thumbnails,
};
use std::collections::HashMap;
use std::path::PathBuf;

fn fixtures_path(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(name)
}

fn build_gallery() -> Gallery {
    let site = fixtures_path("site");
    let json = std::fs::read_to_string(site.join("minisearch.json")).expect("Failed to read index");
    let index = SearchIndex::from_json(&json).expect("Failed to parse index");
    let categories =
        CategoryMap::load(&site.join("index.json")).expect("Failed to load categories");
    Gallery::build(&index, &categories, &Thumbnails::new(site.join("src")))
        .expect("Failed to build gallery")
}

// ============================================================================
// Gallery Tests
// ============================================================================

#[test]
fn test_gallery_groups_in_definition_order() {
    let gallery = build_gallery();
    let words: Vec<_> = gallery.groups().iter().map(|g| g.word.as_str()).collect();
    // "maps" is not an indexed term, so it has no group.
    assert_eq!(words, vec!["featured", "plot", "d3", "more"]);
}

#[test]
fn test_gallery_shows_each_document_once() {
    let gallery = build_gallery();
    let shown: Vec<Vec<&str>> = gallery
        .visible_groups()
        .iter()
        .map(|v| v.documents.iter().map(|d| d.id.as_str()).collect())
        .collect();
    assert_eq!(
        shown,
        vec![
            vec!["/d3/force", "/plot/dot"],
            vec!["/plot/line"],
            vec!["/d3/tree"],
            vec!["/about"],
        ]
    );
}

#[test]
fn test_gallery_page_markup() {
    let gallery = build_gallery();
    let engine = TemplateEngine::new().expect("Failed to create template engine");
    let page = engine.render_page(&gallery, "# Test", false).expect("Render failed");

    assert!(page.contains(
        "## Featured\n\n<div class=\"list\">\n\
         <a href=\"/d3/force\"><q>Force graph</q></a>\n\
         <a href=\"/plot/dot\"><picture>\
         <source srcset=\"../thumbnail/plot/dot-dark.png\" media=\"(prefers-color-scheme: dark)\">\
         <img src=\"../thumbnail/plot/dot-light.png\" loading=\"lazy\">\
         </picture><q>Dot plot</q></a>\n</div>"
    ));
    assert!(page.contains(
        "## Observable Plot\n\n\n\n\
         Charts made with [Plot](https://observablehq.com/plot/).\n\n\
         <div class=\"list\">\n<a href=\"/plot/line\"><q>Line &amp; area</q></a>\n</div>"
    ));
    assert!(page.contains(
        "<a href=\"/d3/tree\">\
         <img src=\"../thumbnail/d3/tree-light.png\" loading=\"lazy\"><q>Tree</q></a>"
    ));
    assert!(page.contains(
        "## More examples\n\n<div class=\"list\">\n<a href=\"/about\"><q>About</q></a>\n</div>"
    ));
    assert!(!page.contains("## Maps"));
}

#[test]
fn test_gallery_markup_is_balanced() {
    let gallery = build_gallery();
    let engine = TemplateEngine::new().expect("Failed to create template engine");
    let page = engine.render_page(&gallery, "", true).expect("Render failed");

    for tag in ["a", "q", "div", "picture", "style"] {
        let opened = page.matches(&format!("<{tag}>")).count()
            + page.matches(&format!("<{tag} ")).count();
        let closed = page.matches(&format!("</{tag}>")).count();
        assert_eq!(opened, closed, "unbalanced <{tag}>");
    }
}

#[test]
fn test_gallery_unknown_page() {
    let site = fixtures_path("site");
    let json = std::fs::read_to_string(site.join("minisearch.json")).unwrap();
    let index = SearchIndex::from_json(&json).unwrap();
    let categories = CategoryMap::from_json(
        r#"{"sections": [["featured", {"title": "Featured", "pages": ["/plot/missing"]}]]}"#,
    )
    .unwrap();

    let err = Gallery::build(&index, &categories, &Thumbnails::new(site.join("src"))).unwrap_err();
    assert!(matches!(err, Error::UnknownPage(ref id) if id == "/plot/missing"));
}

// ============================================================================
// Search Aggregation Tests
// ============================================================================

struct StaticSite(HashMap<String, String>);

impl StaticSite {
    fn new(pages: &[(&str, &str)]) -> Self {
        Self(
            pages
                .iter()
                .map(|(url, body)| (url.to_string(), body.to_string()))
                .collect(),
        )
    }
}

impl Fetch for StaticSite {
    fn fetch_text(&self, url: &str) -> pangea::Result<String> {
        self.0
            .get(url)
            .cloned()
            .ok_or_else(|| Error::Http {
                url: url.to_string(),
                status: 404,
            })
    }
}

#[test]
fn test_search_combines_framework_and_vitepress() {
    let pangea_index = std::fs::read_to_string(fixtures_path("site/minisearch.json")).unwrap();

    let site = StaticSite::new(&[
        (
            "https://pangea.example/_observablehq/search.js",
            "fetch(import.meta.resolve(\"./minisearch.0f1e2d3c.json\"))",
        ),
        ("https://pangea.example/_observablehq/minisearch.0f1e2d3c.json", pangea_index.as_str()),
        ("https://plot.example/plot/", "<script src=\"/plot/assets/chunks/theme.Qa1.js\">"),
        (
            "https://plot.example/plot/assets/chunks/theme.Qa1.js",
            "import(\"./VPLocalSearchBox.Zz9.js\")",
        ),
        (
            "https://plot.example/plot/assets/chunks/VPLocalSearchBox.Zz9.js",
            "root:()=>import(\"./@localSearchIndexroot.Ab3.js\")",
        ),
        (
            "https://plot.example/plot/assets/chunks/@localSearchIndexroot.Ab3.js",
            "const n=`{\"documentCount\":1,\"documentIds\":{\"0\":\"/plot/marks/dot\"}}`;\
             export{n as default};",
        ),
    ]);

    let sites = vec![
        SiteConfig::new("pangea", SiteKind::Framework, "https://pangea.example/", None),
        SiteConfig::new(
            "plot",
            SiteKind::Vitepress,
            "https://plot.example/plot/",
            Some("https://plot.example"),
        ),
    ];

    let combined = Aggregator::new(&site).collect(&sites).expect("Aggregation failed");
    assert_eq!(combined.len(), 2);
    assert_eq!(combined["pangea"].source, "https://pangea.example/");
    assert_eq!(combined["pangea"].index["documentCount"], 5);
    assert_eq!(combined["plot"].source, "https://plot.example");
    assert_eq!(combined["plot"].index["documentIds"]["0"], "/plot/marks/dot");

    // The Framework index is itself a valid gallery index.
    let reparsed = SearchIndex::from_json(&combined["pangea"].index.to_string()).unwrap();
    assert_eq!(reparsed.len(), 5);
}
