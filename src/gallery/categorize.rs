// Bucketing documents into gallery categories

use crate::categories::{Category, CategoryMap, CATCH_ALL};
use crate::error::{Error, Result};
use crate::gallery::{Document, Group};
use crate::minisearch::SearchIndex;
use std::collections::{BTreeMap, HashMap, HashSet};

/// Index fields searched for a category word, in priority order
pub const MATCH_FIELDS: [&str; 2] = ["title", "keywords"];

/// Title of the catch-all group when the definitions don't name one
pub const CATCH_ALL_TITLE: &str = "More";

/// Build one group per category, in definition order.
///
/// Categories with `pages` take exactly those documents; the others take the
/// documents indexed under their word. A keyword category whose word is not
/// in the index produces no group. The catch-all group holds every document.
pub fn categorize(
    categories: &CategoryMap,
    index: &SearchIndex,
    documents: &BTreeMap<u32, Document>,
) -> Result<Vec<Group>> {
    let by_id: HashMap<&str, u32> = documents
        .iter()
        .map(|(&short_id, doc)| (doc.id.as_str(), short_id))
        .collect();
    let everything = || documents.keys().copied().collect::<Vec<_>>();

    let mut groups = Vec::with_capacity(categories.len() + 1);
    let mut has_catch_all = false;

    for (word, category) in categories.iter() {
        let listed = match &category.pages {
            Some(pages) => Some(resolve_pages(pages, &by_id)?),
            None => None,
        };

        if word == CATCH_ALL {
            groups.push(group(word, category, everything()));
            has_catch_all = true;
            continue;
        }

        let members = match listed {
            Some(ids) => ids,
            None => match index.term_documents(word, &MATCH_FIELDS) {
                Some(ids) => ids
                    .into_iter()
                    .filter(|id| documents.contains_key(id))
                    .collect(),
                None => {
                    tracing::debug!(word, "category word not indexed, skipping");
                    continue;
                }
            },
        };

        tracing::debug!(word, count = members.len(), "category");
        groups.push(group(word, category, members));
    }

    if !has_catch_all {
        groups.push(Group {
            word: CATCH_ALL.to_string(),
            title: CATCH_ALL_TITLE.to_string(),
            description: None,
            members: everything(),
        });
    }

    Ok(groups)
}

/// Short ids of explicitly listed pages; every page must be indexed
fn resolve_pages(pages: &[String], by_id: &HashMap<&str, u32>) -> Result<Vec<u32>> {
    pages
        .iter()
        .map(|page| {
            by_id
                .get(page.as_str())
                .copied()
                .ok_or_else(|| Error::UnknownPage(page.clone()))
        })
        .collect()
}

fn group(word: &str, category: &Category, members: Vec<u32>) -> Group {
    let mut seen = HashSet::new();
    Group {
        word: word.to_string(),
        title: category.title.clone(),
        description: category.description.clone(),
        members: members.into_iter().filter(|id| seen.insert(*id)).collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const INDEX: &str = r#"{
        "documentIds": {"0": "/plot/dot", "1": "/d3/tree", "2": "/plot/line", "3": "/intro"},
        "fieldIds": {"title": 0, "text": 1, "keywords": 2},
        "storedFields": {
            "0": {"title": "Dot"}, "1": {"title": "Tree"},
            "2": {"title": "Line"}, "3": {"title": "Intro"}
        },
        "index": [
            ["plot", {"0": {"0": 1}, "2": {"2": 1}}],
            ["tree", {"0": {"1": 1}}],
            ["hidden", {"1": {"3": 1}}]
        ]
    }"#;

    fn documents(index: &SearchIndex) -> BTreeMap<u32, Document> {
        index
            .documents()
            .map(|d| {
                (
                    d.short_id,
                    Document {
                        id: d.id.to_string(),
                        title: d.title.unwrap_or(d.id).to_string(),
                        light: None,
                        dark: None,
                    },
                )
            })
            .collect()
    }

    fn run(sections: &str) -> Result<Vec<Group>> {
        let index = SearchIndex::from_json(INDEX).unwrap();
        let categories = CategoryMap::from_json(sections).unwrap();
        categorize(&categories, &index, &documents(&index))
    }

    #[test]
    fn test_keyword_category() {
        let groups = run(r#"{"sections": [["plot", {"title": "Plot"}]]}"#).unwrap();
        assert_eq!(groups[0].word, "plot");
        assert_eq!(groups[0].members, vec![0, 2]);
    }

    #[test]
    fn test_keyword_only_in_other_field_matches_nothing() {
        let groups = run(r#"{"sections": [["hidden", {"title": "Hidden"}]]}"#).unwrap();
        assert_eq!(groups[0].word, "hidden");
        assert!(groups[0].members.is_empty());
    }

    #[test]
    fn test_unindexed_word_has_no_group() {
        let groups = run(r#"{"sections": [["maps", {"title": "Maps"}]]}"#).unwrap();
        let words: Vec<_> = groups.iter().map(|g| g.word.as_str()).collect();
        assert_eq!(words, vec!["more"]);
    }

    #[test]
    fn test_explicit_pages_keep_list_order() {
        let groups = run(
            r#"{"sections": [
                ["featured", {"title": "Featured", "pages": ["/intro", "/plot/dot", "/intro"]}]
            ]}"#,
        )
        .unwrap();
        assert_eq!(groups[0].members, vec![3, 0]);
    }

    #[test]
    fn test_unknown_page_is_fatal() {
        let err = run(r#"{"sections": [["featured", {"title": "F", "pages": ["/nope"]}]]}"#)
            .unwrap_err();
        assert_eq!(err.to_string(), "Couldn't find /nope");
    }

    #[test]
    fn test_unknown_page_in_catch_all_is_fatal() {
        let err = run(r#"{"sections": [["more", {"title": "More", "pages": ["/nope"]}]]}"#)
            .unwrap_err();
        assert!(matches!(err, Error::UnknownPage(ref id) if id == "/nope"));
    }

    #[test]
    fn test_catch_all_with_pages_still_takes_everything() {
        let groups = run(r#"{"sections": [["more", {"title": "More", "pages": ["/d3/tree"]}]]}"#)
            .unwrap();
        assert_eq!(groups.len(), 1);
        assert_eq!(groups[0].members, vec![0, 1, 2, 3]);
    }

    #[test]
    fn test_catch_all_appended_last() {
        let groups = run(r#"{"sections": [["tree", {"title": "Trees"}]]}"#).unwrap();
        let last = groups.last().unwrap();
        assert_eq!(last.word, CATCH_ALL);
        assert_eq!(last.title, CATCH_ALL_TITLE);
        assert_eq!(last.members, vec![0, 1, 2, 3]);
    }

    #[test]
    fn test_catch_all_keeps_defined_position() {
        let groups = run(
            r#"{"sections": [
                ["more", {"title": "Everything", "description": "All pages."}],
                ["tree", {"title": "Trees"}]
            ]}"#,
        )
        .unwrap();
        assert_eq!(groups.len(), 2);
        assert_eq!(groups[0].title, "Everything");
        assert_eq!(groups[0].description.as_deref(), Some("All pages."));
        assert_eq!(groups[0].members.len(), 4);
        assert_eq!(groups[1].word, "tree");
    }
}
