// Thumbnail lookup
//
// Pages may ship a light and a dark screenshot under
// `<site_src>/thumbnail<page id>-{light,dark}.png`.

use std::path::PathBuf;

/// Thumbnail hrefs found for one page
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Thumbnail {
    pub light: Option<String>,
    pub dark: Option<String>,
}

/// Finds thumbnails in the site source directory
#[derive(Debug, Clone)]
pub struct Thumbnails {
    site_src: PathBuf,
}

impl Thumbnails {
    pub fn new(site_src: impl Into<PathBuf>) -> Self {
        Self {
            site_src: site_src.into(),
        }
    }

    /// Look up both variants for a page id such as `/plot/dot`
    pub fn lookup(&self, id: &str) -> Thumbnail {
        Thumbnail {
            light: self.variant(id, "light"),
            dark: self.variant(id, "dark"),
        }
    }

    fn variant(&self, id: &str, scheme: &str) -> Option<String> {
        let relative = format!("thumbnail{id}-{scheme}.png");
        if self.site_src.join(&relative).is_file() {
            Some(format!("../{relative}"))
        } else {
            None
        }
    }
}
