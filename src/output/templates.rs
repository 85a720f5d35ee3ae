// Template engine for the gallery page

use crate::error::Result;
use crate::gallery::Gallery;
use crate::output::html::{render_debug, render_groups};
use tera::{Context, Tera};

/// Built-in introduction shown above the gallery
pub const DEFAULT_INTRO: &str = include_str!("../../templates/intro.md");

const PAGE_TEMPLATE: &str = "gallery.md";

/// Template engine wrapping Tera with the embedded page template
pub struct TemplateEngine {
    tera: Tera,
}

impl TemplateEngine {
    /// Create a new template engine with embedded templates
    pub fn new() -> Result<Self> {
        let mut tera = Tera::default();
        tera.add_raw_template(PAGE_TEMPLATE, include_str!("../../templates/gallery.md.tera"))?;
        Ok(Self { tera })
    }

    /// Render the gallery page.
    ///
    /// `debug` appends a listing of every group's document ids.
    pub fn render_page(&self, gallery: &Gallery, intro: &str, debug: bool) -> Result<String> {
        let mut context = Context::new();
        context.insert("intro", intro);
        context.insert("groups", &render_groups(gallery));
        context.insert(
            "debug",
            &if debug { render_debug(gallery) } else { String::new() },
        );

        Ok(self.tera.render(PAGE_TEMPLATE, &context)?)
    }
}
