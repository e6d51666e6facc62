//! Title and body extraction for article pages.
//!
//! The default strategies target the tagDiv "Newspaper" WordPress theme, whose
//! markup differs between classic posts and page-builder posts:
//!
//! | Part | Classic post | Page-builder post |
//! |------|--------------|-------------------|
//! | Title | `h1.entry-title` | `h1.tdb-title-text` |
//! | Body | `div.td-post-content.tagdiv-type` | 15th `div.tdb-block-inner.td-fix-index` |
//!
//! Strategies are tried in order and the first selector that matches wins.
//! A page where nothing matches still yields an article: the placeholder
//! title and an empty body.

use crate::config::{ContentSelector, ExtractionConfig};
use crate::error::ConfigError;
use crate::models::ExtractedArticle;
use scraper::{ElementRef, Html, Selector};
use tracing::{debug, warn};

#[derive(Debug)]
struct ContentRule {
    selector: Selector,
    index: usize,
}

/// Compiled extraction strategies.
#[derive(Debug)]
pub struct PageExtractor {
    title_selectors: Vec<Selector>,
    placeholder_title: String,
    content_rules: Vec<ContentRule>,
}

fn parse_selector(selector: &str) -> Result<Selector, ConfigError> {
    Selector::parse(selector).map_err(|e| ConfigError::Selector {
        selector: selector.to_string(),
        message: e.to_string(),
    })
}

impl PageExtractor {
    /// Compile the configured selectors; an invalid selector is a configuration error.
    pub fn from_config(config: &ExtractionConfig) -> Result<Self, ConfigError> {
        let title_selectors = config
            .title_selectors
            .iter()
            .map(|s| parse_selector(s))
            .collect::<Result<Vec<_>, _>>()?;
        let content_rules = config
            .content_selectors
            .iter()
            .map(|ContentSelector { selector, index }| {
                Ok(ContentRule {
                    selector: parse_selector(selector)?,
                    index: index.unwrap_or(0),
                })
            })
            .collect::<Result<Vec<_>, ConfigError>>()?;

        Ok(Self {
            title_selectors,
            placeholder_title: config.placeholder_title.clone(),
            content_rules,
        })
    }

    /// Pull the title and body out of an HTML page.
    pub fn extract(&self, url: &str, html: &str) -> ExtractedArticle {
        let document = Html::parse_document(html);

        let title = self.title(&document).unwrap_or_else(|| {
            warn!(%url, "No title strategy matched; using placeholder");
            self.placeholder_title.clone()
        });
        let content = self.content(&document).unwrap_or_else(|| {
            warn!(%url, "No content strategy matched; using empty content");
            String::new()
        });

        debug!(%url, %title, bytes = content.len(), "Extracted article");
        ExtractedArticle { title, content }
    }

    /// Article with the placeholder title and no content.
    pub fn placeholder(&self) -> ExtractedArticle {
        ExtractedArticle {
            title: self.placeholder_title.clone(),
            content: String::new(),
        }
    }

    fn title(&self, document: &Html) -> Option<String> {
        self.title_selectors
            .iter()
            .find_map(|selector| document.select(selector).next())
            .map(|element| element_text(element).trim().to_string())
    }

    fn content(&self, document: &Html) -> Option<String> {
        self.content_rules
            .iter()
            .find_map(|rule| document.select(&rule.selector).nth(rule.index))
            .map(element_text)
    }
}

/// Concatenation of every descendant text node.
fn element_text(element: ElementRef<'_>) -> String {
    element.text().collect()
}
