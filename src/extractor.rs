use scraper::{ElementRef, Html, Selector};
use std::collections::HashSet;
use log::warn;

use crate::error::ScrapeError;
use crate::json_ld;
use crate::record::{MovieRecord, RecordLayout};

const TITLE_META: &str = r#"meta[property="og:title"]"#;
const CAST_LINK: &str = r#"a[class="text-slug tooltip"]"#;
const DIRECTOR_LINK: &str = r#"a[href^="/director/"]"#;
const RATING_META: &str = r#"meta[name="twitter:data2"]"#;
const GENRE_LIST: &str = r#"div[class="text-sluglist capitalize"]"#;
const ANCHOR: &str = "a";
const JSON_LD_SCRIPT: &str = r#"script[type="application/ld+json"]"#;

pub const MAX_CAST: usize = 5;

pub struct Extractor {
    layout: RecordLayout,
    title_meta: Selector,
    cast_link: Selector,
    director_link: Selector,
    rating_meta: Selector,
    genre_list: Selector,
    anchor: Selector,
    json_ld_script: Selector,
}

fn selector(css: &str) -> Result<Selector, ScrapeError> {
    Selector::parse(css).map_err(|_| ScrapeError::Selector(css.to_string()))
}

impl Extractor {
    pub fn new(layout: RecordLayout) -> Result<Self, ScrapeError> {
        Ok(Extractor {
            layout,
            title_meta: selector(TITLE_META)?,
            cast_link: selector(CAST_LINK)?,
            director_link: selector(DIRECTOR_LINK)?,
            rating_meta: selector(RATING_META)?,
            genre_list: selector(GENRE_LIST)?,
            anchor: selector(ANCHOR)?,
            json_ld_script: selector(JSON_LD_SCRIPT)?,
        })
    }

    pub fn layout(&self) -> RecordLayout {
        self.layout
    }

    /// Decodes `body` lossily and extracts one record. `url` is only used in logs.
    /// Error pages and empty bodies give a record with empty fields.
    pub fn extract(&self, body: &[u8], url: &str) -> MovieRecord {
        let html = String::from_utf8_lossy(body);
        let document = Html::parse_document(&html);
        self.extract_document(&document, url)
    }

    pub fn extract_document(&self, document: &Html, url: &str) -> MovieRecord {
        let title_content = self.meta_content(document, &self.title_meta).unwrap_or_default();
        let (title, year) = split_title_year(&title_content);

        let cast = unique_texts(document.select(&self.cast_link))
            .into_iter()
            .take(MAX_CAST)
            .collect::<Vec<_>>()
            .join(", ");

        let director = unique_texts(document.select(&self.director_link)).join(", ");

        let rating = self.meta_content(document, &self.rating_meta).unwrap_or_default();

        let genres = document
            .select(&self.genre_list)
            .next()
            .map(|list| {
                list.select(&self.anchor)
                    .map(element_text)
                    .collect::<Vec<_>>()
                    .join(", ")
            })
            .unwrap_or_default();

        let total_rating_count = match self.layout {
            RecordLayout::WithRatingCount => Some(self.rating_count(document, url)),
            RecordLayout::WithoutRatingCount => None,
        };

        MovieRecord {
            title,
            year,
            cast,
            director,
            rating,
            genres,
            total_rating_count,
        }
    }

    fn meta_content(&self, document: &Html, selector: &Selector) -> Option<String> {
        document
            .select(selector)
            .next()
            .and_then(|meta| meta.value().attr("content"))
            .map(str::to_string)
    }

    /// Never fails: bad structured data only costs this one field.
    fn rating_count(&self, document: &Html, url: &str) -> String {
        let Some(script) = document.select(&self.json_ld_script).next() else {
            return String::new();
        };
        match json_ld::rating_count(&element_text(script)) {
            Ok(count) => count,
            Err(e) => {
                warn!("Error parsing JSON-LD for {}: {}", url, e);
                String::new()
            }
        }
    }
}

/// `"Title (Year)"` -> `("Title", "Year")`, split on the last `(`.
/// Anything without a trailing parenthetical is all title.
pub fn split_title_year(content: &str) -> (String, String) {
    if content.ends_with(')') {
        if let Some(idx) = content.rfind('(') {
            let title = content[..idx].trim().to_string();
            let year = content[idx + 1..].replace(')', "").trim().to_string();
            return (title, year);
        }
    }
    (content.to_string(), String::new())
}

fn element_text(element: ElementRef<'_>) -> String {
    element.text().collect()
}

/// Unique by visible text, first occurrence wins.
fn unique_texts<'a>(elements: impl Iterator<Item = ElementRef<'a>>) -> Vec<String> {
    let mut seen = HashSet::new();
    elements
        .map(element_text)
        .filter(|text| seen.insert(text.clone()))
        .collect()
}
