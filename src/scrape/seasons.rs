// src/scrape/seasons.rs
//
// Season page crawler. The page carries two sections: a grid of
// broadcast-slot cards (#acgs-anime-icons .acgs-card) holding the
// schedule attributes, and a listing (#acgs-anime-list) with the full
// show entries, cross-referenced by an id fragment. Everything here is
// best-effort: a card that cannot be resolved is skipped, never fatal.

use std::error::Error;

use crate::core::{net, HtmlDocument, HtmlElement};
use crate::core::sanitize::{normalize_entities, normalize_ws};
use crate::data::{weekday_index, AnimeRecord, Platform};
use crate::params::{self, CONTINUING_LABEL};

pub fn fetch_and_extract(year: u32, season: u32) -> Result<Vec<AnimeRecord>, Box<dyn Error>> {
    let url = params::season_url(year, season)
        .ok_or_else(|| format!("Invalid season month: {} (expected 1, 4, 7 or 10)", season))?;

    logf!("Scrape: GET {}", url);
    let html_doc = net::http_get(&url)?;

    let mut scraped = crawl_doc_with_links(&html_doc, year, season);
    logf!("Scrape: {} records from {}", scraped.len(), url);

    refine_episode_counts(&mut scraped);
    Ok(scraped.into_iter().map(|(rec, _)| rec).collect())
}

/// Extract all resolvable records from one season page.
pub fn crawl_doc(html_doc: &str, year: u32, season: u32) -> Vec<AnimeRecord> {
    crawl_doc_with_links(html_doc, year, season)
        .into_iter()
        .map(|(rec, _)| rec)
        .collect()
}

/// Like `crawl_doc`, but keeps each record's bgm.tv detail link (empty
/// when the entry has none) for episode-count refinement.
fn crawl_doc_with_links(html_doc: &str, year: u32, season: u32) -> Vec<(AnimeRecord, String)> {
    let doc = HtmlDocument::parse(html_doc);
    let mut out = Vec::new();

    for card in doc.get_elements_by_class_name("acgs-card") {
        let raw_id = card
            .get_attribute("acgs-bangumi-data-id")
            .or(card.id.as_deref())
            .unwrap_or("");
        if raw_id.is_empty() {
            logd!("Scrape: card without id, skipping");
            continue;
        }

        let date_today = card.get_attribute("datetoday").unwrap_or("");
        let weekday_label = card.get_attribute("weektoday").unwrap_or("");
        let start_date = card
            .get_attribute("onairtime")
            .and_then(|v| v.trim().parse::<i64>().ok())
            .unwrap_or(0);

        // The listing section keys entries by the fragment after the
        // first dash; retry with the whole id for older page layouts.
        let frag = id_fragment(raw_id);
        let mut entries = doc.get_elements_by_attribute("acgs-bangumi-anime-id", Some(frag));
        if entries.is_empty() && frag != raw_id {
            entries = doc.get_elements_by_attribute("acgs-bangumi-anime-id", Some(raw_id));
        }
        let Some(entry) = entries.first() else {
            logd!("Scrape: no listing entry for card {}", raw_id);
            continue;
        };

        let title = first_class_text(entry, "entity_localized_name");
        if title.is_empty() {
            continue;
        }
        let description = first_class_text(entry, "anime_story");

        let cover = entry
            .get_elements_by_class_name("anime_cover_image")
            .first()
            .and_then(|wrap| wrap.get_elements_by_tag_name("img").into_iter().next())
            .and_then(|img| img.get_attribute("src"))
            .unwrap_or("")
            .to_string();

        let link = entry
            .get_elements_by_class_name("bgmtv")
            .into_iter()
            .find(|el| el.tag_name == "a")
            .and_then(|a| a.get_attribute("href"))
            .unwrap_or("")
            .to_string();

        // Carry-overs from last season default to two cours.
        let episode = if date_today == CONTINUING_LABEL { 24 } else { 12 };

        out.push((
            AnimeRecord {
                id: s!(frag),
                title: title.clone(),
                description,
                weekday: weekday_index(weekday_label),
                start_date,
                platforms: extract_platforms(entry, &title),
                cover,
                year,
                season,
                episode,
            },
            link,
        ));
    }

    out
}

/// "card-42" → "42"; ids without a dash pass through unchanged.
fn id_fragment(raw_id: &str) -> &str {
    raw_id.split('-').nth(1).unwrap_or(raw_id)
}

/// Trimmed text of the first element carrying `class` under `el`.
fn first_class_text(el: &HtmlElement, class: &str) -> String {
    el.get_elements_by_class_name(class)
        .first()
        .map(|found| normalize_ws(&normalize_entities(&found.text())))
        .unwrap_or_default()
}

fn extract_platforms(entry: &HtmlElement, title: &str) -> Vec<Platform> {
    let mut out = Vec::new();

    for item in entry.get_elements_by_class_name("steam-site-item") {
        let name = first_class_text(item, "steam-site-name");
        if name.is_empty() {
            continue;
        }

        let site = item.get_elements_by_class_name("stream-site").into_iter().next();
        let mut href = site
            .and_then(|el| el.get_attribute("href"))
            .unwrap_or("")
            .to_string();
        let region = site
            .and_then(|el| el.get_attribute("site-area"))
            .unwrap_or("")
            .to_string();

        if href.is_empty() {
            href = fallback_search_url(&name, title).unwrap_or_default();
        }

        out.push(Platform { name, href, region });
    }

    out
}

/// Platforms the site lists without a direct link get a search URL.
fn fallback_search_url(site: &str, title: &str) -> Option<String> {
    match site {
        "巴哈姆特動畫瘋" => Some(join!("https://ani.gamer.com.tw/search.php?keyword=", title)),
        "愛奇藝" => Some(format!("https://www.iq.com/search?query={title}&originInput=")),
        "Netflix" => Some(format!("https://www.netflix.com/search?q={title}")),
        _ => None,
    }
}

/// Follow each record's bgm.tv link and read the announced episode
/// count from the infobox. Failures leave the seasonal default alone.
fn refine_episode_counts(scraped: &mut [(AnimeRecord, String)]) {
    for (rec, link) in scraped.iter_mut() {
        if link.is_empty() {
            continue;
        }
        match net::http_get(link) {
            Ok(page) => {
                if let Some(count) = episode_count_from_detail(&page) {
                    rec.episode = count;
                } else {
                    logd!("Scrape: no episode count on {}", link);
                }
            }
            Err(e) => logd!("Scrape: detail fetch failed {}: {}", link, e),
        }
    }
}

/// Detail pages carry `<ul id="infobox">...<li>话数: N</li>...</ul>`.
fn episode_count_from_detail(page: &str) -> Option<u32> {
    let doc = HtmlDocument::parse(page);
    let infobox = doc.get_element_by_id("infobox")?;
    infobox
        .get_elements_by_tag_name("li")
        .into_iter()
        .map(|li| li.text())
        .find(|text| text.contains("话数"))
        .and_then(|text| parse_episode_line(&text))
}

fn parse_episode_line(text: &str) -> Option<u32> {
    let (_, tail) = text.split_once([':', '：'])?;
    tail.trim().parse().ok()
}
