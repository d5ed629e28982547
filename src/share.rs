//! Shareable summary of a ranking.

use crate::core::StateScore;
use crate::dataset::Dataset;
use crate::scoring::match_percentages;
use anyhow::Result;
use reqwest::Url;

/// States named in the share text.
pub const SHARE_COUNT: usize = 3;

pub const SHARE_HEADLINE: &str = "I found my perfect states on StateMatch!";

pub fn share_text(results: &[StateScore], dataset: &Dataset, site_url: &str) -> String {
    let percents = match_percentages(results);
    let mut text = format!("🏡 {SHARE_HEADLINE}\n\n");

    for (i, (score, percent)) in results.iter().zip(percents).take(SHARE_COUNT).enumerate() {
        let name = dataset
            .state(&score.state)
            .map(|s| s.state_name.as_str())
            .unwrap_or(&score.state);
        text.push_str(&format!("#{} {name} - {percent}% match\n", i + 1));
    }

    text.push_str(&format!("\nFind your perfect state at {site_url}"));
    text
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShareLinks {
    pub twitter: Url,
    pub facebook: Url,
    pub linkedin: Url,
}

pub fn share_links(text: &str, site_url: &str) -> Result<ShareLinks> {
    Ok(ShareLinks {
        twitter: Url::parse_with_params(
            "https://twitter.com/intent/tweet",
            &[("text", text), ("url", site_url)],
        )?,
        facebook: Url::parse_with_params(
            "https://www.facebook.com/sharer/sharer.php",
            &[("u", site_url), ("quote", text)],
        )?,
        linkedin: Url::parse_with_params(
            "https://www.linkedin.com/sharing/share-offsite/",
            &[("url", site_url)],
        )?,
    })
}

/// Text placed on the clipboard by `share --copy`.
pub fn clipboard_text(text: &str, site_url: &str) -> String {
    format!("{text}\n\n{site_url}")
}

/// Copy text to the system clipboard and return a status message.
///
/// Never fails: an unavailable clipboard (SSH, headless) is reported in the
/// message instead.
pub fn copy_to_clipboard(text: &str) -> String {
    match arboard::Clipboard::new() {
        Ok(mut clipboard) => match clipboard.set_text(text) {
            Ok(()) => "Copied share text to clipboard".to_string(),
            Err(e) => format!("Clipboard error: {e}"),
        },
        Err(e) => format!("Clipboard not available: {e}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn scores() -> Vec<StateScore> {
        [
            ("CO", "Denver", 20),
            ("WA", "Seattle", 15),
            ("OR", "Portland", 10),
            ("UT", "Salt Lake City", 5),
        ]
        .into_iter()
        .map(|(state, city, score)| StateScore {
            state: state.into(),
            city: city.into(),
            score,
        })
        .collect()
    }

    #[test]
    fn share_text_lists_top_three_with_percentages() {
        let dataset = Dataset::bundled().unwrap();
        let text = share_text(&scores(), &dataset, "https://statematch.example");

        assert_eq!(
            text,
            "🏡 I found my perfect states on StateMatch!\n\n\
             #1 Colorado - 100% match\n\
             #2 Washington - 75% match\n\
             #3 Oregon - 50% match\n\
             \nFind your perfect state at https://statematch.example"
        );
    }

    #[test]
    fn links_percent_encode_the_text() {
        let links = share_links("#1 Colorado - 100% match", "https://statematch.example").unwrap();

        assert_eq!(links.twitter.host_str(), Some("twitter.com"));
        let query = links.twitter.query().unwrap();
        assert!(query.contains("%231+Colorado"));
        assert!(query.contains("100%25"));
        assert!(query.contains("url=https%3A%2F%2Fstatematch.example"));
        assert!(links
            .facebook
            .as_str()
            .starts_with("https://www.facebook.com/sharer/sharer.php?u="));
        assert_eq!(
            links.linkedin.as_str(),
            "https://www.linkedin.com/sharing/share-offsite/?url=https%3A%2F%2Fstatematch.example"
        );
    }

    #[test]
    fn copy_never_panics() {
        let message = copy_to_clipboard("test");
        assert!(message.contains("Copied") || message.contains("Clipboard"));
    }
}
