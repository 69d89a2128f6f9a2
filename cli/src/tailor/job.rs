//! Job listing retrieval and HTML to text extraction.

use super::TailorError;
use kuchikiki::iter::NodeIterator;
use kuchikiki::traits::TendrilSink;
use reqwest::header::USER_AGENT;
use reqwest::Client;

/// Desktop browser user agent; many job boards reject unknown clients.
pub const BROWSER_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) \
     AppleWebKit/537.36 (KHTML, like Gecko) Chrome/90.0.4430.93 Safari/537.36";

/// Fetch a job listing page and return its visible text.
pub async fn fetch_job_details(client: &Client, url: &str) -> Result<String, TailorError> {
    log::debug!("fetching {}", url);
    let response = client.get(url).header(USER_AGENT, BROWSER_USER_AGENT).send().await?;

    let status = response.status();
    if status.as_u16() != 200 {
        return Err(TailorError::Fetch {
            url: url.to_string(),
            status: status.as_u16(),
        });
    }

    let html = response.text().await?;
    log::debug!("fetched {} bytes of HTML", html.len());
    Ok(html_to_text(&html))
}

/// Extract visible text from an HTML page.
///
/// Scripts and styles are dropped and every text node starts a new line.
/// Lines are trimmed and empty lines removed.
pub fn html_to_text(html: &str) -> String {
    let document = kuchikiki::parse_html().one(html);
    for hidden in ["script", "style"] {
        while let Ok(node) = document.select_first(hidden) {
            node.as_node().detach();
        }
    }

    let text = document
        .descendants()
        .text_nodes()
        .map(|node| node.borrow().clone())
        .collect::<Vec<_>>()
        .join("\n");

    text.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .collect::<Vec<_>>()
        .join("\n")
}
