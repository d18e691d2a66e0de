//! HTML extraction for fakemailgenerator.com pages.
//!
//! Pure functions from raw markup to structured values. Nothing in this
//! module touches the network, so every function can be exercised against
//! canned fixtures.

use scraper::{ElementRef, Html, Selector};

/// One inbox list entry before its body frame has been fetched.
#[derive(Debug, Clone)]
pub(crate) struct InboxEntry {
    pub to: String,
    pub from: String,
    pub subject: String,
    pub received: String,
    pub expires: String,
    pub display_time: String,
    pub frame_src: String,
}

/// Compile a selector known to be valid at the call site.
///
/// # Panics
/// Panics on an invalid selector. Every call site passes a literal.
fn selector(css: &str) -> Selector {
    Selector::parse(css).expect("static selector")
}

/// Extract the domain suffixes offered on the front page, in page order.
///
/// Missing dropdown markup yields an empty list rather than an error; the
/// caller decides whether an empty catalog is fatal.
pub(crate) fn domain_list(html: &str) -> Vec<String> {
    let document = Html::parse_document(html);
    let links = selector("ul.dropdown-menu li a");

    document
        .select(&links)
        .map(|link| link.text().collect::<String>().trim().to_string())
        .filter(|text| !text.is_empty())
        .collect()
}

/// Extract inbox entries in page order.
///
/// Stops at the first entry without a frame reference and discards it along
/// with every entry after it. The site occasionally renders frameless
/// entries, and the remainder of the list is not trusted when it does.
pub(crate) fn inbox_entries(html: &str) -> Vec<InboxEntry> {
    let document = Html::parse_document(html);
    let items = selector("ul#email-list li");
    let iframe = selector("iframe");
    let time_region = selector(".col-xs-3.col-sm-2.col-md-2.col-lg-2 p");
    let labels = selector("dt");

    let mut entries = Vec::new();
    for item in document.select(&items) {
        let frame_src = match item
            .select(&iframe)
            .next()
            .and_then(|frame| frame.value().attr("src"))
        {
            Some(src) => src.to_string(),
            None => break,
        };

        let display_time = item
            .select(&time_region)
            .next()
            .map(|p| p.text().collect::<String>().trim().to_string())
            .unwrap_or_default();

        entries.push(InboxEntry {
            to: labeled_value(item, &labels, "To:"),
            from: labeled_value(item, &labels, "From:"),
            subject: labeled_value(item, &labels, "Subject:"),
            received: labeled_value(item, &labels, "Received:"),
            expires: labeled_value(item, &labels, "Expires:"),
            display_time,
            frame_src,
        });
    }
    entries
}

/// Visible text of a message body frame, trimmed.
pub(crate) fn frame_body(html: &str) -> String {
    let document = Html::parse_document(html);
    let body = selector("body");

    document
        .select(&body)
        .next()
        .map(|el| el.text().collect::<String>().trim().to_string())
        .unwrap_or_default()
}

/// Text of the `dd` element immediately following the `dt` whose text equals
/// `label` exactly. A malformed or absent pair yields an empty string; one
/// bad field never fails the whole entry.
fn labeled_value(item: ElementRef<'_>, labels: &Selector, label: &str) -> String {
    for candidate in item.select(labels) {
        if candidate.text().collect::<String>() != label {
            continue;
        }
        let value = candidate
            .next_siblings()
            .filter_map(ElementRef::wrap)
            .next()
            .filter(|el| el.value().name() == "dd")
            .map(|el| el.text().collect::<String>());
        if let Some(value) = value {
            return value.trim().to_string();
        }
    }
    String::new()
}

#[cfg(test)]
mod tests {
    use super::*;

    const FRONT_PAGE: &str = r##"
        <html><body>
          <ul class="dropdown-menu">
            <li><a href="#">@test1.com</a></li>
            <li><a href="#">@test2.com</a></li>
          </ul>
        </body></html>
    "##;

    fn entry(subject: &str, frame_src: Option<&str>) -> String {
        let iframe = frame_src
            .map(|src| format!(r#"<iframe src="{src}"></iframe>"#))
            .unwrap_or_default();
        format!(
            r#"<li>
                 <div class="col-xs-3 col-sm-2 col-md-2 col-lg-2"><p> 2 minutes ago </p></div>
                 <dl>
                   <dt>To:</dt><dd> alice@test1.com </dd>
                   <dt>From:</dt><dd>bob@example.com</dd>
                   <dt>Subject:</dt><dd>{subject}</dd>
                   <dt>Received:</dt><dd>2024-01-01 10:00:00</dd>
                   <dt>Expires:</dt><dd>2024-01-01 12:00:00</dd>
                 </dl>
                 {iframe}
               </li>"#
        )
    }

    fn inbox_page(entries: &[String]) -> String {
        format!(
            r#"<html><body><ul id="email-list">{}</ul></body></html>"#,
            entries.join("\n")
        )
    }

    #[test]
    fn domain_list_extracts_dropdown_entries_in_order() {
        let domains = domain_list(FRONT_PAGE);
        assert_eq!(domains, vec!["@test1.com", "@test2.com"]);
    }

    #[test]
    fn domain_list_is_empty_when_dropdown_is_missing() {
        assert!(domain_list("<html><body><p>maintenance</p></body></html>").is_empty());
    }

    #[test]
    fn inbox_entries_extracts_labeled_fields_trimmed() {
        let page = inbox_page(&[entry("Hello", Some("/email/test1.com/alice/1"))]);
        let entries = inbox_entries(&page);

        assert_eq!(entries.len(), 1);
        let first = &entries[0];
        assert_eq!(first.to, "alice@test1.com");
        assert_eq!(first.from, "bob@example.com");
        assert_eq!(first.subject, "Hello");
        assert_eq!(first.received, "2024-01-01 10:00:00");
        assert_eq!(first.expires, "2024-01-01 12:00:00");
        assert_eq!(first.display_time, "2 minutes ago");
        assert_eq!(first.frame_src, "/email/test1.com/alice/1");
    }

    #[test]
    fn label_match_is_exact_not_substring() {
        let page = inbox_page(&[r#"<li>
                 <dl><dt>Not-To:</dt><dd>wrong</dd><dt>To:</dt><dd>right</dd></dl>
                 <iframe src="/f"></iframe>
               </li>"#
            .to_string()]);
        let entries = inbox_entries(&page);
        assert_eq!(entries[0].to, "right");
    }

    #[test]
    fn missing_frame_reference_truncates_the_rest_of_the_pass() {
        let page = inbox_page(&[
            entry("first", Some("/f/1")),
            entry("second", None),
            entry("third", Some("/f/3")),
        ]);
        let entries = inbox_entries(&page);

        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].subject, "first");
    }

    #[test]
    fn frame_body_collects_visible_text_trimmed() {
        let body = frame_body("<html><body>\n  <p>Your code is 1234</p>\n</body></html>");
        assert_eq!(body, "Your code is 1234");
    }
}
