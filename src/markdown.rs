//! Markdown rendering for assistant replies

use pulldown_cmark::{html, CowStr, Event, Options, Parser, Tag};

const SAFE_SCHEMES: &[&str] = &["http", "https", "mailto"];

/// Render Markdown to HTML. Raw HTML in the source is escaped, not passed
/// through, and link or image targets with any other scheme than
/// http(s)/mailto are replaced by `#`, since replies end up in `inner_html`.
pub fn render(source: &str) -> String {
    let options = Options::ENABLE_TABLES | Options::ENABLE_STRIKETHROUGH | Options::ENABLE_TASKLISTS;
    let parser = Parser::new_ext(source, options).map(|event| match event {
        Event::Html(raw) | Event::InlineHtml(raw) => Event::Text(raw),
        Event::Start(Tag::Link {
            link_type,
            dest_url,
            title,
            id,
        }) => Event::Start(Tag::Link {
            link_type,
            dest_url: sanitize_url(dest_url),
            title,
            id,
        }),
        Event::Start(Tag::Image {
            link_type,
            dest_url,
            title,
            id,
        }) => Event::Start(Tag::Image {
            link_type,
            dest_url: sanitize_url(dest_url),
            title,
            id,
        }),
        other => other,
    });

    let mut out = String::with_capacity(source.len() * 3 / 2);
    html::push_html(&mut out, parser);
    out
}

/// Keep relative targets and the allowed schemes; anything else becomes `#`
fn sanitize_url(url: CowStr<'_>) -> CowStr<'_> {
    // Browsers ignore whitespace and control characters inside a scheme
    let compact: String = url
        .chars()
        .filter(|c| !c.is_whitespace() && !c.is_control())
        .collect();

    let scheme = compact
        .split_once(':')
        .map(|(head, _)| head)
        .filter(|head| !head.contains(['/', '?', '#']));

    match scheme {
        None => url,
        Some(scheme) if SAFE_SCHEMES.iter().any(|s| s.eq_ignore_ascii_case(scheme)) => url,
        Some(scheme) => {
            tracing::warn!("Dropping link with scheme {:?} from reply", scheme);
            CowStr::Borrowed("#")
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn renders_code_blocks() {
        let out = render("```rust\nfn main() {}\n```");
        assert!(out.contains("<pre><code class=\"language-rust\">"));
        assert!(out.contains("fn main() {}"));
    }

    #[test]
    fn escapes_raw_html() {
        let out = render("hello <script>alert(1)</script>");
        assert!(!out.contains("<script>"));
        assert!(out.contains("&lt;script&gt;"));
    }

    #[test]
    fn renders_emphasis() {
        assert_eq!(render("**bold**"), "<p><strong>bold</strong></p>\n");
    }

    #[test]
    fn script_links_never_reach_href_or_src() {
        for source in [
            "[click](javascript:alert(document.cookie))",
            "[click](JavaScript:alert(1))",
            "<javascript:alert(1)>",
            "![img](javascript:alert(1))",
            "[data](data:text/html;base64,PHNjcmlwdD4=)",
        ] {
            let out = render(source).to_lowercase();
            for attr in ["href=\"javascript", "src=\"javascript", "href=\"data:"] {
                assert!(!out.contains(attr), "{}", out);
            }
        }
        assert_eq!(
            render("[click](javascript:alert(1))"),
            "<p><a href=\"#\">click</a></p>\n"
        );
    }

    #[test]
    fn ordinary_links_are_kept() {
        let out = render("[docs](https://example.com/a?b=1) [top](#top) [rel](/chats) [mail](mailto:a@b.c)");
        assert!(out.contains("href=\"https://example.com/a?b=1\""));
        assert!(out.contains("href=\"#top\""));
        assert!(out.contains("href=\"/chats\""));
        assert!(out.contains("href=\"mailto:a@b.c\""));
    }
}
