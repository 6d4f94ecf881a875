use poster_parser::{parse_fragment, Element, Node};
use poster_sanitizer::{sanitize, sanitize_with_report};
use proptest::prelude::*;

const HOSTILE: &[&str] = &[
    "<script>alert(1)</script><p>ok</p>",
    "<SCRIPT SRC=//evil.example/x.js></SCRIPT>",
    "<img src=x onerror=alert(1)>",
    "<img src=\"x\" ONERROR=\"alert(1)\">",
    "<a href=\"java&#x09;script:alert(1)\">x</a>",
    "<a href=\" javascript:alert(1)\">x</a>",
    "<a href=\"&#106;avascript:alert(1)\">x</a>",
    "<iframe src=\"https://example.com\"></iframe>after",
    "<svg><script>alert(1)</script></svg>",
    "<math><mi xlink:href=\"javascript:alert(1)\">x</mi></math>",
    "<div style=\"width: expression(alert(1))\">x</div>",
    "<style>body { background: url(javascript:alert(1)) }</style>",
    "<object data=\"x.swf\"></object><embed src=\"x.swf\">",
    "<form action=\"/steal\"><input name=pw><button formaction=\"javascript:x\">go</button></form>",
    "<p>unterminated <b>bold <i>italic",
    "<<p>>text</p><",
    "<div <img src=x onerror=alert(1)>>",
    "<!--<script>alert(1)</script>--><p>x</p>",
    "<noscript><p title=\"</noscript><img src=x onerror=alert(1)>\"></noscript>",
    "<textarea><script>alert(1)</script></textarea>",
    "<title><img src=x onerror=alert(1)></title>",
    "<template><script>alert(1)</script></template>",
    "<meta http-equiv=\"refresh\" content=\"0;url=javascript:alert(1)\">",
    "<base href=\"javascript:alert(1)//\">",
    "<custom-el onclick=\"x\"><span>kept</span></custom-el>",
    "<img src=\"data:text/html;base64,PHNjcmlwdD4=\">",
    "<a href=\"data:image/png;base64,AAAA\">x</a>",
];

fn assert_safe(nodes: &[Node]) {
    for node in nodes {
        if let Node::Element(element) = node {
            assert_safe_element(element);
        }
    }
}

fn assert_safe_element(element: &Element) {
    assert!(
        !matches!(
            element.tag.as_str(),
            "script" | "iframe" | "object" | "embed" | "svg" | "math" | "template" | "base" | "meta"
        ),
        "forbidden element <{}> survived",
        element.tag
    );
    for attr in &element.attributes {
        assert!(!attr.name.starts_with("on"), "handler {} survived", attr.name);
        let value = attr.value.to_ascii_lowercase();
        assert!(!value.contains("javascript:"), "script url survived in {}", attr.name);
    }
    if element.tag == "style" {
        assert!(!element.text_content().contains("javascript:"));
    }
    for child in element.child_elements() {
        assert_safe_element(child);
    }
}

#[test]
fn test_hostile_inputs_are_neutralized() {
    for input in HOSTILE {
        let output = sanitize(input);
        assert_safe(&parse_fragment(&output));
    }
}

#[test]
fn test_sanitize_is_idempotent() {
    for input in HOSTILE {
        let once = sanitize(input);
        let twice = sanitize(&once);
        assert_eq!(once, twice, "not idempotent for {:?}", input);
    }
}

/// Markup shards that recombine into nested, broken and hostile HTML
const SHARDS: &[&str] = &[
    "<p>", "</p>", "<div class=\"a\" style=\"top: 1px\">", "</div>", "<b>", "</i>", "<br/>",
    "<img src=x onerror=alert(1)>", "<a href=\"javascript:x\">", "<script>", "</script>",
    "<style>", "</style>", "</STYLE", "<textarea>", "</textarea>", "<title>", "<!--", "-->",
    "<!doctype html>", "<html>", "<body>", "<svg>", "<custom-el>", "<", ">", "/", "=", "\"",
    "'", "&amp;", "&lt;", "&#60;", "&nbsp;", "&bogus", " ", "\n", "text", "expression(",
    "data-id=\"el-1\"", "contenteditable=true",
];

fn markup() -> impl Strategy<Value = String> {
    prop_oneof![
        prop::collection::vec(prop::sample::select(SHARDS), 0..32).prop_map(|parts| parts.concat()),
        "\\PC{0,64}",
    ]
}

proptest! {
    #[test]
    fn test_sanitize_is_idempotent_for_generated_markup(input in markup()) {
        let once = sanitize(&input);
        prop_assert_eq!(sanitize(&once), once, "input {:?}", input);
    }

    #[test]
    fn test_generated_markup_is_neutralized(input in markup()) {
        assert_safe(&parse_fragment(&sanitize(&input)));
    }
}

#[test]
fn test_poster_markup_survives_unchanged() {
    let poster = r#"<div class="poster" data-id="el-1" style="position: relative; width: 720px; height: 720px"><h1 data-id="el-2" contenteditable="false" style="position: absolute; top: 80px; left: 40px">Summer Sale</h1><p data-id="el-3" data-editable="true">Up to <strong>50% off</strong> on select items!</p><img data-id="el-4" src="https://images.unsplash.com/photo-1?w=800" alt="Product"></div>"#;

    assert_eq!(sanitize(poster), poster);
}

#[test]
fn test_style_tag_preserved() {
    let input = "<style>.poster { font-family: 'Inter', sans-serif; }</style><div class=\"poster\"></div>";
    assert_eq!(sanitize(input), input);
}

#[test]
fn test_unknown_elements_are_unwrapped() {
    assert_eq!(
        sanitize("<custom-el onclick=\"x\"><span>kept</span></custom-el>"),
        "<span>kept</span>"
    );
}

#[test]
fn test_malformed_input_never_panics() {
    let inputs = ["", "<", "</", "<!", "<!--", "<a href=", "<a href='", "&#xFFFFFFFF;", "<\u{0}>"];
    for input in inputs {
        let _ = sanitize(input);
    }
}

#[test]
fn test_report_serializes() {
    let report = sanitize_with_report("<img src=x onerror=alert(1)>");
    let json = serde_json::to_value(&report.removals).unwrap();

    assert_eq!(json[0]["rule"], "event-handlers");
    assert_eq!(json[0]["tag"], "img");
    assert_eq!(json[0]["attribute"], "onerror");
}
