//! 印刷用グリッドHTML
//!
//! A4一枚に収まる5列のグリッド。タイトルが空なら見出しは出さない。

use circle_grid_common::{GridLayout, WorksheetDraft, GRID_COLUMNS};

const STYLE: &str = r#"
  @page { size: A4; margin: 12mm; }
  * { box-sizing: border-box; }
  body { margin: 0; font-family: "Noto Sans TC", "PingFang TC", "Microsoft JhengHei", sans-serif; color: #000; background: #fff; }
  main { padding: 24px; }
  h1 { text-align: center; font-size: 32px; font-weight: 700; margin: 0 0 24px; }
  .grid { display: grid; gap: 16px; width: 100%; }
  .cell { display: flex; align-items: center; justify-content: center; padding: 12px; }
  .cell span { font-size: 26px; font-weight: 500; text-align: center; word-break: keep-all; }
  @media print {
    main { padding: 0; }
    h1 { font-size: 28px; margin-bottom: 18px; }
    .grid { gap: 10px; }
    .cell span { font-size: 22px; }
  }
"#;

pub fn render_grid_html(draft: &WorksheetDraft) -> String {
    let layout = GridLayout::from_draft(draft);

    let mut html = String::new();
    html.push_str("<!DOCTYPE html>\n<html lang=\"zh-Hant\">\n<head>\n<meta charset=\"utf-8\">\n");
    html.push_str(&format!(
        "<title>{}</title>\n",
        escape_html(layout.heading.as_deref().unwrap_or("Circle Game"))
    ));
    html.push_str(&format!("<style>{}</style>\n</head>\n<body>\n<main>\n", STYLE));

    if let Some(heading) = &layout.heading {
        html.push_str(&format!("<h1>{}</h1>\n", escape_html(heading)));
    }

    html.push_str(&format!(
        "<div class=\"grid\" style=\"grid-template-columns: repeat({}, minmax(0, 1fr));\">\n",
        GRID_COLUMNS
    ));
    for word in layout.cells() {
        html.push_str(&format!(
            "  <div class=\"cell\"><span>{}</span></div>\n",
            escape_html(word)
        ));
    }
    html.push_str("</div>\n</main>\n</body>\n</html>\n");
    html
}

fn escape_html(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_with_title() {
        let draft = WorksheetDraft::new("動物篇", vec!["狗".into(), "貓".into()]);
        let html = render_grid_html(&draft);
        assert!(html.contains("<h1>動物篇</h1>"));
        assert!(html.contains("repeat(5, minmax(0, 1fr))"));
        let dog = html.find("<span>狗</span>").unwrap();
        let cat = html.find("<span>貓</span>").unwrap();
        assert!(dog < cat);
    }

    #[test]
    fn test_render_without_title() {
        let draft = WorksheetDraft::new("", vec!["狗".into()]);
        let html = render_grid_html(&draft);
        assert!(!html.contains("<h1>"));
        assert_eq!(html.matches("class=\"cell\"").count(), 1);
    }

    #[test]
    fn test_escape() {
        let draft = WorksheetDraft::new("<b>", vec!["a&b".into()]);
        let html = render_grid_html(&draft);
        assert!(html.contains("<h1>&lt;b&gt;</h1>"));
        assert!(html.contains("<span>a&amp;b</span>"));
    }
}
