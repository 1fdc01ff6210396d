//! Server-side HTML rendering.
//!
//! Every page is rendered in full on each request: sidebar menu, page content, and for disease
//! pages the form with the current widget values echoed back. User-provided text is escaped
//! before it is interpolated.

use medpredict_core::{fields, Diagnosis, Disease, FormField, InputKind, Page};
use std::collections::HashMap;

/// Escapes text for interpolation into HTML element content and quoted attributes.
pub fn escape(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for c in input.chars() {
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

fn style(background_url: &str) -> String {
    format!(
        r#"<style>
    body {{
        margin: 0;
        display: flex;
        min-height: 100vh;
        background-image: url("{background}");
        background-size: cover;
        background-position: center;
        background-repeat: no-repeat;
        background-attachment: fixed;
        color: #222;
        font-family: "Segoe UI", sans-serif;
    }}

    h1, h2, h3, h4, h5, h6, p, label {{
        color: #111 !important;
    }}

    nav.sidebar {{
        width: 240px;
        padding: 1.5rem 1rem;
        background: rgba(240, 242, 246, 0.95);
    }}
    nav.sidebar h2 {{ font-size: 1.1rem; }}
    nav.sidebar a {{
        display: block;
        padding: 0.5rem 0.75rem;
        margin-bottom: 0.25rem;
        border-radius: 8px;
        color: #222;
        text-decoration: none;
    }}
    nav.sidebar a.active {{
        background-color: #ff4b4b;
        color: white;
    }}

    main {{
        flex: 1;
        max-width: 730px;
        margin: 0 auto;
        padding: 2rem 1.5rem;
    }}

    .field {{ margin-bottom: 1rem; }}
    .field label {{ display: block; margin-bottom: 0.25rem; }}
    .field input[type=number], .field select {{ width: 100%; padding: 0.4rem; }}
    .field input[type=range] {{ width: 85%; }}

    .help {{
        position: relative;
        cursor: help;
        margin-left: 0.25rem;
        color: #666;
    }}
    .help:hover::after {{
        content: attr(data-tip);
        position: absolute;
        left: 1.2rem;
        top: -0.2rem;
        width: 260px;
        padding: 0.4rem 0.6rem;
        border-radius: 6px;
        background: #333;
        color: white;
        font-size: 0.85rem;
        z-index: 1;
    }}

    button {{
        background-color: #4CAF50;
        color: white;
        border: none;
        padding: 0.5rem 1rem;
        border-radius: 8px;
        cursor: pointer;
    }}

    .banner {{
        margin-top: 1rem;
        padding: 0.75rem 1rem;
        border-radius: 8px;
    }}
    .banner.positive {{ background: rgba(33, 195, 84, 0.15); color: #177233; }}
    .banner.negative {{ background: rgba(33, 150, 243, 0.15); color: #0b4f8a; }}
    .banner.error {{ background: rgba(255, 43, 43, 0.12); color: #7d1a1a; }}

    .about {{
        background-color: rgba(255, 255, 255, 0.1);
        padding: 20px;
        border-radius: 15px;
    }}
    </style>"#,
        background = escape(background_url)
    )
}

fn sidebar(active: Page) -> String {
    let mut out = String::from("<nav class=\"sidebar\"><h2>Main Menu</h2>");
    for page in Page::ALL {
        let class = if page == active { " class=\"active\"" } else { "" };
        out.push_str(&format!(
            "<a href=\"{}\"{}><i class=\"bi bi-{}\"></i> {}</a>",
            page.path(),
            class,
            page.icon(),
            escape(page.menu_title())
        ));
    }
    out.push_str("</nav>");
    out
}

/// Wraps page content in the document shell with the sidebar menu.
pub fn layout(active: Page, background_url: &str, content: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<meta name="viewport" content="width=device-width, initial-scale=1">
<title>Disease Prediction System</title>
<link rel="stylesheet" href="https://cdn.jsdelivr.net/npm/bootstrap-icons@1.11.3/font/bootstrap-icons.min.css">
{style}
</head>
<body>
{sidebar}
<main>
{content}
</main>
</body>
</html>
"#,
        style = style(background_url),
        sidebar = sidebar(active),
    )
}

pub fn home_content() -> String {
    let diseases: String = Disease::ALL
        .iter()
        .map(|d| {
            let name = match d {
                Disease::Diabetes => "Diabetes",
                Disease::HeartDisease => "Heart Disease",
                Disease::Parkinsons => "Parkinson's Disease",
                Disease::LungCancer => "Lung Cancer",
            };
            format!("<li>{}</li>", escape(name))
        })
        .collect();

    format!(
        r#"<h1>⚕️ Welcome to Disease Prediction System</h1>
<div class="about">
    <h3>📌 About</h3>
    <p>This AI-powered system helps in the early detection of multiple diseases using machine learning models trained on real medical data.</p>
    <p>✅ Diseases Covered:</p>
    <ul>{diseases}</ul>
    <h3>🩺 How to Use</h3>
    <ol>
        <li>Select a disease from the sidebar.</li>
        <li>Enter your medical details.</li>
        <li>Click the prediction button to see the result.</li>
    </ol>
    <p style="margin-top:20px;">⚠️ <b>Disclaimer:</b> This tool is for probabilistic predictions of initial consultation only and not a substitute for professional medical advice.</p>
</div>"#
    )
}

/// Outcome shown under the submit button.
#[derive(Debug, Clone, Copy)]
pub enum Banner<'a> {
    Diagnosis(&'a Diagnosis),
    Error(&'a str),
}

impl Banner<'_> {
    fn render(&self) -> String {
        let (class, text) = match self {
            Banner::Diagnosis(d) if d.is_positive() => ("positive", d.message),
            Banner::Diagnosis(d) => ("negative", d.message),
            Banner::Error(msg) => ("error", *msg),
        };
        format!(
            "<div class=\"banner {class}\" role=\"status\">{}</div>",
            escape(text)
        )
    }
}

fn label(field: &FormField) -> String {
    let help = if field.help.is_empty() {
        String::new()
    } else {
        format!(
            "<span class=\"help\" data-tip=\"{}\" title=\"{}\">ⓘ</span>",
            escape(field.help),
            escape(field.help)
        )
    };
    format!(
        "<label for=\"{}\">{}{}</label>",
        field.key,
        escape(field.label),
        help
    )
}

fn widget(field: &FormField, raw: Option<&str>) -> String {
    let current = field.coerce(raw).unwrap_or(field.default);
    // A rejected value is echoed as typed so the user can correct it.
    let value = match raw {
        Some(raw) if field.coerce(Some(raw)).is_err() => raw.to_string(),
        _ => field.display(current),
    };

    match field.kind {
        InputKind::FreeNumber { range, step } => {
            let bounds = range
                .map(|(min, max)| format!(" min=\"{min}\" max=\"{max}\""))
                .unwrap_or_default();
            format!(
                "<input type=\"number\" id=\"{key}\" name=\"{key}\" step=\"{step}\"{bounds} value=\"{value}\">",
                key = field.key,
                value = escape(&value)
            )
        }
        InputKind::IntegerSlider { min, max } => format!(
            "<input type=\"range\" id=\"{key}\" name=\"{key}\" min=\"{min}\" max=\"{max}\" step=\"1\" value=\"{value}\" oninput=\"this.nextElementSibling.value = this.value\"> <output>{value}</output>",
            key = field.key,
            value = escape(&value)
        ),
        InputKind::SingleSelect { options } => {
            let mut out = format!("<select id=\"{key}\" name=\"{key}\">", key = field.key);
            for option in options {
                let selected = if option.code == current { " selected" } else { "" };
                out.push_str(&format!(
                    "<option value=\"{label}\"{selected}>{label}</option>",
                    label = escape(option.label)
                ));
            }
            out.push_str("</select>");
            out
        }
        InputKind::Checkbox => {
            let checked = if current != 0.0 { " checked" } else { "" };
            format!(
                "<input type=\"checkbox\" id=\"{key}\" name=\"{key}\" value=\"on\"{checked}>",
                key = field.key
            )
        }
    }
}

fn field_row(field: &FormField, raw: Option<&str>) -> String {
    // Checkboxes read better with the box before the label.
    match field.kind {
        InputKind::Checkbox => format!(
            "<div class=\"field\">{}{}</div>",
            widget(field, raw),
            label(field)
        ),
        _ => format!(
            "<div class=\"field\">{}{}</div>",
            label(field),
            widget(field, raw)
        ),
    }
}

/// Renders a disease form with `submission` as the current widget values.
pub fn form_content(
    disease: Disease,
    submission: &HashMap<String, String>,
    banner: Option<Banner<'_>>,
) -> String {
    let mut out = format!(
        "<h1>{}</h1>\n<p>{}</p>\n<form method=\"post\" action=\"{}\">\n",
        escape(disease.page_title()),
        escape(disease.intro()),
        Page::Disease(disease).path()
    );
    for field in fields(disease) {
        let raw = submission.get(field.key).map(String::as_str);
        out.push_str(&field_row(field, raw));
        out.push('\n');
    }
    out.push_str(&format!(
        "<button type=\"submit\">{}</button>\n</form>\n",
        escape(disease.submit_caption())
    ));
    if let Some(banner) = banner {
        out.push_str(&banner.render());
    }
    out
}

/// Generic failure page for errors the user cannot correct.
pub fn failure_content() -> String {
    "<h1>Something went wrong</h1>\n<div class=\"banner error\" role=\"alert\">The prediction could not be completed. Please try again later.</div>".to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use medpredict_core::{FormValues, Label};

    #[test]
    fn test_escape_handles_markup_characters() {
        assert_eq!(
            escape(r#"<a href="x">Tom & Jerry's</a>"#),
            "&lt;a href=&quot;x&quot;&gt;Tom &amp; Jerry&#39;s&lt;/a&gt;"
        );
    }

    #[test]
    fn test_layout_marks_active_page() {
        let page = layout(Page::Disease(Disease::Parkinsons), "bg.jpg", "");
        assert!(page.contains("<a href=\"/parkinsons\" class=\"active\">"));
        assert!(page.contains("<a href=\"/\"><i class=\"bi bi-house\"></i> Home</a>"));
        assert!(page.contains("url(\"bg.jpg\")"));
    }

    #[test]
    fn test_form_renders_every_field_and_button() {
        let defaults = FormValues::defaults(Disease::LungCancer).to_submission();
        let html = form_content(Disease::LungCancer, &defaults, None);
        for field in fields(Disease::LungCancer) {
            assert!(html.contains(&format!("name=\"{}\"", field.key)), "{}", field.key);
        }
        assert!(html.contains("Lung Cancer Test Result"));
        assert!(html.contains("type=\"range\" id=\"age\" name=\"age\" min=\"1\" max=\"100\""));
        assert!(!html.contains(" checked"));
        assert!(!html.contains("banner"));
    }

    #[test]
    fn test_select_echoes_submitted_option() {
        let mut submission = HashMap::new();
        submission.insert("sex".to_string(), "Male".to_string());
        let html = form_content(Disease::HeartDisease, &submission, None);
        assert!(html.contains("<option value=\"Male\" selected>Male</option>"));
        assert!(html.contains("<option value=\"Female\">Female</option>"));
    }

    #[test]
    fn test_rejected_number_is_echoed_as_typed() {
        let mut submission = HashMap::new();
        submission.insert("Glucose".to_string(), "abc".to_string());
        let html = form_content(
            Disease::Diabetes,
            &submission,
            Some(Banner::Error("Glucose Level must be a number")),
        );
        assert!(html.contains("name=\"Glucose\" step=\"1\" value=\"abc\""));
        assert!(html.contains("banner error"));
    }

    #[test]
    fn test_banner_class_follows_label() {
        let negative = Diagnosis::from_label(Disease::Parkinsons, Label::Negative);
        let html = Banner::Diagnosis(&negative).render();
        assert!(html.contains("banner negative"));
        assert!(html.contains("Parkinson&#39;s Disease"));
    }
}
