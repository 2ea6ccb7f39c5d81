//! Header: centered name, then one centered contact line.

use crate::layout::buffer::{DocumentBuffer, LayoutError, SectionKind};
use crate::layout::renderers::SectionRenderer;
use crate::layout::styles::{StylePreset, CONTACT_SEPARATOR};
use crate::models::resume::non_blank;
use crate::models::{Header, ResumeDocument};

pub struct HeaderRenderer;

impl SectionRenderer for HeaderRenderer {
    fn section(&self) -> SectionKind {
        SectionKind::Header
    }

    fn render(&self, buffer: &mut DocumentBuffer, resume: &ResumeDocument) -> Result<(), LayoutError> {
        render_header(buffer, &resume.header)
    }
}

/// One item of the contact line. `link` is set when the value renders as a hyperlink.
#[derive(Debug, Clone, PartialEq)]
pub struct ContactItem {
    pub text: String,
    pub link: Option<String>,
}

pub fn render_header(buffer: &mut DocumentBuffer, header: &Header) -> Result<(), LayoutError> {
    buffer
        .add_paragraph(SectionKind::Header, StylePreset::NameHeader.paragraph())
        .push_run(header.name.trim(), StylePreset::NameHeader)?;

    let items = contact_items(header);
    if items.is_empty() {
        return Ok(());
    }

    let line = buffer.add_paragraph(SectionKind::Header, StylePreset::ContactLine.paragraph());
    for (i, item) in items.iter().enumerate() {
        if i > 0 {
            line.push_run(CONTACT_SEPARATOR, StylePreset::ContactLine)?;
        }
        match &item.link {
            Some(url) => line.push_link(&item.text, url, StylePreset::Hyperlink)?,
            None => line.push_run(&item.text, StylePreset::ContactLine)?,
        }
    }
    Ok(())
}

/// Present contact fields in display order: email, phone, LinkedIn, GitHub, website.
pub fn contact_items(header: &Header) -> Vec<ContactItem> {
    let mut items = Vec::new();

    if let Some(email) = header.email.as_deref().and_then(non_blank) {
        let link = is_email(email).then(|| format!("mailto:{email}"));
        items.push(ContactItem {
            text: email.to_string(),
            link,
        });
    }

    if let Some(phone) = header.phone.as_deref().and_then(non_blank) {
        items.push(ContactItem {
            text: phone.to_string(),
            link: None,
        });
    }

    let labelled = [
        (header.linkedin.as_deref(), "LinkedIn"),
        (header.github.as_deref(), "Github"),
        (header.website.as_deref(), "Personal Website"),
    ];
    for (value, label) in labelled {
        let Some(value) = value.and_then(non_blank) else {
            continue;
        };
        items.push(match link_target(value) {
            Some(url) => ContactItem {
                text: label.to_string(),
                link: Some(url),
            },
            None => ContactItem {
                text: value.to_string(),
                link: None,
            },
        });
    }

    items
}

fn is_email(value: &str) -> bool {
    !value.contains(char::is_whitespace)
        && value
            .split_once('@')
            .map(|(local, domain)| !local.is_empty() && domain.contains('.'))
            .unwrap_or(false)
}

/// Resolves a URL-shaped value to a link target. Scheme-less domains get `https://`.
fn link_target(value: &str) -> Option<String> {
    if value.contains(char::is_whitespace) || value.contains('@') {
        return None;
    }
    let lower = value.to_ascii_lowercase();
    if lower.starts_with("https://") || lower.starts_with("http://") {
        return Some(value.to_string());
    }
    let host = value.split('/').next().unwrap_or_default();
    let looks_like_domain = host.contains('.') && !host.starts_with('.') && !host.ends_with('.');
    looks_like_domain.then(|| format!("https://{value}"))
}
