use std::fmt::Write as _;

use curio_core::naming::to_kebab_case;
use curio_core::{Software, Tag};
use curio_store::ReferenceIndex;

use crate::{RenderError, Renderer};

const BACK_TO_TOP: &str = "**[`^        back to top        ^`](#)**";

/// Single markdown page: header, one `###` section per tag, footer.
///
/// Redirecting tags get no section. Each software item is listed once, under
/// the first tag of its `tags` list.
#[derive(Debug, Clone, Default)]
pub struct MarkdownSinglePage {
    header: Option<String>,
    footer: Option<String>,
}

impl MarkdownSinglePage {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_header(mut self, header: impl Into<String>) -> Self {
        self.header = Some(header.into());
        self
    }

    #[must_use]
    pub fn with_footer(mut self, footer: impl Into<String>) -> Self {
        self.footer = Some(footer.into());
        self
    }
}

impl Renderer for MarkdownSinglePage {
    fn render(&self, index: &ReferenceIndex<'_>) -> Result<String, RenderError> {
        let mut tags: Vec<&Tag> = index
            .catalog()
            .tags
            .iter()
            .map(curio_store::Record::entity)
            .filter(|tag| !tag.is_redirect())
            .collect();
        tags.sort_by(|a, b| a.name.cmp(&b.name));
        tags.dedup_by(|a, b| a.name == b.name);

        let mut out = String::new();
        if let Some(header) = &self.header {
            out.push_str(header.trim_end());
            out.push_str("\n\n");
        }
        for tag in &tags {
            render_section(&mut out, index, tag)?;
        }
        if let Some(footer) = &self.footer {
            out.push_str(footer.trim_end());
            out.push('\n');
        }

        let rendered: usize = tags
            .iter()
            .map(|tag| listed_under(index, tag).len())
            .sum();
        let total = index.catalog().software.len();
        if rendered < total {
            tracing::warn!(
                missing = total - rendered,
                "some software items have no renderable first tag"
            );
        }
        tracing::info!(sections = tags.len(), items = rendered, "rendered markdown page");
        Ok(out)
    }
}

/// Items whose first tag is `tag`, in catalog order.
fn listed_under<'a>(index: &ReferenceIndex<'a>, tag: &Tag) -> Vec<&'a Software> {
    index
        .software_tagged(&tag.name)
        .filter(|software| software.tags.first() == Some(&tag.name))
        .collect()
}

fn render_section(out: &mut String, index: &ReferenceIndex<'_>, tag: &Tag) -> Result<(), RenderError> {
    let _ = write!(out, "### {}\n\n{BACK_TO_TOP}\n\n", tag.name);
    if !tag.description.is_empty() {
        let _ = write!(out, "{}\n\n", tag.description.trim_end());
    }
    if !tag.delegate.is_empty() {
        let _ = write!(out, "**Please visit {}**\n\n", tag.delegate.join(", "));
    }
    if !tag.related_tags.is_empty() {
        let anchors: Vec<String> = tag
            .related_tags
            .iter()
            .map(|related| format!("[{related}](#{})", to_kebab_case(related)))
            .collect();
        let _ = write!(out, "_Related: {}_\n\n", anchors.join(", "));
    }
    if !tag.external_links.is_empty() {
        let _ = write!(out, "_See also: {}_\n\n", tag.external_links.join(", "));
    }
    for software in listed_under(index, tag) {
        out.push_str(&list_item(software)?);
        out.push('\n');
    }
    out.push('\n');
    Ok(())
}

fn list_item(software: &Software) -> Result<String, RenderError> {
    let main_url = software.main_url().ok_or_else(|| RenderError::MissingUrl {
        name: software.name.clone(),
    })?;

    let links: Vec<String> = [
        software.demo_url.as_deref().map(|url| format!("[Demo]({url})")),
        software
            .related_software_url
            .as_deref()
            .map(|url| format!("[Related software]({url})")),
        software
            .source_code_url
            .as_deref()
            .map(|url| format!("[Source Code]({url})")),
    ]
    .into_iter()
    .flatten()
    .collect();
    let links = if links.is_empty() {
        String::new()
    } else {
        format!(" ({})", links.join(", "))
    };
    let depends = if software.depends_3rdparty.unwrap_or(false) {
        "`⚠` "
    } else {
        ""
    };

    Ok(format!(
        "- [{}]({main_url}) {depends}- {}{links} `{}` `{}`",
        software.name,
        software.description,
        software.licenses.join("/"),
        software.platforms.join("/"),
    ))
}
