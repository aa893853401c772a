use crate::core::display::{display_author_name, human_friendly_date};
use crate::core::html::escape;
use crate::domain::model::{Book, Catalogue, RenderPass, RenderedBook};
use chrono::{DateTime, TimeZone};
use std::collections::BTreeSet;
use std::fmt::Write as _;

/// Builds the static page one section at a time.
pub struct PageBuilder {
    buf: String,
}

impl PageBuilder {
    pub fn new() -> Self {
        Self {
            buf: String::with_capacity(64 * 1024),
        }
    }

    pub fn start(&mut self, title: &str) {
        let _ = write!(
            self.buf,
            "<!doctype html><html lang=\"en\"><head><meta charset=\"utf-8\">\
             <meta name=\"viewport\" content=\"width=device-width,initial-scale=1\">\
             <title>{0}</title>\
             <link rel=\"stylesheet\" href=\"style.css\">\
             </head><body><h1>{0}</h1>",
            escape(title)
        );
    }

    pub fn generated_at(&mut self, when: &str) {
        let _ = write!(self.buf, "<p class=\"generated_at\">Last updated {}.</p>", escape(when));
    }

    /// One checkbox per branch; selected branches start checked.
    pub fn branch_picker(&mut self, branches: &BTreeSet<String>, pass: &RenderPass) {
        let _ = write!(
            self.buf,
            "<details id=\"branch_picker\"><summary>Nearby branches \
             <span id=\"selectedBranchCount\">{}</span></summary><ul>",
            escape(&pass.selected_branch_label)
        );
        for branch in branches {
            let checked = if pass.selection.contains(branch) { " checked" } else { "" };
            let _ = write!(
                self.buf,
                "<li><label><input type=\"checkbox\" value=\"{0}\"{1}> {0}</label></li>",
                escape(branch),
                checked
            );
        }
        self.buf.push_str("</ul></details>");
    }

    pub fn start_books(&mut self) {
        self.buf.push_str("<div id=\"books\">");
    }

    pub fn book(&mut self, book: &Book, rendered: &RenderedBook) {
        let class = if rendered.has_local_copies {
            "book"
        } else {
            "book no_local_copies"
        };

        let _ = write!(
            self.buf,
            "<div class=\"{}\" data-book-id=\"{}\" data-book-title=\"{}\" data-book-year=\"{}\">\
             <h2 class=\"title\">{}</h2>",
            class,
            escape(&book.id),
            escape(&book.title),
            escape(&book.year),
            escape(&book.title)
        );

        // 封面是相對於頁面的路徑，例如 covers/9781526622426.jpg
        if let Some(image) = book.image.as_deref().filter(|i| !i.trim().is_empty()) {
            let _ = write!(
                self.buf,
                "<img class=\"cover\" src=\"{}\" alt=\"Cover of {}\" loading=\"lazy\">",
                escape(image),
                escape(&book.title)
            );
        }

        let mut byline = Vec::new();
        if let Some(author) = book.author.as_deref().filter(|a| !a.trim().is_empty()) {
            byline.push(escape(&display_author_name(author)));
        }
        if !book.year.is_empty() {
            byline.push(escape(&book.year));
        }
        if let Some(format) = book.format() {
            byline.push(format.to_string());
        }
        if !byline.is_empty() {
            let _ = write!(self.buf, "<p class=\"byline\">{}</p>", byline.join(" &middot; "));
        }

        let _ = write!(
            self.buf,
            "<div class=\"availability\"><div class=\"summary\">{}</div><table>",
            rendered.summary_html
        );
        for (record, &flag) in book.availability.iter().zip(&rendered.row_flags) {
            let class = if flag { "" } else { " class=\"unavailable\"" };
            let _ = write!(
                self.buf,
                "<tr data-av-location=\"{0}\" data-av-status=\"{1}\"{2}>\
                 <td>{0}</td><td>{3}</td><td>{4}</td><td>{1}</td></tr>",
                escape(&record.location),
                escape(record.status.as_str()),
                class,
                escape(&record.collection),
                escape(&record.call_number)
            );
        }
        self.buf.push_str("</table></div></div>");
    }

    pub fn end_books(&mut self) {
        self.buf.push_str("</div>");
    }

    pub fn finish(mut self) -> String {
        self.buf.push_str("</body></html>");
        self.buf
    }
}

impl Default for PageBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// 依 render pass 的順序輸出整頁 HTML
pub fn render_page<Tz>(catalogue: &Catalogue, pass: &RenderPass, title: &str, now: DateTime<Tz>) -> String
where
    Tz: TimeZone,
    Tz::Offset: std::fmt::Display,
{
    let mut page = PageBuilder::new();
    page.start(title);

    if let Some(generated) = catalogue.generated_at_utc() {
        page.generated_at(&human_friendly_date(generated, now));
    }

    page.branch_picker(&catalogue.branches(), pass);

    page.start_books();
    for rendered in &pass.books {
        match catalogue.book(rendered) {
            Some(book) => page.book(book, rendered),
            None => tracing::warn!(
                "Rendered book {} (#{}) is not in the catalogue, skipping",
                rendered.id,
                rendered.position
            ),
        }
    }
    page.end_books();

    page.finish()
}
