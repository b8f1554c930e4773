//! Minimal HTML builder used by the view modules.
//!
//! Elements are written through closures so nesting in the source mirrors
//! nesting in the document. Text and attribute values are always escaped;
//! only `raw` writes markup verbatim, and it is reserved for static strings
//! (inline scripts) owned by the views.

#[derive(Debug, Default)]
pub struct Html {
    buf: String,
}

impl Html {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn doctype(&mut self) {
        self.buf.push_str("<!DOCTYPE html>");
    }

    pub fn text(&mut self, text: &str) {
        push_escaped(&mut self.buf, text);
    }

    pub fn raw(&mut self, markup: &'static str) {
        self.buf.push_str(markup);
    }

    pub fn el(&mut self, tag: &str, attrs: &[(&str, &str)], body: impl FnOnce(&mut Html)) {
        self.open(tag, attrs);
        body(self);
        self.buf.push_str("</");
        self.buf.push_str(tag);
        self.buf.push('>');
    }

    /// Element whose only child is escaped text.
    pub fn el_text(&mut self, tag: &str, attrs: &[(&str, &str)], text: &str) {
        self.el(tag, attrs, |h| h.text(text));
    }

    /// Void element (`<meta>`, `<input>`): no body, no closing tag.
    pub fn void(&mut self, tag: &str, attrs: &[(&str, &str)]) {
        self.open(tag, attrs);
    }

    pub fn link_to(&mut self, label: &str, href: &str) {
        self.el_text("a", &[("href", href)], label);
    }

    pub fn into_string(self) -> String {
        self.buf
    }

    fn open(&mut self, tag: &str, attrs: &[(&str, &str)]) {
        self.buf.push('<');
        self.buf.push_str(tag);
        for (name, value) in attrs {
            self.buf.push(' ');
            self.buf.push_str(name);
            self.buf.push_str("=\"");
            push_escaped(&mut self.buf, value);
            self.buf.push('"');
        }
        self.buf.push('>');
    }
}

fn push_escaped(buf: &mut String, text: &str) {
    for c in text.chars() {
        match c {
            '&' => buf.push_str("&amp;"),
            '<' => buf.push_str("&lt;"),
            '>' => buf.push_str("&gt;"),
            '"' => buf.push_str("&quot;"),
            '\'' => buf.push_str("&#39;"),
            _ => buf.push(c),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn nests_elements_and_escapes_text() {
        let mut h = Html::new();
        h.el("div", &[("class", "post")], |h| {
            h.el_text("h1", &[], "<script>alert('x')</script>");
            h.link_to("back", "/posts?a=1&b=2");
        });

        assert_eq!(
            h.into_string(),
            "<div class=\"post\"><h1>&lt;script&gt;alert(&#39;x&#39;)&lt;/script&gt;</h1>\
             <a href=\"/posts?a=1&amp;b=2\">back</a></div>"
        );
    }

    #[test]
    fn attribute_values_cannot_break_out_of_quotes() {
        let mut h = Html::new();
        h.void("input", &[("value", "\" onfocus=\"evil()")]);

        assert_eq!(
            h.into_string(),
            "<input value=\"&quot; onfocus=&quot;evil()\">"
        );
    }
}
