//! Shared page layout.
//!
//! Every page goes through `render`: head, the confirmation dialog partial,
//! and the page body inside `<main>`.

use crate::views::html::Html;

pub const APP_TITLE: &str = "Single File Rust App";

// Forms carrying `data-confirm` are held back until the dialog returns "confirm".
const CONFIRM_SCRIPT: &str = r#"<script>
document.addEventListener("submit", function (event) {
  var form = event.target;
  var message = form.getAttribute("data-confirm");
  if (!message || form.dataset.confirmed === "true") return;
  event.preventDefault();
  var dialog = document.getElementById("confirm-dialog");
  dialog.querySelector("[data-confirm-message]").textContent = message;
  dialog.addEventListener("close", function () {
    if (dialog.returnValue === "confirm") {
      form.dataset.confirmed = "true";
      form.requestSubmit();
    }
  }, { once: true });
  dialog.showModal();
});
</script>"#;

pub fn render(content: impl FnOnce(&mut Html)) -> String {
    let mut h = Html::new();
    h.doctype();
    h.el("html", &[], |h| {
        h.el("head", &[], |h| {
            h.el_text("title", &[], APP_TITLE);
            h.void("meta", &[("charset", "utf-8")]);
            h.void(
                "meta",
                &[
                    ("name", "viewport"),
                    ("content", "width=device-width,initial-scale=1"),
                ],
            );
        });
        h.el("body", &[], |h| {
            confirm_dialog(h);
            h.el("main", &[], content);
        });
    });
    h.into_string()
}

fn confirm_dialog(h: &mut Html) {
    h.el("dialog", &[("id", "confirm-dialog")], |h| {
        h.el("form", &[("method", "dialog")], |h| {
            h.el("p", &[("data-confirm-message", "")], |_| {});
            h.el_text("button", &[("value", "cancel")], "cancel");
            h.el_text("button", &[("value", "confirm")], "ok");
        });
    });
    h.raw(CONFIRM_SCRIPT);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wraps_content_in_main_with_shared_head() {
        let page = render(|h| h.el_text("h1", &[], "Posts"));

        assert!(page.starts_with("<!DOCTYPE html><html><head><title>Single File Rust App</title>"));
        assert!(page.contains("name=\"viewport\""));
        assert!(page.contains("<dialog id=\"confirm-dialog\">"));
        assert!(page.contains("<main><h1>Posts</h1></main>"));
        assert!(page.ends_with("</body></html>"));
    }
}
