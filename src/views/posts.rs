/*
 * Responsibility
 * - posts の HTML view (index / form / show)
 * - layout::render に content closure を渡して 1 ページにする
 */
use crate::repos::post_repo::PostRow;
use crate::services::{posts::PostDraft, validation::ValidationErrors};
use crate::views::{html::Html, layout};

// Copies the editor textarea into the hidden `post[content]` input before the form posts.
const RICH_TEXT_SCRIPT: &str = r#"<script>
document.addEventListener("submit", function (event) {
  var editor = event.target.querySelector("[data-rich-text-editor]");
  if (!editor) return;
  var field = document.getElementById(editor.getAttribute("data-target"));
  if (field) field.value = editor.value;
});
</script>"#;

pub fn posts_path() -> String {
    "/posts".to_string()
}

pub fn new_post_path() -> String {
    "/posts/new".to_string()
}

pub fn post_path(id: i64) -> String {
    format!("/posts/{id}")
}

pub fn edit_post_path(id: i64) -> String {
    format!("/posts/{id}/edit")
}

pub fn index(title: &str, posts: &[PostRow]) -> String {
    layout::render(|h| {
        h.el_text("h1", &[], title);
        h.el("div", &[], |h| h.link_to("new", &new_post_path()));
        h.el("ul", &[], |h| {
            for post in posts {
                h.el("li", &[], |h| h.link_to(&post.title, &post_path(post.id)));
            }
        });
    })
}

pub struct FormOptions {
    pub rich_text_editor: bool,
}

pub fn form(post: &PostDraft, errors: &ValidationErrors, options: &FormOptions) -> String {
    layout::render(|h| {
        let (heading, action, submit) = match post.id {
            None => ("New Post".to_string(), posts_path(), "Create Post"),
            Some(id) => (format!("Edit Post #{id}"), post_path(id), "Update Post"),
        };

        h.el_text("h1", &[], &heading);

        if !errors.is_empty() {
            error_explanation(h, errors);
        }

        h.el("div", &[], |h| {
            h.el(
                "form",
                &[("action", action.as_str()), ("method", "post"), ("accept-charset", "UTF-8")],
                |h| {
                    if !post.is_new() {
                        h.void("input", &[("type", "hidden"), ("name", "_method"), ("value", "patch")]);
                    }

                    h.el("div", &[], |h| {
                        h.el_text("label", &[("for", "post_title")], "Title");
                        h.void(
                            "input",
                            &[
                                ("type", "text"),
                                ("id", "post_title"),
                                ("name", "post[title]"),
                                ("value", post.title.as_str()),
                            ],
                        );
                        field_errors(h, errors, "title");
                    });

                    h.el("div", &[], |h| {
                        h.el_text("label", &[("for", "post_content")], "Content");
                        if options.rich_text_editor {
                            rich_text_field(h, &post.content);
                        } else {
                            h.el_text(
                                "textarea",
                                &[("id", "post_content"), ("name", "post[content]")],
                                &post.content,
                            );
                        }
                        field_errors(h, errors, "content");
                    });

                    h.el("div", &[], |h| {
                        h.link_to("cancel", &posts_path());
                        h.void("input", &[("type", "submit"), ("name", "commit"), ("value", submit)]);
                    });
                },
            );
        });
    })
}

pub fn show(post: &PostRow) -> String {
    layout::render(|h| {
        h.el_text("h1", &[], &post.title);
        h.el_text("div", &[], &post.content);
        h.el("div", &[], |h| {
            h.link_to("back", &posts_path());
            h.link_to("edit", &edit_post_path(post.id));
            h.el(
                "form",
                &[
                    ("action", post_path(post.id).as_str()),
                    ("method", "post"),
                    ("data-confirm", "Are you sure?"),
                ],
                |h| {
                    h.void("input", &[("type", "hidden"), ("name", "_method"), ("value", "delete")]);
                    h.el_text("button", &[("type", "submit")], "delete");
                },
            );
        });
    })
}

fn error_explanation(h: &mut Html, errors: &ValidationErrors) {
    let messages = errors.full_messages();
    let summary = match messages.len() {
        1 => "1 error prohibited this post from being saved:".to_string(),
        n => format!("{n} errors prohibited this post from being saved:"),
    };

    h.el("div", &[("id", "error_explanation")], |h| {
        h.el_text("h2", &[], &summary);
        h.el("ul", &[], |h| {
            for message in &messages {
                h.el_text("li", &[], message);
            }
        });
    });
}

fn field_errors(h: &mut Html, errors: &ValidationErrors, field: &str) {
    for message in errors.on(field) {
        h.el_text("span", &[("class", "field-error")], message);
    }
}

fn rich_text_field(h: &mut Html, content: &str) {
    h.void(
        "input",
        &[
            ("type", "hidden"),
            ("id", "post_content"),
            ("name", "post[content]"),
            ("value", content),
        ],
    );
    h.el_text(
        "textarea",
        &[
            ("id", "post_content_editor"),
            ("data-rich-text-editor", ""),
            ("data-target", "post_content"),
        ],
        content,
    );
    h.raw(RICH_TEXT_SCRIPT);
}

#[cfg(test)]
mod tests {
    use chrono::Utc;

    use super::*;
    use crate::services::validation::BLANK;

    fn row(id: i64, title: &str, content: &str) -> PostRow {
        let now = Utc::now();
        PostRow {
            id,
            title: title.to_string(),
            content: content.to_string(),
            created_at: now,
            updated_at: now,
        }
    }

    const PLAIN: FormOptions = FormOptions {
        rich_text_editor: false,
    };

    #[test]
    fn index_links_every_post() {
        let page = index("Posts", &[row(1, "First", "a"), row(2, "Second & more", "b")]);

        assert!(page.contains("<h1>Posts</h1>"));
        assert!(page.contains("<a href=\"/posts/new\">new</a>"));
        assert!(page.contains("<li><a href=\"/posts/1\">First</a></li>"));
        assert!(page.contains("<li><a href=\"/posts/2\">Second &amp; more</a></li>"));
    }

    #[test]
    fn new_form_posts_to_collection() {
        let page = form(&PostDraft::default(), &ValidationErrors::new(), &PLAIN);

        assert!(page.contains("<h1>New Post</h1>"));
        assert!(page.contains("action=\"/posts\""));
        assert!(!page.contains("name=\"_method\""));
        assert!(page.contains("value=\"Create Post\""));
        assert!(!page.contains("error_explanation"));
    }

    #[test]
    fn edit_form_overrides_method_and_prefills() {
        let draft = PostDraft::from(row(7, "Title", "Body <b>"));
        let page = form(&draft, &ValidationErrors::new(), &PLAIN);

        assert!(page.contains("<h1>Edit Post #7</h1>"));
        assert!(page.contains("action=\"/posts/7\""));
        assert!(page.contains("name=\"_method\" value=\"patch\""));
        assert!(page.contains("value=\"Title\""));
        assert!(page.contains(">Body &lt;b&gt;</textarea>"));
    }

    #[test]
    fn form_shows_inline_errors() {
        let mut errors = ValidationErrors::new();
        errors.add("title", BLANK);
        let page = form(&PostDraft::default(), &errors, &PLAIN);

        assert!(page.contains("1 error prohibited this post from being saved:"));
        assert!(page.contains("<li>Title can&#39;t be blank</li>"));
        assert!(page.contains("<span class=\"field-error\">can&#39;t be blank</span>"));
    }

    #[test]
    fn rich_text_form_submits_through_hidden_field() {
        let draft = PostDraft::from(row(3, "T", "C"));
        let page = form(
            &draft,
            &ValidationErrors::new(),
            &FormOptions {
                rich_text_editor: true,
            },
        );

        assert!(page.contains(
            "<input type=\"hidden\" id=\"post_content\" name=\"post[content]\" value=\"C\">"
        ));
        assert!(page.contains("data-rich-text-editor=\"\""));
        assert!(page.contains("field.value = editor.value"));
    }

    #[test]
    fn show_renders_detail_with_confirmed_delete() {
        let page = show(&row(5, "Hello", "World"));

        assert!(page.contains("<h1>Hello</h1>"));
        assert!(page.contains("<div>World</div>"));
        assert!(page.contains("<a href=\"/posts/5/edit\">edit</a>"));
        assert!(page.contains("data-confirm=\"Are you sure?\""));
        assert!(page.contains("name=\"_method\" value=\"delete\""));
    }
}
