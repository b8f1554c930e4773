use crate::views::layout;

pub fn index(title: &str) -> String {
    layout::render(|h| h.el_text("h1", &[], title))
}
