//! Error pages for the HTML surface.

use axum::http::StatusCode;

use crate::views::layout;

pub fn page(status: StatusCode) -> String {
    let (heading, detail) = match status {
        StatusCode::NOT_FOUND => (
            "The page you were looking for doesn't exist.",
            "You may have mistyped the address or the page may have moved.",
        ),
        StatusCode::BAD_REQUEST => (
            "The request could not be understood.",
            "Check the submitted form and try again.",
        ),
        _ => (
            "We're sorry, but something went wrong.",
            "The error has been logged.",
        ),
    };

    layout::render(|h| {
        h.el_text("h1", &[], heading);
        h.el_text("p", &[], detail);
        h.link_to("back to posts", "/posts");
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn not_found_and_server_error_pages_differ() {
        let not_found = page(StatusCode::NOT_FOUND);
        let internal = page(StatusCode::INTERNAL_SERVER_ERROR);

        assert!(not_found.contains("doesn&#39;t exist"));
        assert!(internal.contains("something went wrong"));
    }
}
