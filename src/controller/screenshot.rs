//! Comment/screenshot display shared by every widget variant.

use crate::icon::{Icon, Role};

/// Which of the two mutually exclusive areas is shown.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ScreenshotState {
    /// The comment placeholder is shown.
    #[default]
    CommentShown,
    /// The screenshot preview is shown.
    ScreenshotShown,
}

/// Builds the background image URL of a base64-encoded PNG.
pub fn data_url(encoded_png: &str) -> String {
    format!("data:image/png;base64,{encoded_png}")
}

/// Returns the screenshot payload if it carries any data.
pub fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|value| !value.is_empty())
}

/// Show the screenshot if `value` carries one, the comment otherwise.
pub fn apply<I: Icon>(icon: &mut I, value: Option<&str>) -> ScreenshotState {
    match non_empty(value) {
        Some(encoded) => {
            icon.set_background_image(Role::ScreenshotImage, &data_url(encoded));
            icon.hide(Role::CommentArea);
            icon.show(Role::ScreenshotArea);
            ScreenshotState::ScreenshotShown
        }
        None => {
            icon.hide(Role::ScreenshotArea);
            icon.show(Role::CommentArea);
            ScreenshotState::CommentShown
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::icon::{Display, IconTree};

    #[test]
    fn test_data_url() {
        assert_eq!(data_url("iVBORw0K"), "data:image/png;base64,iVBORw0K");
    }

    #[test]
    fn test_apply_value_shows_screenshot() {
        let mut tree = IconTree::paged_pedal();
        let state = apply(&mut tree, Some("iVBORw0K"));

        assert_eq!(state, ScreenshotState::ScreenshotShown);
        assert_eq!(tree.display(Role::CommentArea), Some(Display::None));
        assert_eq!(tree.display(Role::ScreenshotArea), Some(Display::Default));
        assert_eq!(
            tree.background_image(Role::ScreenshotImage),
            Some("data:image/png;base64,iVBORw0K")
        );
    }

    #[test]
    fn test_apply_empty_shows_comment() {
        let mut tree = IconTree::paged_pedal();
        apply(&mut tree, Some("iVBORw0K"));

        for value in [Some(""), None] {
            let state = apply(&mut tree, value);
            assert_eq!(state, ScreenshotState::CommentShown);
            assert_eq!(tree.display(Role::CommentArea), Some(Display::Default));
            assert_eq!(tree.display(Role::ScreenshotArea), Some(Display::None));
        }
    }
}
