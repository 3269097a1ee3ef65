pub mod header;
pub mod keyboard;
pub mod menus;

use teloxide::types::LinkPreviewOptions;

/// Menus carry broker and support URLs; previews would bury the text.
pub fn no_preview() -> LinkPreviewOptions {
    LinkPreviewOptions {
        is_disabled: true,
        url: None,
        prefer_small_media: false,
        prefer_large_media: false,
        show_above_text: false,
    }
}
