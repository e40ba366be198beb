// Element ids of the quickstart page.
pub static ROOM_ID: &str = "room";
pub static PARTICIPANTS_ID: &str = "participants";
pub static ACTIVE_PARTICIPANT_ID: &str = "active-participant";
pub static LEAVE_ROOM_ID: &str = "leave-room";

pub static PDF_CANVAS_ID: &str = "pdf-canvas";
pub static PDF_LOADER_ID: &str = "pdf-loader";
pub static PDF_CONTENTS_ID: &str = "pdf-contents";
pub static PDF_TOTAL_PAGES_ID: &str = "pdf-total-pages";
pub static PDF_CURRENT_PAGE_ID: &str = "pdf-current-page";
pub static PDF_NEXT_ID: &str = "pdf-next";
pub static PDF_PREV_ID: &str = "pdf-prev";
pub static PAGE_LOADER_ID: &str = "page-loader";
pub static SHOW_PDF_BUTTON_ID: &str = "show-pdf-button";

// CSS classes toggled on participant containers.
pub static ACTIVE_CLASS: &str = "active";
pub static PINNED_CLASS: &str = "pinned";

/// Pre-allocated media elements per kind in each participant container.
pub const MEDIA_SLOTS_PER_KIND: usize = 2;

pub const THUMBNAIL_WIDTH: u32 = 700;
pub const THUMBNAIL_HEIGHT: u32 = 400;

pub const DEFAULT_CAPTURE_FRAME_RATE: u32 = 25;
pub static DEFAULT_DOCUMENT_URL: &str = "somepdf.pdf";
pub static SAMPLE_DOCUMENT_URL: &str =
    "https://mozilla.github.io/pdf.js/web/compressed.tracemonkey-pldi-09.pdf";
pub static DEFAULT_DOCUMENT_TRACK_NAME: &str = "document";
pub static DEFAULT_LOG_LEVEL: &str = "info";
