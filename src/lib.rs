//! Asset generators for ClipFlow Pro: OCR text fixtures and the clipboard app icon set.

pub mod bitmap_font;
pub mod contents_json;
pub mod encode;
pub mod fonts;
pub mod icon_gen;
pub mod render;
pub mod shapes;
pub mod text_fixture;
