//! Icon names to terminal glyphs.
//!
//! Screens refer to icons by their Material Design Icons name; this module
//! resolves them to single-cell glyphs the terminal can draw.

/// Glyph drawn for icon names without a mapping.
pub const FALLBACK_GLYPH: &str = "•";

/// Resolves an icon name to a glyph.
pub fn glyph(name: &str) -> &'static str {
    match name {
        "star" => "★",
        "star-half-full" => "⯪",
        "star-outline" => "☆",
        "book" => "■",
        "book-open-page-variant" => "□",
        "magnify" => "⌕",
        "reload" => "↻",
        "check" => "✓",
        "arrow-left" => "←",
        _ => {
            tracing::trace!(icon = name, "no glyph for icon");
            FALLBACK_GLYPH
        }
    }
}
