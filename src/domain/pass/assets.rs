//! Placeholder icon assets.
//!
//! Wallet refuses a pass bundle without `icon.png` and `icon@2x.png`, so the
//! builder ships a fixed pre-encoded placeholder until per-merchant artwork
//! exists. The bytes below are a minimal valid PNG.

/// Archive member name for the 1x icon.
pub const ICON_FILE: &str = "icon.png";

/// Archive member name for the 2x icon.
pub const ICON_2X_FILE: &str = "icon@2x.png";

/// Placeholder icon bytes (1x).
pub const ICON_PNG: &[u8] = &[
    0x89, 0x50, 0x4e, 0x47, 0x0d, 0x0a, 0x1a, 0x0a, 0x00, 0x00, 0x00, 0x0d,
    0x49, 0x48, 0x44, 0x52, 0x00, 0x00, 0x00, 0x01, 0x00, 0x00, 0x00, 0x01,
    0x08, 0x06, 0x00, 0x00, 0x00, 0x1f, 0x15, 0xc4, 0x89, 0x00, 0x00, 0x00,
    0x0d, 0x49, 0x44, 0x41, 0x54, 0x78, 0xda, 0x63, 0x64, 0x60, 0xf8, 0x5f,
    0x0f, 0x00, 0x02, 0x87, 0x01, 0x80, 0xeb, 0x47, 0xba, 0x92, 0x00, 0x00,
    0x00, 0x00, 0x49, 0x45, 0x4e, 0x44, 0xae, 0x42, 0x60, 0x82,
];

/// Placeholder icon bytes (2x). Same placeholder artwork as the 1x asset.
pub const ICON_2X_PNG: &[u8] = ICON_PNG;
