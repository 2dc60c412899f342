/// Smallest valid PNG: a single transparent pixel.
pub fn png_fixture() -> Vec<u8> {
    return vec![
        0x89, 0x50, 0x4e, 0x47, 0x0d, 0x0a, 0x1a, 0x0a, 0x00, 0x00, 0x00, 0x0d, 0x49, 0x48, 0x44,
        0x52, 0x00, 0x00, 0x00, 0x01, 0x00, 0x00, 0x00, 0x01, 0x08, 0x06, 0x00, 0x00, 0x00, 0x1f,
        0x15, 0xc4, 0x89, 0x00, 0x00, 0x00, 0x0a, 0x49, 0x44, 0x41, 0x54, 0x78, 0x9c, 0x63, 0x00,
        0x01, 0x00, 0x00, 0x05, 0x00, 0x01, 0x0d, 0x0a, 0x2d, 0xb4, 0x00, 0x00, 0x00, 0x00, 0x49,
        0x45, 0x4e, 0x44, 0xae, 0x42, 0x60, 0x82,
    ];
}

pub fn history_fixture() -> &'static str {
    return r#"
[
  {
    "sender": "You",
    "text": "What's the weather like on Mars?",
    "timestamp": "2026-10-19T09:00:00Z",
    "sessionId": "s-1"
  },
  {
    "sender": "Atlas",
    "text": "Cold and dusty, averaging around -60C.",
    "timestamp": "2026-10-19T09:00:02Z",
    "sessionId": "s-1"
  }
]
"#
    .trim();
}
