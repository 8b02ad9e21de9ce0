//! Canned reply texts and fixed command strings.
//!
//! User-facing copy is Indonesian, matching the deployed product. Command
//! constants are lowercase because the hub normalizes inbound text before
//! any matching happens.

use once_cell::sync::Lazy;

use super::message::Message;

pub const INPUT_CATEGORY: &str =
    "Mohon masukkan kategori pengumuman yang anda inginkan.";
pub const UNKNOWN_CATEGORY: &str = "Kategori yang anda masukkan tidak ada.";
pub const UNIDENTIFIABLE: &str =
    "Permintaan yang anda minta tidak dapat dipahami. \
     Mungkin saja karena permintaan anda sudah expired. \
     Silahkan mengulangi permintaan anda.";
pub const NO_CATEGORY: &str =
    "Belum ada kategori pengumuman yang dapat ditampilkan.";
pub const NO_ANNOUNCEMENT: &str = "Belum ada pengumuman pada kategori ini.";
pub const ANNOUNCEMENT_SERVED: &str =
    "Berikut adalah daftar pengumuman dengan kategori";
pub const PROMPT: &str = "Apakah ada hal lain yang ingin anda lakukan?";
pub const END_REQUEST_REPLY: &str =
    "Terima kasih telah menggunakan layanan kami.";

// Fixed Stage-B commands, matched case-insensitively on normalized text.
pub const NEXT_PAGE_COMMAND: &str = "lanjutkan";
pub const RECHOOSE_CATEGORY_COMMAND: &str = "ganti kategori";
pub const END_REQUEST_COMMAND: &str = "akhiri";

// Display labels for the command buttons; payloads stay the raw commands.
pub const NEXT_PAGE_LABEL: &str = "Lanjutkan";
pub const RECHOOSE_CATEGORY_LABEL: &str = "Ganti Kategori";
pub const END_REQUEST_LABEL: &str = "Akhiri";

/// The fixed navigation prompt shown after every announcement listing.
pub static PROMPT_MESSAGE: Lazy<Message> = Lazy::new(|| {
    Message::buttons(
        Some(PROMPT.to_string()),
        vec![
            (NEXT_PAGE_LABEL.to_string(), NEXT_PAGE_COMMAND.to_string()),
            (
                RECHOOSE_CATEGORY_LABEL.to_string(),
                RECHOOSE_CATEGORY_COMMAND.to_string(),
            ),
            (END_REQUEST_LABEL.to_string(), END_REQUEST_COMMAND.to_string()),
        ],
    )
    .expect("navigation prompt is statically well-formed")
});
