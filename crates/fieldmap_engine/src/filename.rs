use sha2::{Digest, Sha256};

/// Windows-safe photo filename: `Ticket_{site_id}_{stamp}.jpg`.
///
/// When the id had to be sanitized, a short hash of the raw id keeps distinct
/// ids from sharing a name.
pub fn photo_filename(site_id: &str, stamp: &str) -> String {
    let sanitized = sanitize_component(site_id);
    if sanitized == site_id {
        format!("Ticket_{sanitized}_{stamp}.jpg")
    } else {
        format!("Ticket_{sanitized}-{}_{stamp}.jpg", short_hash(site_id))
    }
}

/// Archive name for a photo export made on `date` (`YYYY-MM-DD`).
pub fn archive_filename(date: &str) -> String {
    format!("Photos_{}.zip", sanitize_component(date))
}

fn sanitize_component(input: &str) -> String {
    let cleaned: String = input
        .chars()
        .map(|c| if is_forbidden(c) { '_' } else { c })
        .collect();
    let cleaned = cleaned.trim_matches(&['_', ' ', '.'][..]);
    if cleaned.is_empty() {
        return "unnamed".to_string();
    }

    let mut compacted = String::with_capacity(cleaned.len());
    let mut prev_underscore = false;
    for c in cleaned.chars() {
        if c == '_' && prev_underscore {
            continue;
        }
        prev_underscore = c == '_';
        compacted.push(c);
    }
    if compacted.chars().count() > 80 {
        compacted = compacted.chars().take(80).collect();
    }
    if is_reserved_windows_name(&compacted) {
        compacted.push('_');
    }
    compacted
}

fn is_forbidden(c: char) -> bool {
    matches!(c,
        '\\' | '/' | ':' | '*' | '?' | '"' | '<' | '>' | '|' | ' ' | '\0'..='\u{1F}'
    )
}

fn is_reserved_windows_name(name: &str) -> bool {
    const RESERVED: &[&str] = &[
        "CON", "PRN", "AUX", "NUL", "COM1", "COM2", "COM3", "COM4", "COM5", "COM6", "COM7", "COM8",
        "COM9", "LPT1", "LPT2", "LPT3", "LPT4", "LPT5", "LPT6", "LPT7", "LPT8", "LPT9",
    ];
    RESERVED.iter().any(|r| r.eq_ignore_ascii_case(name))
}

fn short_hash(input: &str) -> String {
    let digest = Sha256::digest(input.as_bytes());
    let mut hex = String::with_capacity(8);
    for byte in digest.iter().take(4) {
        use std::fmt::Write;
        let _ = write!(&mut hex, "{byte:02x}");
    }
    hex
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_ids_are_used_verbatim() {
        assert_eq!(photo_filename("4521", "093015"), "Ticket_4521_093015.jpg");
    }

    #[test]
    fn unsafe_ids_are_sanitized_and_hashed() {
        let name = photo_filename("WO/12: east", "093015");
        assert!(name.starts_with("Ticket_WO_12_east-"), "{name}");
        assert!(name.ends_with("_093015.jpg"));

        // Different raw ids that sanitize alike still differ.
        assert_ne!(name, photo_filename("WO:12/ east", "093015"));
    }

    #[test]
    fn reserved_and_empty_ids_are_patched() {
        assert!(photo_filename("con", "1").starts_with("Ticket_con_-"));
        assert!(photo_filename("///", "1").starts_with("Ticket_unnamed-"));
    }

    #[test]
    fn archive_is_named_by_date() {
        assert_eq!(archive_filename("2024-05-01"), "Photos_2024-05-01.zip");
    }
}
