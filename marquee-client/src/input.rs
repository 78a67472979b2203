/// Turn a raw seat string as the user typed it into clean seat-token
/// candidates: split on comma or space (runs collapsed), lowercase,
/// drop every non-alphanumeric character, drop empty tokens.
///
/// The tokens are candidates only; whether they name real seats is the
/// inventory's call.
pub fn sanitize_booking_input(raw: &str) -> Vec<String> {
    raw.split([',', ' '])
        .map(|entry| {
            entry
                .chars()
                .filter(|c| c.is_ascii_alphanumeric())
                .map(|c| c.to_ascii_lowercase())
                .collect::<String>()
        })
        .filter(|entry| !entry.is_empty())
        .collect()
}
