/// UTF-8 first, then ISO-8859-1. Latin-1 assigns a character to every byte,
/// so the second step always succeeds.
pub(super) fn decode(bytes: &[u8]) -> String {
    match std::str::from_utf8(bytes) {
        Ok(text) => text.to_string(),
        Err(_) => encoding_rs::mem::decode_latin1(bytes).into_owned(),
    }
}
