use crate::models::Settings;

/// Characters stripped from the front of an `InitGame` payload
///
/// This is a character class, not a prefix: a first setting key that starts
/// with any of these letters loses them too.
const INIT_TRIM_CHARS: &[char] = &['I', 'n', 'i', 't', 'G', 'a', 'm', 'e', ':', ' ', '\\'];

/// Decode the backslash-separated key/value list of an `InitGame` payload
///
/// `InitGame: \mapname\mp_array\g_gametype\tdm` yields
/// `{mapname: mp_array, g_gametype: tdm}`. Tokens are taken in pairs; a
/// trailing key without a value is dropped.
pub fn parse_settings(payload: &str) -> Settings {
    let mut settings = Settings::new();
    let raw = payload.trim_start_matches(INIT_TRIM_CHARS);

    let tokens: Vec<&str> = raw.split('\\').collect();
    for pair in tokens.chunks_exact(2) {
        settings.insert(pair[0], pair[1]);
    }

    settings
}
