//! Best-effort language detection.

use tracing::debug;
use unihelp_core::UNKNOWN_LANGUAGE;

/// Detect the language of `text`, returning a short language tag.
///
/// Two-letter ISO 639-1 codes are used where one exists, ISO 639-3
/// otherwise. Empty input, or input the detector cannot classify, yields
/// `"unknown"`. Detection is deterministic for identical input.
pub fn detect_language(text: &str) -> String {
    if text.trim().is_empty() {
        return UNKNOWN_LANGUAGE.to_string();
    }

    match whatlang::detect(text) {
        Some(info) => {
            let code = info.lang().code();
            debug!(
                "Detected language {} (confidence {:.2})",
                code,
                info.confidence()
            );
            iso_639_1(code).unwrap_or(code).to_string()
        }
        None => UNKNOWN_LANGUAGE.to_string(),
    }
}

fn iso_639_1(code: &str) -> Option<&'static str> {
    let short = match code {
        "afr" => "af",
        "ara" => "ar",
        "bel" => "be",
        "ben" => "bn",
        "bul" => "bg",
        "cat" => "ca",
        "ces" => "cs",
        "cmn" => "zh",
        "dan" => "da",
        "deu" => "de",
        "ell" => "el",
        "eng" => "en",
        "epo" => "eo",
        "est" => "et",
        "fin" => "fi",
        "fra" => "fr",
        "heb" => "he",
        "hin" => "hi",
        "hrv" => "hr",
        "hun" => "hu",
        "ind" => "id",
        "ita" => "it",
        "jpn" => "ja",
        "kor" => "ko",
        "lat" => "la",
        "lav" => "lv",
        "lit" => "lt",
        "nld" => "nl",
        "nob" => "nb",
        "pes" => "fa",
        "pol" => "pl",
        "por" => "pt",
        "ron" => "ro",
        "rus" => "ru",
        "slk" => "sk",
        "slv" => "sl",
        "spa" => "es",
        "srp" => "sr",
        "swe" => "sv",
        "tha" => "th",
        "tur" => "tr",
        "ukr" => "uk",
        "urd" => "ur",
        "vie" => "vi",
        _ => return None,
    };
    Some(short)
}
