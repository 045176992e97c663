//! Display casing for free-text item names.

/// Contraction suffixes that title-casing must not capitalize.
const CONTRACTIONS: [&str; 7] = ["'s", "'t", "'ll", "'re", "'ve", "'m", "'d"];

/// Title-case free text for display.
///
/// Every letter that opens an alphabetic run is uppercased and the rest
/// are lowercased, then any capitalized contraction suffix (`'S`, `'Ll`,
/// ...) is folded back to lowercase. The fold is substring-based, not
/// anchored to the end of the token, so a suffix pattern appearing
/// mid-token is corrected as well.
///
/// Total over all inputs; the empty string maps to itself.
///
/// ## Example
///
/// ```
/// use shoplist::normalize;
///
/// assert_eq!(normalize("sam's club"), "Sam's Club");
/// assert_eq!(normalize("I'll go"), "I'll Go");
/// assert_eq!(normalize(""), "");
/// ```
pub fn normalize(text: &str) -> String {
    text.split_whitespace()
        .map(|word| {
            let mut cased = title_case(word);
            for suffix in CONTRACTIONS {
                let miscased = title_case(suffix);
                if cased.contains(&miscased) {
                    cased = cased.replace(&miscased, suffix);
                }
            }
            cased
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// Uppercase the first letter of every alphabetic run, lowercase the rest.
fn title_case(word: &str) -> String {
    let mut out = String::with_capacity(word.len());
    let mut run_start = true;
    for ch in word.chars() {
        if ch.is_alphabetic() {
            if run_start {
                out.extend(ch.to_uppercase());
            } else {
                out.extend(ch.to_lowercase());
            }
            run_start = false;
        } else {
            out.push(ch);
            run_start = true;
        }
    }
    out
}
