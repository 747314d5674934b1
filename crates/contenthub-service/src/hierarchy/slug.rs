//! URL slug derivation.

use std::collections::HashSet;

use uuid::Uuid;

/// Slug used when a name has no sluggable characters.
pub const EMPTY_SLUG: &str = "untitled";

fn fold(ch: char) -> Option<&'static str> {
    let folded = match ch {
        'à' | 'á' | 'â' | 'ã' | 'ä' | 'å' | 'ā' | 'ă' | 'ą' => "a",
        'æ' => "ae",
        'ç' | 'ć' | 'ĉ' | 'ċ' | 'č' => "c",
        'ď' | 'đ' | 'ð' => "d",
        'è' | 'é' | 'ê' | 'ë' | 'ē' | 'ĕ' | 'ė' | 'ę' | 'ě' => "e",
        'ĝ' | 'ğ' | 'ġ' | 'ģ' => "g",
        'ĥ' | 'ħ' => "h",
        'ì' | 'í' | 'î' | 'ï' | 'ĩ' | 'ī' | 'ĭ' | 'į' | 'ı' => "i",
        'ĵ' => "j",
        'ķ' => "k",
        'ĺ' | 'ļ' | 'ľ' | 'ŀ' | 'ł' => "l",
        'ñ' | 'ń' | 'ņ' | 'ň' => "n",
        'ò' | 'ó' | 'ô' | 'õ' | 'ö' | 'ø' | 'ō' | 'ŏ' | 'ő' => "o",
        'œ' => "oe",
        'ŕ' | 'ŗ' | 'ř' => "r",
        'ś' | 'ŝ' | 'ş' | 'š' => "s",
        'ß' => "ss",
        'ţ' | 'ť' | 'ŧ' => "t",
        'þ' => "th",
        'ù' | 'ú' | 'û' | 'ü' | 'ũ' | 'ū' | 'ŭ' | 'ů' | 'ű' | 'ų' => "u",
        'ŵ' => "w",
        'ý' | 'ÿ' | 'ŷ' => "y",
        'ź' | 'ż' | 'ž' => "z",
        '@' => "at",
        '&' => "and",
        _ => return None,
    };
    Some(folded)
}

/// Lowercase `input` into a hyphen-separated ASCII token.
///
/// Accented Latin letters fold to ASCII, `@` and `&` become words, every
/// other run of non-alphanumerics collapses to one hyphen. Input with
/// nothing sluggable yields [`EMPTY_SLUG`].
pub fn slugify(input: &str) -> String {
    fn push_word(slug: &mut String, word: &str, pending: &mut bool) {
        if *pending && !slug.is_empty() {
            slug.push('-');
        }
        *pending = false;
        slug.push_str(word);
    }

    let mut slug = String::with_capacity(input.len());
    let mut pending_hyphen = false;

    for ch in input.chars().flat_map(char::to_lowercase) {
        if ch.is_ascii_alphanumeric() {
            let mut buf = [0u8; 4];
            push_word(&mut slug, ch.encode_utf8(&mut buf), &mut pending_hyphen);
        } else if let Some(folded) = fold(ch) {
            // Symbols read as separate words; letters stay glued.
            let is_symbol = matches!(ch, '@' | '&');
            if is_symbol {
                pending_hyphen = true;
            }
            push_word(&mut slug, folded, &mut pending_hyphen);
            if is_symbol {
                pending_hyphen = true;
            }
        } else {
            pending_hyphen = true;
        }
    }

    if slug.is_empty() {
        EMPTY_SLUG.to_string()
    } else {
        slug
    }
}

/// First of `base`, `base-1`, `base-2`, … that is not in `taken`.
pub fn first_free(base: &str, taken: &HashSet<&str>) -> String {
    if !taken.contains(base) {
        return base.to_string();
    }
    (1u64..)
        .map(|n| format!("{base}-{n}"))
        .find(|candidate| !taken.contains(candidate.as_str()))
        .unwrap_or_else(|| base.to_string())
}

/// Derive a unique slug for `candidate_name`.
///
/// `existing` is the `(owner, slug)` lookup set; the entry owned by
/// `exclude_id` does not count as taken, so re-deriving a node's own
/// slug is a no-op.
pub fn derive_slug(
    candidate_name: &str,
    existing: &[(Uuid, String)],
    exclude_id: Option<Uuid>,
) -> String {
    let base = slugify(candidate_name);
    let taken: HashSet<&str> = existing
        .iter()
        .filter(|(id, _)| Some(*id) != exclude_id)
        .map(|(_, slug)| slug.as_str())
        .collect();
    first_free(&base, &taken)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slugify_basic() {
        assert_eq!(slugify("Technology"), "technology");
        assert_eq!(slugify("  Hello,   World!  "), "hello-world");
        assert_eq!(slugify("Rust & Go"), "rust-and-go");
        assert_eq!(slugify("me@home"), "me-at-home");
        assert_eq!(slugify("Crème Brûlée"), "creme-brulee");
        assert_eq!(slugify("Straße"), "strasse");
        assert_eq!(slugify("--a--b--"), "a-b");
    }

    #[test]
    fn test_slugify_empty_token() {
        assert_eq!(slugify(""), EMPTY_SLUG);
        assert_eq!(slugify("!!!"), EMPTY_SLUG);
        assert_eq!(slugify("日本"), EMPTY_SLUG);
    }

    #[test]
    fn test_slugify_is_idempotent() {
        for input in ["technology-1", "a-b-c", "x9"] {
            assert_eq!(slugify(input), input);
            assert_eq!(slugify(&slugify(input)), slugify(input));
        }
    }

    #[test]
    fn test_derive_slug_suffixes() {
        let mut existing: Vec<(Uuid, String)> = Vec::new();

        let first = derive_slug("Technology", &existing, None);
        assert_eq!(first, "technology");
        existing.push((Uuid::new_v4(), first));

        let second = derive_slug("Technology", &existing, None);
        assert_eq!(second, "technology-1");
        existing.push((Uuid::new_v4(), second));

        let third = derive_slug("Technology", &existing, None);
        assert_eq!(third, "technology-2");
    }

    #[test]
    fn test_derive_slug_excludes_self() {
        let me = Uuid::new_v4();
        let existing = vec![(me, "technology".to_string())];
        assert_eq!(derive_slug("Technology", &existing, Some(me)), "technology");
        assert_eq!(derive_slug("Technology", &existing, None), "technology-1");
    }

    #[test]
    fn test_derive_slug_fills_gaps() {
        let existing = vec![
            (Uuid::new_v4(), "news".to_string()),
            (Uuid::new_v4(), "news-2".to_string()),
        ];
        assert_eq!(derive_slug("News", &existing, None), "news-1");
    }
}
