/// Maps Turkish characters to their ASCII equivalents before slugifying.
/// Both upper- and lowercase forms are covered because the lowering happens
/// per-character and `'İ'.to_lowercase()` would otherwise yield `i̇`.
const TURKISH_MAP: &[(char, char)] = &[
    ('ç', 'c'),
    ('Ç', 'c'),
    ('ğ', 'g'),
    ('Ğ', 'g'),
    ('ı', 'i'),
    ('I', 'i'),
    ('İ', 'i'),
    ('ö', 'o'),
    ('Ö', 'o'),
    ('ş', 's'),
    ('Ş', 's'),
    ('ü', 'u'),
    ('Ü', 'u'),
];

/// Derives a URL slug from a title: Turkish characters are transliterated,
/// everything is lowercased, non-alphanumerics are dropped and runs of
/// whitespace collapse to a single hyphen.
///
/// Used for both project and technical-specification slugs so the two
/// resources can never diverge in how they derive them.
pub fn slugify(title: &str) -> String {
    let mut out = String::with_capacity(title.len());
    let mut pending_separator = false;

    for ch in title.chars() {
        let ch = TURKISH_MAP
            .iter()
            .find(|(from, _)| *from == ch)
            .map(|(_, to)| *to)
            .unwrap_or(ch);

        if ch.is_whitespace() {
            if !out.is_empty() {
                pending_separator = true;
            }
            continue;
        }

        for lower in ch.to_lowercase() {
            if lower.is_ascii_alphanumeric() {
                if pending_separator {
                    out.push('-');
                    pending_separator = false;
                }
                out.push(lower);
            }
        }
    }

    out
}

#[cfg(test)]
mod tests {
    use super::slugify;

    #[test]
    fn lowercases_and_hyphenates_whitespace() {
        assert_eq!(slugify("Modern Konut Projesi"), "modern-konut-projesi");
    }

    #[test]
    fn strips_non_alphanumerics_without_hyphenating() {
        assert_eq!(slugify("It's A-OK!"), "its-aok");
    }

    #[test]
    fn collapses_whitespace_runs() {
        assert_eq!(slugify("  Çok   Katlı \t Bina  "), "cok-katli-bina");
    }

    #[test]
    fn transliterates_turkish_characters() {
        assert_eq!(slugify("Teknik Şartname Öğütleri"), "teknik-sartname-ogutleri");
        assert_eq!(slugify("ÇĞİIÖŞÜ çğıiöşü"), "cgiiosu-cgiiosu");
    }

    #[test]
    fn empty_and_symbol_only_titles_yield_empty_slug() {
        assert_eq!(slugify(""), "");
        assert_eq!(slugify("!!! ***"), "");
    }

    #[test]
    fn digits_survive() {
        assert_eq!(slugify("121 Daireli Site 2024"), "121-daireli-site-2024");
    }
}
