//! URL-safe slug derivation.
//!
//! Slugs are derived data: they are recomputed from the current name on every
//! write and never treated as authoritative on their own.

/// Lowercase a name into a dash-separated ASCII slug.
///
/// Non-alphanumeric runs collapse into a single dash; leading and trailing
/// dashes are trimmed. Returns an empty string when nothing usable remains.
#[must_use]
pub fn slugify(input: &str) -> String {
    let mut slug = String::new();
    let mut last_dash = false;
    for ch in input.chars() {
        if ch.is_ascii_alphanumeric() {
            slug.push(ch.to_ascii_lowercase());
            last_dash = false;
        } else if !last_dash {
            slug.push('-');
            last_dash = true;
        }
    }
    slug.trim_matches('-').to_string()
}

/// Slug for an entity row: the slugified name, or `<kind>-<id>` when the name
/// is unknown or slugifies to nothing.
#[must_use]
pub fn entity_slug(kind: &str, id: i64, name: Option<&str>) -> String {
    match name.map(slugify) {
        Some(slug) if !slug.is_empty() => slug,
        _ => format!("{kind}-{id}"),
    }
}

/// Slug for a fixture: `<home>-vs-<away>`, with unknown sides falling back to
/// the id-based form.
#[must_use]
pub fn fixture_slug(id: i64, home: Option<&str>, away: Option<&str>) -> String {
    let home = home.map(slugify).filter(|s| !s.is_empty());
    let away = away.map(slugify).filter(|s| !s.is_empty());
    match (home, away) {
        (Some(home), Some(away)) => format!("{home}-vs-{away}"),
        _ => format!("fixture-{id}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn slugify_collapses_separators_and_lowercases() {
        assert_eq!(slugify("Borussia Mönchengladbach"), "borussia-m-nchengladbach");
        assert_eq!(slugify("  FC St. Pauli  "), "fc-st-pauli");
        assert_eq!(slugify("1. FC Köln"), "1-fc-k-ln");
    }

    #[test]
    fn slugify_returns_empty_for_unusable_input() {
        assert_eq!(slugify("***"), "");
        assert_eq!(slugify(""), "");
    }

    #[test]
    fn entity_slug_falls_back_to_kind_and_id() {
        assert_eq!(entity_slug("team", 42, Some("Arsenal")), "arsenal");
        assert_eq!(entity_slug("team", 42, None), "team-42");
        assert_eq!(entity_slug("team", 42, Some("???")), "team-42");
    }

    #[test]
    fn fixture_slug_combines_both_sides() {
        assert_eq!(
            fixture_slug(7, Some("Arsenal"), Some("Spurs")),
            "arsenal-vs-spurs"
        );
        assert_eq!(fixture_slug(7, Some("Arsenal"), None), "fixture-7");
        assert_eq!(fixture_slug(7, None, None), "fixture-7");
    }
}
