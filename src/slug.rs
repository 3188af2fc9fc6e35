//! URL-safe slugs for users and teams.

use std::future::Future;

use deunicode::deunicode_char;

use crate::TeamError;

const FALLBACK_SLUG: &str = "item";

/// Accumulates kebab-case words one character at a time.
#[derive(Default)]
struct Words {
    words: Vec<String>,
    current: String,
    prev_lower_or_digit: bool,
}

impl Words {
    fn push_ascii(&mut self, c: char) {
        if c.is_ascii_uppercase() && self.prev_lower_or_digit {
            self.split();
        }
        self.current.push(c.to_ascii_lowercase());
        self.prev_lower_or_digit = c.is_ascii_lowercase() || c.is_ascii_digit();
    }

    /// A letter or digit with no ASCII form stays in the word as-is.
    fn push_other(&mut self, c: char) {
        self.current.extend(c.to_lowercase());
        self.prev_lower_or_digit = !c.is_uppercase();
    }

    fn split(&mut self) {
        if !self.current.is_empty() {
            self.words.push(std::mem::take(&mut self.current));
        }
        self.prev_lower_or_digit = false;
    }

    fn finish(mut self) -> String {
        self.split();
        if self.words.is_empty() {
            FALLBACK_SLUG.to_owned()
        } else {
            self.words.join("-")
        }
    }
}

/// Kebab-cases `text`: letters and digits form lower-case words, camel-case
/// humps start new words, and words are joined with `-`. Accented and other
/// non-ASCII letters are transliterated first (`é` becomes `e`, `ß` becomes
/// `ss`); letters without a transliteration are kept.
///
/// ```rust
/// use teamwork::slug::slugify;
///
/// assert_eq!(slugify("new@x.com"), "new-x-com");
/// assert_eq!(slugify("Acme Corp"), "acme-corp");
/// assert_eq!(slugify("myTeam"), "my-team");
/// assert_eq!(slugify("Équipe Été"), "equipe-ete");
/// ```
pub fn slugify(text: &str) -> String {
    let mut words = Words::default();

    for c in text.chars() {
        if c.is_ascii_alphanumeric() {
            words.push_ascii(c);
        } else if c.is_alphanumeric() {
            let folded = deunicode_char(c)
                .filter(|folded| folded.chars().any(|f| f.is_ascii_alphanumeric()));
            match folded {
                Some(folded) => {
                    for t in folded.chars() {
                        if t.is_ascii_alphanumeric() {
                            words.push_ascii(t);
                        } else {
                            words.split();
                        }
                    }
                }
                None => words.push_other(c),
            }
        } else {
            words.split();
        }
    }

    words.finish()
}

/// Returns `slugify(text)` if it is free, otherwise the first free
/// `slug-N` for N = 1, 2, ...
///
/// `exists` reports whether a candidate is already taken in the target
/// collection.
pub async fn generate_unique_slug<F, Fut>(text: &str, exists: F) -> Result<String, TeamError>
where
    F: Fn(String) -> Fut,
    Fut: Future<Output = Result<bool, TeamError>>,
{
    let base = slugify(text);
    if !exists(base.clone()).await? {
        return Ok(base);
    }

    let mut count: u32 = 1;
    loop {
        let candidate = format!("{base}-{count}");
        if !exists(candidate.clone()).await? {
            return Ok(candidate);
        }
        count = count
            .checked_add(1)
            .ok_or_else(|| TeamError::Internal("slug space exhausted".to_owned()))?;
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;

    #[test]
    fn test_slugify_emails_and_names() {
        assert_eq!(slugify("new@x.com"), "new-x-com");
        assert_eq!(slugify("Team Leader@Example.COM"), "team-leader-example-com");
        assert_eq!(slugify("  Acme   Corp  "), "acme-corp");
        assert_eq!(slugify("first.last+tag@mail.io"), "first-last-tag-mail-io");
    }

    #[test]
    fn test_slugify_camel_case() {
        assert_eq!(slugify("myTeamName"), "my-team-name");
        assert_eq!(slugify("team2Go"), "team2-go");
        assert_eq!(slugify("ACME"), "acme");
    }

    #[test]
    fn test_slugify_folds_accents() {
        assert_eq!(slugify("Équipe Été"), "equipe-ete");
        assert_eq!(slugify("Café Crème"), "cafe-creme");
        assert_eq!(slugify("Müller"), "muller");
        assert_eq!(slugify("Ñandú"), "nandu");
        assert_eq!(slugify("Straße"), "strasse");
    }

    #[test]
    fn test_slugify_non_latin_names_keep_their_letters() {
        for name in ["日本チーム", "Команда", "Ομάδα"] {
            let slug = slugify(name);
            assert_ne!(slug, "item", "{name}");
            assert!(!slug.starts_with('-') && !slug.ends_with('-'), "{name}");
            assert!(!slug.contains("--"), "{name}");
        }
        assert_eq!(slugify("Команда"), "komanda");
    }

    #[test]
    fn test_slugify_without_alphanumerics() {
        assert_eq!(slugify("@@@"), "item");
        assert_eq!(slugify(""), "item");
        assert_eq!(slugify("— · —"), "item");
    }

    #[tokio::test]
    async fn test_unique_slug_free_base() {
        let slug = generate_unique_slug("Acme", |_| async { Ok(false) })
            .await
            .unwrap();
        assert_eq!(slug, "acme");
    }

    #[tokio::test]
    async fn test_unique_slug_appends_counter() {
        let taken: HashSet<String> = ["acme", "acme-1", "acme-2"]
            .into_iter()
            .map(str::to_owned)
            .collect();
        let taken = &taken;

        let slug = generate_unique_slug("Acme", |candidate| async move {
            Ok(taken.contains(&candidate))
        })
        .await
        .unwrap();

        assert_eq!(slug, "acme-3");
    }

    #[tokio::test]
    async fn test_unique_slug_propagates_store_errors() {
        let result = generate_unique_slug("Acme", |_| async {
            Err(TeamError::DatabaseError("down".to_owned()))
        })
        .await;

        assert_eq!(result, Err(TeamError::DatabaseError("down".to_owned())));
    }
}
