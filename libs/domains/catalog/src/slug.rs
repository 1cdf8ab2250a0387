//! Product alias (slug) derivation.

use regex::Regex;
use std::sync::LazyLock;

static WHITESPACE_RUN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s+").expect("whitespace pattern is valid"));

/// Latin approximation for a lowercase Cyrillic letter, or `None` when unmapped.
fn latin_for(ch: char) -> Option<&'static str> {
    let latin = match ch {
        'а' => "a",
        'б' => "b",
        'в' => "v",
        'г' => "h",
        'ґ' => "g",
        'д' => "d",
        'е' => "e",
        'ё' => "yo",
        'є' => "ye",
        'ж' => "zh",
        'з' => "z",
        'и' => "y",
        'і' => "i",
        'ї' => "yi",
        'й' => "y",
        'к' => "k",
        'л' => "l",
        'м' => "m",
        'н' => "n",
        'о' => "o",
        'п' => "p",
        'р' => "r",
        'с' => "s",
        'т' => "t",
        'у' => "u",
        'ф' => "f",
        'х' => "kh",
        'ц' => "ts",
        'ч' => "ch",
        'ш' => "sh",
        'щ' => "shch",
        'ъ' | 'ь' | '\'' | '’' | 'ʼ' => "",
        'ы' => "y",
        'э' => "e",
        'ю' => "yu",
        'я' => "ya",
        _ => return None,
    };
    Some(latin)
}

/// Transliterate Cyrillic letters to Latin. Characters without a mapping pass through.
///
/// Expects lowercase input; uppercase Cyrillic is not in the table.
pub fn transliterate(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for ch in input.chars() {
        match latin_for(ch) {
            Some(latin) => out.push_str(latin),
            None => out.push(ch),
        }
    }
    out
}

fn underscore_whitespace(input: &str) -> String {
    WHITESPACE_RUN.replace_all(input.trim(), "_").into_owned()
}

/// Derive an alias from a product title: lowercase, transliterate, then join
/// words with single underscores.
///
/// ```
/// assert_eq!(domain_catalog::slug::generate("Red Shoes"), "red_shoes");
/// assert_eq!(domain_catalog::slug::generate("Чорна сумка"), "chorna_sumka");
/// ```
pub fn generate(title: &str) -> String {
    underscore_whitespace(&transliterate(&title.to_lowercase()))
}

/// Normalize a caller-supplied alias: lowercase and underscore whitespace, no transliteration.
pub fn normalize(alias: &str) -> String {
    underscore_whitespace(&alias.to_lowercase())
}

/// The alias to store for a product: the normalized supplied alias, or one
/// generated from the title when none was supplied.
pub fn alias_for(title: &str, alias: Option<&str>) -> String {
    match alias {
        Some(alias) if !alias.trim().is_empty() => normalize(alias),
        _ => generate(title),
    }
}
