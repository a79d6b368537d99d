//! Naming conventions shared by key inference, the registry and pivot tables.

use heck::{ToSnakeCase, ToUpperCamelCase};

/// Namespace models live in when the registry does not know them.
pub const MODEL_NAMESPACE: &str = "App\\Models";

// matched against the last word only, so `human` is not `hu` + `man`
const IRREGULAR: &[(&str, &str)] = &[
    ("person", "people"),
    ("man", "men"),
    ("woman", "women"),
    ("child", "children"),
    ("mouse", "mice"),
    ("goose", "geese"),
    ("tooth", "teeth"),
    ("foot", "feet"),
    ("alias", "aliases"),
    ("status", "statuses"),
    ("bus", "buses"),
    ("campus", "campuses"),
    ("quiz", "quizzes"),
];

const UNCOUNTABLE: &[&str] = &[
    "data",
    "equipment",
    "fish",
    "information",
    "metadata",
    "news",
    "series",
    "sheep",
    "species",
];

/// Singulars ending in `ie`, whose plural is not `-ies` → `-y`.
const IE_WORDS: &[&str] = &[
    "calorie", "cookie", "die", "freebie", "genie", "hippie", "lie", "movie", "pie",
    "rookie", "selfie", "tie", "zombie",
];

/// Plural endings where only the `s` is inflection (`houses`, `sizes`).
const S_ONLY_ENDINGS: &[&str] = &["uses", "izes", "aches"];

/// Plural endings that add `es` to the singular (`classes`, `boxes`).
const ES_ENDINGS: &[&str] = &["sses", "xes", "ches", "shes"];

pub fn snake(name: &str) -> String {
    name.to_snake_case()
}

pub fn studly(name: &str) -> String {
    name.to_upper_camel_case()
}

/// Last segment of a namespaced class name (`App\Models\Place` → `Place`).
pub fn class_basename(class: &str) -> &str {
    class.rsplit('\\').next().unwrap_or(class)
}

/// English singular of the last word; everything before it is kept.
pub fn singular(word: &str) -> String {
    let start = last_word_start(word);
    let (head, last) = word.split_at(start);
    let lower = last.to_lowercase();

    if UNCOUNTABLE.contains(&lower.as_str()) {
        return word.to_string();
    }
    if let Some((one, _)) = IRREGULAR.iter().find(|(_, many)| *many == lower) {
        return format!("{}{}", head, match_case(last, one));
    }
    if let Some(stem) = lower.strip_suffix("ies") {
        if IE_WORDS.iter().any(|w| w.strip_suffix("ie") == Some(stem)) {
            return replace_tail(word, 1, "");
        }
        if !stem.is_empty() {
            return replace_tail(word, 3, "y");
        }
    }
    if S_ONLY_ENDINGS.iter().any(|s| lower.ends_with(s)) {
        return replace_tail(word, 1, "");
    }
    if ES_ENDINGS.iter().any(|s| lower.ends_with(s)) {
        return replace_tail(word, 2, "");
    }
    if lower.ends_with("ss") || lower.ends_with("us") || lower.ends_with("is") {
        return word.to_string();
    }
    if lower.ends_with('s') && lower.len() > 1 {
        return replace_tail(word, 1, "");
    }
    word.to_string()
}

/// English plural of the last word.
pub fn plural(word: &str) -> String {
    let start = last_word_start(word);
    let (head, last) = word.split_at(start);
    let lower = last.to_lowercase();

    if UNCOUNTABLE.contains(&lower.as_str()) {
        return word.to_string();
    }
    if let Some((_, many)) = IRREGULAR.iter().find(|(one, _)| *one == lower) {
        return format!("{}{}", head, match_case(last, many));
    }
    if let Some(stem) = lower.strip_suffix('y') {
        if !stem.ends_with(['a', 'e', 'i', 'o', 'u']) && !stem.is_empty() {
            return replace_tail(word, 1, "ies");
        }
    }
    if ["s", "x", "z", "ch", "sh"].iter().any(|s| lower.ends_with(s)) {
        return format!("{}es", word);
    }
    format!("{}s", word)
}

/// Conventional class name for a model that is not registered.
pub fn model_class(name: &str) -> String {
    format!("{}\\{}", MODEL_NAMESPACE, studly(&singular(class_basename(name))))
}

/// Conventional table name for a model (`BlogPost` → `blog_posts`).
pub fn table_name(model: &str) -> String {
    plural(&snake(class_basename(model)))
}

/// Byte offset of the last word: after the last `_`, `-`, space or `\`,
/// or at the last lower-to-upper camel hump.
fn last_word_start(word: &str) -> usize {
    let mut start = 0;
    let mut prev_lower = false;
    for (i, c) in word.char_indices() {
        if matches!(c, '_' | '-' | ' ' | '\\') {
            start = i + c.len_utf8();
            prev_lower = false;
            continue;
        }
        if c.is_uppercase() && prev_lower {
            start = i;
        }
        prev_lower = c.is_lowercase() || c.is_ascii_digit();
    }
    start
}

/// `replacement`, capitalized when `original` is.
fn match_case(original: &str, replacement: &str) -> String {
    let mut chars = replacement.chars();
    match (original.chars().next(), chars.next()) {
        (Some(o), Some(first)) if o.is_uppercase() => {
            first.to_uppercase().chain(chars).collect()
        }
        _ => replacement.to_string(),
    }
}

fn replace_tail(word: &str, tail_len: usize, replacement: &str) -> String {
    // suffixes are ASCII, so the cut always lands on a char boundary
    let cut = word.len().saturating_sub(tail_len);
    match word.get(..cut) {
        Some(head) => format!("{}{}", head, replacement),
        None => word.to_string(),
    }
}
