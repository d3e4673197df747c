//! Display-name derivation for document keys.

/// Formats a source key as a display name.
///
/// Words are split on capital-letter boundaries, underscores, hyphens and
/// whitespace, then each word is title-cased:
/// `userAccountCreationDate` becomes `User Account Creation Date`.
/// A run of capitals stays together as one word (`HTTPStatus` becomes
/// `HTTP Status`).
pub fn format_name(key: &str) -> String {
    split_words(key)
        .iter()
        .map(|word| title_case(word))
        .collect::<Vec<_>>()
        .join(" ")
}

/// Display name for the array element at the 0-based `index`.
pub fn item_name(index: usize) -> String {
    format!("Item {}", index + 1)
}

fn split_words(key: &str) -> Vec<String> {
    let chars: Vec<char> = key.chars().collect();
    let mut words = Vec::new();
    let mut current = String::new();

    for (i, &ch) in chars.iter().enumerate() {
        if ch == '_' || ch == '-' || ch.is_whitespace() {
            if !current.is_empty() {
                words.push(std::mem::take(&mut current));
            }
            continue;
        }

        if ch.is_uppercase() && !current.is_empty() {
            let prev = chars[i - 1];
            let next_is_lower = chars.get(i + 1).is_some_and(|next| next.is_lowercase());
            // aB -> a|B, ABc -> A|Bc
            if !prev.is_uppercase() || next_is_lower {
                words.push(std::mem::take(&mut current));
            }
        }

        current.push(ch);
    }

    if !current.is_empty() {
        words.push(current);
    }
    words
}

fn title_case(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
