/// Trims the input and title-cases every whitespace-separated word.
///
/// Ingestion and search both go through this one function, which is what
/// makes matching case-insensitive without a case-insensitive index.
pub fn title_case(input: &str) -> String {
    input
        .split_whitespace()
        .map(capitalize)
        .collect::<Vec<_>>()
        .join(" ")
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first
            .to_uppercase()
            .chain(chars.flat_map(|c| c.to_lowercase()))
            .collect(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lowercase_is_title_cased() {
        assert_eq!(title_case("mumbai"), "Mumbai");
        assert_eq!(title_case("new delhi"), "New Delhi");
    }

    #[test]
    fn test_uppercase_is_folded() {
        assert_eq!(title_case("PUNE"), "Pune");
        assert_eq!(title_case("hyderaBAD"), "Hyderabad");
    }

    #[test]
    fn test_surrounding_and_inner_whitespace_collapse() {
        assert_eq!(title_case("  bangalore  "), "Bangalore");
        assert_eq!(title_case("navi   mumbai"), "Navi Mumbai");
    }

    #[test]
    fn test_empty_input() {
        assert_eq!(title_case(""), "");
        assert_eq!(title_case("   "), "");
    }
}
