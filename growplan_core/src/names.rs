//! Entry names for the device's fixed-size name field.

/// Size of the device's name field in bytes.
pub const MAX_NAME_BYTES: usize = 32;

/// `"{program} {label}"`, program name trimmed.
pub fn compose_entry_name(program_name: &str, label: &str) -> String {
    format!("{} {}", program_name.trim(), label)
}

/// Longest prefix of whole characters whose UTF-8 length is `<= max_bytes`
/// (a budget of 0 is treated as 1).
pub fn truncate_utf8(value: &str, max_bytes: usize) -> &str {
    let limit = max_bytes.max(1);
    if value.len() <= limit {
        return value;
    }
    let cut = value
        .char_indices()
        .map(|(i, c)| i + c.len_utf8())
        .take_while(|end| *end <= limit)
        .last()
        .unwrap_or(0);
    &value[..cut]
}

/// Compose and truncate in one go.
pub fn encode_entry_name(program_name: &str, label: &str, max_bytes: usize) -> String {
    truncate_utf8(&compose_entry_name(program_name, label), max_bytes).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn short_names_pass_through() {
        assert_eq!(truncate_utf8("Tomato Pump 3", 32), "Tomato Pump 3");
        assert_eq!(compose_entry_name("  Mix ", "Pump 1: pH+"), "Mix Pump 1: pH+");
    }

    #[test]
    fn cuts_on_char_boundary() {
        // "Зе" is 4 bytes; a budget of 3 keeps only the first letter
        assert_eq!(truncate_utf8("Земляника", 3), "З");
        assert_eq!(truncate_utf8("Земляника", 4), "Зе");
        assert_eq!(truncate_utf8("ab€", 4), "ab");
        assert_eq!(truncate_utf8("ab€", 5), "ab€");
    }

    #[test]
    fn zero_budget_behaves_like_one() {
        assert_eq!(truncate_utf8("abc", 0), "a");
        assert_eq!(truncate_utf8("€", 0), "");
    }

    #[test]
    fn device_budget() {
        let name = encode_entry_name(
            "Aquatica TriPart Земляника Очень Длинный Профиль",
            "Pump 3: Nutrient A",
            MAX_NAME_BYTES,
        );
        assert!(name.len() <= MAX_NAME_BYTES);
        assert!(!name.contains('\u{FFFD}'));
        assert_eq!(name, "Aquatica TriPart Земляни");
    }
}
