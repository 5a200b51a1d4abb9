pub fn wrap(text: &str, width: usize) -> Vec<String> {
    let mut lines = Vec::new();
    let mut current = String::new();

    for word in text.split_whitespace() {
        if current.is_empty() {
            current = word.to_string();
        } else if current.chars().count() + 1 + word.chars().count() <= width {
            current.push(' ');
            current.push_str(word);
        } else {
            lines.push(std::mem::take(&mut current));
            current = word.to_string();
        }
    }

    if !current.is_empty() || lines.is_empty() {
        lines.push(current);
    }

    lines
}

pub fn truncate(s: &str, max_len: usize) -> String {
    match max_len {
        0 => String::new(),
        _ if s.chars().count() <= max_len => s.to_string(),
        1 => "…".to_string(),
        _ => {
            let mut out: String = s.chars().take(max_len - 1).collect();
            out.push('…');
            out
        }
    }
}

/// `1 structure`, `3 structures`.
pub fn plural(count: usize, noun: &str) -> String {
    if count == 1 {
        format!("{count} {noun}")
    } else {
        format!("{count} {noun}s")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wrap_splits_on_width() {
        assert_eq!(wrap("the quick brown fox", 10), vec!["the quick", "brown fox"]);
        assert_eq!(wrap("", 10), vec![""]);
    }

    #[test]
    fn truncate_marks_cut_text() {
        assert_eq!(truncate("hello", 5), "hello");
        assert_eq!(truncate("hello world", 8), "hello w…");
        assert_eq!(truncate("日本語テスト", 4), "日本語…");
        assert_eq!(truncate("abc", 1), "…");
    }

    #[test]
    fn plural_counts() {
        assert_eq!(plural(1, "folder"), "1 folder");
        assert_eq!(plural(0, "folder"), "0 folders");
    }
}
