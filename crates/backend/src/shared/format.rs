/// Число с разделителями тысяч (точками): `1234567` -> `"1.234.567"`
pub fn format_number(n: usize) -> String {
    let digits = n.to_string();
    let head = digits.len() % 3;
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (i + 3 - head) % 3 == 0 {
            out.push('.');
        }
        out.push(ch);
    }
    out
}

/// Размер ответа для лога запросов: байты до 10 KB, дальше килобайты
pub fn format_size(bytes: usize) -> String {
    if bytes < 10 * 1024 {
        format!("{} B", format_number(bytes))
    } else {
        format!("{} KB", format_number(bytes / 1024))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_number() {
        assert_eq!(format_number(0), "0");
        assert_eq!(format_number(999), "999");
        assert_eq!(format_number(1000), "1.000");
        assert_eq!(format_number(12345), "12.345");
        assert_eq!(format_number(1234567), "1.234.567");
    }

    #[test]
    fn test_format_size_switches_to_kilobytes() {
        assert_eq!(format_size(512), "512 B");
        assert_eq!(format_size(10239), "10.239 B");
        assert_eq!(format_size(2 * 1024 * 1024), "2.048 KB");
    }
}
