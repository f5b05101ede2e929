/// Escape a string for use as a CSS identifier or inside a quoted attribute
/// value, following the CSSOM `CSS.escape()` algorithm.
pub fn css_escape(value: &str) -> String {
    let chars: Vec<char> = value.chars().collect();
    let mut out = String::with_capacity(value.len());

    for (index, &ch) in chars.iter().enumerate() {
        let code = ch as u32;

        if ch == '\0' {
            out.push('\u{FFFD}');
            continue;
        }

        let is_control = (0x01..=0x1F).contains(&code) || code == 0x7F;
        let leading_digit = index == 0 && ch.is_ascii_digit();
        let digit_after_dash = index == 1 && ch.is_ascii_digit() && chars[0] == '-';

        if is_control || leading_digit || digit_after_dash {
            out.push_str(&format!("\\{:x} ", code));
            continue;
        }

        if index == 0 && ch == '-' && chars.len() == 1 {
            out.push_str("\\-");
            continue;
        }

        if code >= 0x80 || ch == '-' || ch == '_' || ch.is_ascii_alphanumeric() {
            out.push(ch);
        } else {
            out.push('\\');
            out.push(ch);
        }
    }

    out
}
