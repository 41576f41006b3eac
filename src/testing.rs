pub fn init_test() {
    drop(env_logger::try_init());
}

/// Strips the blank lines around `text` and the indentation common to its
/// remaining lines, so expected output can be written as an indented literal.
/// The result has no trailing new line.
pub fn dedent(text: &str) -> String {
    let lines: Vec<&str> = text.lines().collect();
    let first = lines.iter().position(|l| !l.trim().is_empty());
    let last = lines.iter().rposition(|l| !l.trim().is_empty());
    let lines = match (first, last) {
        (Some(first), Some(last)) => &lines[first..=last],
        _ => return String::new(),
    };

    let margin = lines
        .iter()
        .filter(|l| !l.trim().is_empty())
        .map(|l| l.len() - l.trim_start().len())
        .min()
        .unwrap_or(0);

    lines
        .iter()
        .map(|l| if l.len() >= margin { &l[margin..] } else { "" })
        .collect::<Vec<_>>()
        .join("\n")
}

#[test]
fn dedent_test() {
    fn case(input: &str, expected: &str) {
        assert_eq!(dedent(input), expected);
    }

    case("", "");
    case("abc", "abc");
    case("\n    a\n      b\n    c\n  ", "a\n  b\nc");
    case("\n    a\n\n    b\n", "a\n\nb");
}
