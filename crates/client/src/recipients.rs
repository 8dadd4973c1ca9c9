use notify::address::is_email;

/// Split a comma separated recipient field, trimming and dropping blanks
pub fn parse_recipients(input: &str) -> Vec<String> {
    input
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

pub fn all_valid(recipients: &[String]) -> bool {
    recipients.iter().all(|r| is_email(r))
}
