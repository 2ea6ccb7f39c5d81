//! Download filenames: `"{name} Resume for {company} ({YYYY-MM-DD}).docx"`.

use chrono::NaiveDate;

const FALLBACK_NAME: &str = "Resume";

pub fn resume_filename(name: &str, company: &str, date: NaiveDate) -> String {
    build_filename(name, "Resume", company, date)
}

pub fn cover_letter_filename(name: &str, company: &str, date: NaiveDate) -> String {
    build_filename(name, "Cover Letter", company, date)
}

fn build_filename(name: &str, kind: &str, company: &str, date: NaiveDate) -> String {
    let name = sanitize(name);
    let name = if name.is_empty() { FALLBACK_NAME.to_string() } else { name };
    let company = sanitize(company);
    let date = date.format("%Y-%m-%d");
    if company.is_empty() {
        format!("{name} {kind} ({date}).docx")
    } else {
        format!("{name} {kind} for {company} ({date}).docx")
    }
}

/// Replaces characters that are unsafe in filenames or header values and collapses
/// whitespace.
fn sanitize(part: &str) -> String {
    part.chars()
        .map(|c| match c {
            '/' | '\\' | ':' | '*' | '?' | '"' | '<' | '>' | '|' => '-',
            c if c.is_control() => ' ',
            c => c,
        })
        .collect::<String>()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 3, 7).unwrap()
    }

    #[test]
    fn test_resume_filename_format() {
        assert_eq!(
            resume_filename("Jane Doe", "Acme", day()),
            "Jane Doe Resume for Acme (2025-03-07).docx"
        );
        assert_eq!(
            cover_letter_filename("Jane Doe", "Acme", day()),
            "Jane Doe Cover Letter for Acme (2025-03-07).docx"
        );
    }

    #[test]
    fn test_blank_name_falls_back() {
        assert_eq!(
            resume_filename("  ", "Acme", day()),
            "Resume Resume for Acme (2025-03-07).docx"
        );
    }

    #[test]
    fn test_missing_company_drops_for_clause() {
        assert_eq!(
            resume_filename("Jane", "", day()),
            "Jane Resume (2025-03-07).docx"
        );
    }

    #[test]
    fn test_path_separators_are_replaced() {
        assert_eq!(
            resume_filename("Jane/Doe", "A\\B: \"Corp\"\n", day()),
            "Jane-Doe Resume for A-B- -Corp- (2025-03-07).docx"
        );
    }
}
