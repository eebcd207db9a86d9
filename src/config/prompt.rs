use crate::utils::error::Result;
use std::io::{BufRead, Write};
use std::num::IntErrorKind;

pub const PAGE_LIMIT_PROMPT: &str = "Enter number of pages to scrape (leave blank for all): ";
pub const INVALID_PAGE_LIMIT: &str = "Invalid input. Scraping all pages.";

/// 使用者輸入的頁數上限
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageLimitAnswer {
    /// 整數；零代表不限制，負數代表一頁都不抓
    Number(Option<i64>),
    /// 空白或非整數
    Invalid,
}

impl PageLimitAnswer {
    pub fn limit(self) -> Option<i64> {
        match self {
            PageLimitAnswer::Number(limit) => limit,
            PageLimitAnswer::Invalid => None,
        }
    }
}

pub fn parse_page_limit(input: &str) -> PageLimitAnswer {
    match input.trim().parse::<i64>() {
        Ok(0) => PageLimitAnswer::Number(None),
        Ok(limit) => PageLimitAnswer::Number(Some(limit)),
        // Out-of-range integers are still numbers: huge means unbounded, hugely negative means none.
        Err(e) if *e.kind() == IntErrorKind::PosOverflow => PageLimitAnswer::Number(None),
        Err(e) if *e.kind() == IntErrorKind::NegOverflow => PageLimitAnswer::Number(Some(i64::MIN)),
        Err(_) => PageLimitAnswer::Invalid,
    }
}

pub fn prompt_page_limit<R: BufRead, W: Write>(input: &mut R, output: &mut W) -> Result<Option<i64>> {
    write!(output, "{}", PAGE_LIMIT_PROMPT)?;
    output.flush()?;

    let mut line = String::new();
    input.read_line(&mut line)?;

    let answer = parse_page_limit(&line);
    if answer == PageLimitAnswer::Invalid {
        writeln!(output, "{}", INVALID_PAGE_LIMIT)?;
    }
    Ok(answer.limit())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn ask(answer: &str) -> (Option<i64>, String) {
        let mut input = Cursor::new(answer.to_string());
        let mut output = Vec::new();
        let limit = prompt_page_limit(&mut input, &mut output).unwrap();
        (limit, String::from_utf8(output).unwrap())
    }

    #[test]
    fn test_parse_page_limit() {
        assert_eq!(parse_page_limit("3"), PageLimitAnswer::Number(Some(3)));
        assert_eq!(parse_page_limit("  12 \n"), PageLimitAnswer::Number(Some(12)));
        assert_eq!(parse_page_limit("0"), PageLimitAnswer::Number(None));
        assert_eq!(parse_page_limit("-1"), PageLimitAnswer::Number(Some(-1)));
        assert_eq!(parse_page_limit("5000000000"), PageLimitAnswer::Number(Some(5_000_000_000)));
        assert_eq!(
            parse_page_limit("99999999999999999999"),
            PageLimitAnswer::Number(None)
        );
        assert_eq!(parse_page_limit(""), PageLimitAnswer::Invalid);
        assert_eq!(parse_page_limit("all"), PageLimitAnswer::Invalid);
        assert_eq!(parse_page_limit("2.5"), PageLimitAnswer::Invalid);
    }

    #[test]
    fn test_prompt_reads_limit() {
        let (limit, output) = ask("4\n");

        assert_eq!(limit, Some(4));
        assert_eq!(output, PAGE_LIMIT_PROMPT);
    }

    #[test]
    fn test_zero_means_no_limit_without_message() {
        let (limit, output) = ask("0\n");

        assert_eq!(limit, None);
        assert_eq!(output, PAGE_LIMIT_PROMPT);
    }

    #[test]
    fn test_negative_answer_is_kept_as_limit() {
        let (limit, output) = ask("-1\n");

        assert_eq!(limit, Some(-1));
        assert!(!output.contains(INVALID_PAGE_LIMIT));
    }

    #[test]
    fn test_blank_answer_means_no_limit() {
        let (limit, output) = ask("\n");

        assert_eq!(limit, None);
        assert!(output.ends_with("Invalid input. Scraping all pages.\n"));
    }

    #[test]
    fn test_closed_stdin_means_no_limit() {
        let (limit, output) = ask("");

        assert_eq!(limit, None);
        assert!(output.ends_with("Invalid input. Scraping all pages.\n"));
    }
}
