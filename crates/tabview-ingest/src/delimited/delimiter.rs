//! Delimiter auto-detection.

/// Delimiters considered by [`detect_delimiter`], in preference order.
pub const DELIMITER_CANDIDATES: [u8; 4] = [b',', b';', b'\t', b'|'];

/// Number of non-blank lines sampled when guessing the delimiter.
const SAMPLE_LINES: usize = 10;

/// Guesses the field delimiter from the first lines of `text`.
///
/// Each candidate is scored by how often it appears per line and how
/// consistent that count is across lines (`avg / (1 + stddev)`). Delimiters
/// inside double quotes are not counted. Ties keep the earlier candidate and
/// a sample with no candidate at all yields `,`.
pub fn detect_delimiter(text: &str) -> u8 {
    let sample: Vec<&str> = text
        .lines()
        .filter(|line| !line.trim().is_empty())
        .take(SAMPLE_LINES)
        .collect();

    if sample.is_empty() {
        return b',';
    }

    let mut best = b',';
    let mut best_score = 0.0f64;

    for &candidate in &DELIMITER_CANDIDATES {
        let counts: Vec<usize> = sample
            .iter()
            .map(|line| count_unquoted(line, candidate))
            .collect();

        let n = counts.len() as f64;
        let avg = counts.iter().sum::<usize>() as f64 / n;
        let variance = counts
            .iter()
            .map(|&count| (count as f64 - avg).powi(2))
            .sum::<f64>()
            / n;
        let score = avg / (1.0 + variance.sqrt());

        if score > best_score {
            best_score = score;
            best = candidate;
        }
    }

    tracing::debug!(delimiter = %char::from(best).escape_default(), "detected delimiter");
    best
}

/// Counts `delimiter` bytes outside double-quoted sections of one line.
fn count_unquoted(line: &str, delimiter: u8) -> usize {
    let mut in_quotes = false;
    let mut count = 0;
    for byte in line.bytes() {
        if byte == b'"' {
            in_quotes = !in_quotes;
        } else if byte == delimiter && !in_quotes {
            count += 1;
        }
    }
    count
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detect_common_delimiters() {
        assert_eq!(detect_delimiter("a,b,c\nd,e,f"), b',');
        assert_eq!(detect_delimiter("a;b;c\nd;e;f"), b';');
        assert_eq!(detect_delimiter("a\tb\tc\n1\t2\t3"), b'\t');
        assert_eq!(detect_delimiter("a|b\n1|2"), b'|');
    }

    #[test]
    fn test_consistency_beats_frequency() {
        // Commas appear more often overall but only in one line.
        let text = "name;note\nAda;a,b,c,d,e\nBob;x\nCy;y\n";
        assert_eq!(detect_delimiter(text), b';');
    }

    #[test]
    fn test_quoted_delimiters_are_ignored() {
        let text = "a;b\n\"1,2,3\";4\n\"5,6\";7\n";
        assert_eq!(detect_delimiter(text), b';');
    }

    #[test]
    fn test_single_column_defaults_to_comma() {
        assert_eq!(detect_delimiter("name\nAda\nBob\n"), b',');
        assert_eq!(detect_delimiter(""), b',');
    }
}
