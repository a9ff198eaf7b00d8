use crate::layout::WeightedLabel;
use once_cell::sync::Lazy;
use regex::Regex;
use thiserror::Error;

// `text weight [magnitude[%]]`, fields separated by tabs, commas or spaces.
// Quote the text when it ends in something that looks like a number.
static LABEL_LINE_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r#"^(?:"(?P<quoted>[^"]*)"|(?P<text>.+?))\s*[,\t ]\s*(?P<weight>[-+]?(?:\d+\.?\d*|\.\d+)(?:[eE][-+]?\d+)?)(?:\s*[,\t ]\s*(?P<magnitude>[-+]?(?:\d+\.?\d*|\.\d+))\s*%?)?$"#,
    )
    .unwrap()
});

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ParseError {
    #[error("line {line}: {message}")]
    Line { line: usize, message: String },
    #[error("invalid label list: {0}")]
    Json(String),
}

/// Parses a label list: either a JSON/JSON5 array of
/// `{"text", "weight", "magnitude"}` objects, or one label per line.
pub fn parse_labels(input: &str) -> Result<Vec<WeightedLabel>, ParseError> {
    let trimmed = input.trim_start();
    if trimmed.starts_with('[') {
        return parse_json_labels(trimmed);
    }

    let mut labels = Vec::new();
    for (idx, raw_line) in input.lines().enumerate() {
        let line = raw_line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        labels.push(parse_label_line(line).map_err(|message| ParseError::Line {
            line: idx + 1,
            message,
        })?);
    }
    Ok(labels)
}

fn parse_json_labels(input: &str) -> Result<Vec<WeightedLabel>, ParseError> {
    match serde_json::from_str::<Vec<WeightedLabel>>(input) {
        Ok(labels) => Ok(labels),
        Err(json_err) => json5::from_str::<Vec<WeightedLabel>>(input)
            .map_err(|_| ParseError::Json(json_err.to_string())),
    }
}

fn parse_label_line(line: &str) -> Result<WeightedLabel, String> {
    let caps = LABEL_LINE_RE
        .captures(line)
        .ok_or_else(|| format!("expected `text weight [magnitude]`, got {line:?}"))?;
    let text = caps
        .name("quoted")
        .or_else(|| caps.name("text"))
        .map(|m| m.as_str().trim())
        .unwrap_or_default();
    if text.is_empty() {
        return Err("label text is empty".to_string());
    }
    let weight = parse_number(caps.name("weight").map(|m| m.as_str()), "weight")?;
    let magnitude = match caps.name("magnitude") {
        Some(m) => parse_number(Some(m.as_str()), "magnitude")?,
        None => 0.0,
    };
    Ok(WeightedLabel::new(text, weight, magnitude))
}

fn parse_number(raw: Option<&str>, field: &str) -> Result<f32, String> {
    let raw = raw.ok_or_else(|| format!("missing {field}"))?;
    raw.parse::<f32>()
        .map_err(|err| format!("invalid {field} {raw:?}: {err}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_whitespace_lines() {
        let labels = parse_labels("alpha 10 42\nbeta 5\n").unwrap();
        assert_eq!(
            labels,
            vec![
                WeightedLabel::new("alpha", 10.0, 42.0),
                WeightedLabel::new("beta", 5.0, 0.0),
            ]
        );
    }

    #[test]
    fn parses_tab_and_comma_separators() {
        let labels = parse_labels("new york\t12\t30%\nsan jose, 4.5, 12.5").unwrap();
        assert_eq!(labels[0], WeightedLabel::new("new york", 12.0, 30.0));
        assert_eq!(labels[1], WeightedLabel::new("san jose", 4.5, 12.5));
    }

    #[test]
    fn quoted_text_may_end_in_digits() {
        let labels = parse_labels("\"route 66\" 10 5").unwrap();
        assert_eq!(labels[0], WeightedLabel::new("route 66", 10.0, 5.0));
    }

    #[test]
    fn skips_comments_and_blank_lines() {
        let labels = parse_labels("# keywords\n\nrust 3\n").unwrap();
        assert_eq!(labels.len(), 1);
    }

    #[test]
    fn reports_line_number() {
        let err = parse_labels("rust 3\nbroken\n").unwrap_err();
        assert!(matches!(err, ParseError::Line { line: 2, .. }), "{err}");
    }

    #[test]
    fn parses_json_array() {
        let labels =
            parse_labels(r#"[{"text": "alpha", "weight": 10, "magnitude": 40}, {"text": "beta", "weight": 2}]"#)
                .unwrap();
        assert_eq!(labels[0], WeightedLabel::new("alpha", 10.0, 40.0));
        assert_eq!(labels[1].magnitude, 0.0);
    }

    #[test]
    fn parses_json5_array() {
        let labels = parse_labels("[{text: 'alpha', weight: 1,},]").unwrap();
        assert_eq!(labels[0].text, "alpha");
    }

    #[test]
    fn rejects_malformed_json() {
        assert!(matches!(
            parse_labels("[{\"text\": 1}]"),
            Err(ParseError::Json(_))
        ));
    }
}
