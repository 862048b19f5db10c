use serde::Deserialize;

const FIELD_WIDTH: usize = 7;

/// Formatting of metric grid values. Without a grouping separator the output matches a plain `%7.0f`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize)]
pub struct NumberFormat {
    #[serde(default)]
    pub grouping_separator: Option<char>,
}

impl NumberFormat {
    pub fn plain() -> Self {
        NumberFormat { grouping_separator: None }
    }

    pub fn grouped(separator: char) -> Self {
        NumberFormat {
            grouping_separator: Some(separator),
        }
    }

    /// Rounds `meters` half away from zero and renders it right aligned, followed by `suffix`, trimmed.
    pub fn meters(&self, meters: f64, suffix: &str) -> String {
        let rounded = meters.round() as i64;
        let digits = self.group(rounded.unsigned_abs());
        let number = if rounded < 0 { format!("-{}", digits) } else { digits };

        format!("{:>width$}{}", number, suffix, width = FIELD_WIDTH).trim().to_string()
    }

    fn group(&self, value: u64) -> String {
        let digits = value.to_string();
        let Some(separator) = self.grouping_separator else {
            return digits;
        };

        let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
        for (i, digit) in digits.chars().enumerate() {
            if i > 0 && (digits.len() - i) % 3 == 0 {
                grouped.push(separator);
            }
            grouped.push(digit);
        }
        grouped
    }
}
