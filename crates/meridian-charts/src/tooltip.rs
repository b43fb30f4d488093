//! Tooltip text shared by both charts

/// What a tooltip shows for one hovered element
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TooltipContent {
    /// Heading line, if any
    pub label: Option<String>,
    /// Entry name
    pub name: String,
    /// Entry value
    pub value: String,
}

impl TooltipContent {
    /// Lines in drawing order
    #[must_use]
    pub fn lines(&self) -> Vec<String> {
        let mut lines = Vec::with_capacity(2);
        if let Some(label) = &self.label {
            lines.push(label.clone());
        }
        lines.push(format!("{} : {}", self.name, self.value));
        lines
    }
}

/// Render a value the way the dashboard prints numbers: integers without a
/// fractional part, everything else in shortest form
#[must_use]
pub fn format_value(value: f64) -> String {
    format!("{}", value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_value() {
        assert_eq!(format_value(1.0), "1");
        assert_eq!(format_value(3.25), "3.25");
        assert_eq!(format_value(-4.0), "-4");
    }

    #[test]
    fn test_lines_with_and_without_heading() {
        let plain = TooltipContent {
            label: None,
            name: "North".to_string(),
            value: "12".to_string(),
        };
        assert_eq!(plain.lines(), vec!["North : 12"]);

        let headed = TooltipContent {
            label: Some("X: 1".to_string()),
            ..plain
        };
        assert_eq!(headed.lines(), vec!["X: 1", "North : 12"]);
    }
}
