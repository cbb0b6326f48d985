use crate::models::ResultType;
use crate::services::quantity::{DistanceParts, TimeParts};

/// Placeholder shown for results without a value.
pub const EMPTY_RESULT: &str = "-";

/// Renders a stored magnitude for display.
///
/// Absent values and zero both render as `"-"`: zero is what clients send
/// for a result that has not been entered yet.
pub fn format_result(value: Option<i64>, result_type: ResultType) -> String {
    let value = match value {
        Some(value) if value > 0 => value,
        _ => return EMPTY_RESULT.to_string(),
    };

    match result_type {
        ResultType::Time => format_millis(value),
        ResultType::Points => format!("{} pt", value),
        ResultType::Distance | ResultType::Height | ResultType::Length => {
            format_centimetres(value)
        }
    }
}

/// `H:MM:SS,CC`, `M:SS,CC` or `SS,CCs` depending on the largest non-zero
/// unit. Milliseconds are truncated to hundredths.
pub fn format_millis(millis: i64) -> String {
    let parts = TimeParts::from_millis(millis);
    let hundredths = parts.milliseconds / 10;

    if parts.hours > 0 {
        format!(
            "{}:{:02}:{:02},{:02}",
            parts.hours, parts.minutes, parts.seconds, hundredths
        )
    } else if parts.minutes > 0 {
        format!("{}:{:02},{:02}", parts.minutes, parts.seconds, hundredths)
    } else {
        format!("{:02},{:02}s", parts.seconds, hundredths)
    }
}

pub fn format_centimetres(centimetres: i64) -> String {
    let parts = DistanceParts::from_centimetres(centimetres);
    format!("{},{} meter", parts.metres, parts.centimetres)
}

pub fn result_type_label(result_type: ResultType, short: bool) -> &'static str {
    if short {
        match result_type {
            ResultType::Time => "tid",
            ResultType::Points => "pt",
            ResultType::Distance => "dist.",
            ResultType::Height => "højde",
            ResultType::Length => "længde",
        }
    } else {
        match result_type {
            ResultType::Time => "Tid",
            ResultType::Points => "Point",
            ResultType::Distance => "Distance i meter",
            ResultType::Height => "Højde i meter",
            ResultType::Length => "Længde i meter",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_and_missing_render_placeholder() {
        for result_type in ResultType::ALL {
            assert_eq!(format_result(Some(0), result_type), "-");
            assert_eq!(format_result(None, result_type), "-");
        }
    }

    #[test]
    fn test_time_with_minutes() {
        assert_eq!(format_result(Some(65_432), ResultType::Time), "1:05,43");
        assert_eq!(format_result(Some(600_000), ResultType::Time), "10:00,00");
    }

    #[test]
    fn test_time_with_hours() {
        assert_eq!(format_result(Some(3_725_007), ResultType::Time), "1:02:05,00");
        assert_eq!(format_result(Some(7_384_560), ResultType::Time), "2:03:04,56");
    }

    #[test]
    fn test_time_under_a_minute() {
        assert_eq!(format_result(Some(9_500), ResultType::Time), "09,50s");
        assert_eq!(format_result(Some(12_345), ResultType::Time), "12,34s");
        assert_eq!(format_result(Some(45), ResultType::Time), "00,04s");
    }

    #[test]
    fn test_fraction_is_truncated() {
        assert_eq!(format_millis(10_999), "10,99s");
        assert_eq!(format_millis(61_009), "1:01,00");
    }

    #[test]
    fn test_points() {
        assert_eq!(format_result(Some(17), ResultType::Points), "17 pt");
    }

    #[test]
    fn test_centimetre_types() {
        assert_eq!(format_result(Some(812), ResultType::Distance), "8,12 meter");
        assert_eq!(format_result(Some(805), ResultType::Length), "8,5 meter");
        assert_eq!(format_result(Some(95), ResultType::Height), "0,95 meter");
    }

    #[test]
    fn test_labels_cover_every_type() {
        for result_type in ResultType::ALL {
            assert!(!result_type_label(result_type, true).is_empty());
            assert!(!result_type_label(result_type, false).is_empty());
        }
        assert_eq!(result_type_label(ResultType::Points, false), "Point");
        assert_eq!(result_type_label(ResultType::Points, true), "pt");
    }
}
