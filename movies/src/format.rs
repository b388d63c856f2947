pub fn runtime(minutes: u64) -> String {
    if minutes < 60 {
        return format!("{minutes}m");
    }
    format!("{}h {}m", minutes / 60, minutes % 60)
}

pub fn revenue(millions: f64) -> String {
    if millions == 0.0 || millions.is_nan() {
        return " --- ".to_string();
    }
    format!("${millions} M")
}

pub fn rating(rating: f64) -> String {
    format!("{rating}/10")
}

pub fn genres(genres: &[String]) -> String {
    genres.join(", ")
}

/// Five-star rendering of a rating out of ten: full, half and empty stars.
pub fn stars(rating: f64) -> String {
    let rating = rating.clamp(0.0, 10.0);
    let full = (rating / 2.0).floor() as usize;
    let half = (rating % 2.0).floor().min(1.0) as usize;
    let empty = 5 - full - half;
    format!("{}{}{}", "★".repeat(full), "⯪".repeat(half), "☆".repeat(empty))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn runtime_under_an_hour() {
        assert_eq!(runtime(45), "45m");
        assert_eq!(runtime(0), "0m");
    }

    #[test]
    fn runtime_in_hours() {
        assert_eq!(runtime(125), "2h 5m");
        assert_eq!(runtime(60), "1h 0m");
    }

    #[test]
    fn revenue_placeholder() {
        assert_eq!(revenue(0.0), " --- ");
        assert_eq!(revenue(120.0), "$120 M");
        assert_eq!(revenue(333.13), "$333.13 M");
    }

    #[test]
    fn star_counts() {
        assert_eq!(stars(8.1), "★★★★☆");
        assert_eq!(stars(7.0), "★★★⯪☆");
        assert_eq!(stars(10.0), "★★★★★");
        assert_eq!(stars(0.5), "☆☆☆☆☆");
    }
}
