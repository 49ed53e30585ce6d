/// Supplies a presentation-ready label for UI or logs.
pub trait Displayable {
    fn display_label(&self) -> String;
}

/// Formats a block time in minutes as `5h 15m`.
pub fn format_block_time(minutes: u32) -> String {
    let hours = minutes / 60;
    let rest = minutes % 60;
    match (hours, rest) {
        (0, m) => format!("{m}m"),
        (h, 0) => format!("{h}h"),
        (h, m) => format!("{h}h {m}m"),
    }
}

#[cfg(test)]
mod tests {
    use super::format_block_time;

    #[test]
    fn block_time_omits_zero_components() {
        assert_eq!(format_block_time(315), "5h 15m");
        assert_eq!(format_block_time(120), "2h");
        assert_eq!(format_block_time(45), "45m");
    }
}
