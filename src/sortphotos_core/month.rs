/// Calendar month, used to name the month level of the target tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Month {
    January,
    February,
    March,
    April,
    May,
    June,
    July,
    August,
    September,
    October,
    November,
    December,
}

const ALL: [Month; 12] = [
    Month::January,
    Month::February,
    Month::March,
    Month::April,
    Month::May,
    Month::June,
    Month::July,
    Month::August,
    Month::September,
    Month::October,
    Month::November,
    Month::December,
];

impl Month {
    /// Look up a month by its number (1-12).
    pub fn from_number(number: u8) -> Option<Month> {
        match number {
            1..=12 => Some(ALL[usize::from(number) - 1]),
            _ => None,
        }
    }

    /// Directory label, e.g. `07_Juli`.
    pub fn label(&self) -> &'static str {
        match self {
            Month::January => "01_Januar",
            Month::February => "02_Februar",
            Month::March => "03_März",
            Month::April => "04_April",
            Month::May => "05_Mai",
            Month::June => "06_Juni",
            Month::July => "07_Juli",
            Month::August => "08_August",
            Month::September => "09_September",
            Month::October => "10_Oktober",
            Month::November => "11_November",
            Month::December => "12_Dezember",
        }
    }
}

impl From<time::Month> for Month {
    fn from(month: time::Month) -> Self {
        ALL[usize::from(u8::from(month)) - 1]
    }
}

impl std::fmt::Display for Month {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_number_is_closed() {
        assert_eq!(Month::from_number(0), None);
        assert_eq!(Month::from_number(13), None);
        assert_eq!(Month::from_number(1), Some(Month::January));
        assert_eq!(Month::from_number(12), Some(Month::December));
    }

    #[test]
    fn test_labels() {
        assert_eq!(Month::March.label(), "03_März");
        assert_eq!(Month::July.label(), "07_Juli");
        assert_eq!(Month::December.to_string(), "12_Dezember");
        for n in 1..=12u8 {
            let label = Month::from_number(n).unwrap().label();
            assert!(label.starts_with(&format!("{:02}_", n)));
        }
    }

    #[test]
    fn test_from_time_month() {
        assert_eq!(Month::from(time::Month::July), Month::July);
        assert_eq!(Month::from(time::Month::January), Month::January);
        assert_eq!(Month::from(time::Month::December), Month::December);
    }
}
