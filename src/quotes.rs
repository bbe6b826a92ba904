use chrono::{Datelike, NaiveDate};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Quote {
    pub content: &'static str,
    pub author: &'static str,
}

const QUOTES: [Quote; 10] = [
    Quote {
        content: "The only way to do great work is to love what you do.",
        author: "Steve Jobs",
    },
    Quote {
        content: "Happiness is not something ready-made. It comes from your own actions.",
        author: "Dalai Lama",
    },
    Quote {
        content: "The future depends on what you do today.",
        author: "Mahatma Gandhi",
    },
    Quote {
        content: "What you get by achieving your goals is not as important as \
                  what you become by achieving your goals.",
        author: "Zig Ziglar",
    },
    Quote {
        content: "Believe you can and you're halfway there.",
        author: "Theodore Roosevelt",
    },
    Quote {
        content: "Everything you've ever wanted is on the other side of fear.",
        author: "George Addair",
    },
    Quote {
        content: "Success is not final, failure is not fatal: \
                  it is the courage to continue that counts.",
        author: "Winston Churchill",
    },
    Quote {
        content: "The mind is everything. What you think you become.",
        author: "Buddha",
    },
    Quote {
        content: "Your time is limited, don't waste it living someone else's life.",
        author: "Steve Jobs",
    },
    Quote {
        content: "Every moment is a fresh beginning.",
        author: "T.S. Eliot",
    },
];

pub fn all() -> &'static [Quote] {
    &QUOTES
}

/// Same quote all day, next one tomorrow.
pub fn daily_quote(date: NaiveDate) -> Quote {
    let day = date.num_days_from_ce().rem_euclid(QUOTES.len() as i32);
    QUOTES[day as usize]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quote_is_stable_within_a_day() {
        let date = NaiveDate::from_ymd_opt(2024, 3, 14).unwrap();
        assert_eq!(daily_quote(date), daily_quote(date));
    }

    #[test]
    fn consecutive_days_cycle_through_every_quote() {
        let start = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        let mut seen: Vec<Quote> = (0..QUOTES.len() as i64)
            .map(|offset| daily_quote(start + chrono::Duration::days(offset)))
            .collect();
        seen.sort_by_key(|quote| quote.content);
        seen.dedup();
        assert_eq!(seen.len(), all().len());
    }

    #[test]
    fn quotes_are_never_blank() {
        assert!(all()
            .iter()
            .all(|quote| !quote.content.is_empty() && !quote.author.is_empty()));
    }
}
