use chrono::{Datelike, NaiveDate};

pub struct Quote {
    pub text: &'static str,
    pub author: &'static str,
}

pub const QUOTES: [Quote; 10] = [
    Quote {
        text: "Every cold shower is a vote for the person you're becoming",
        author: "James Clear (adapted)",
    },
    Quote {
        text: "Comfort is the enemy of progress. Choose discomfort, choose growth.",
        author: "BDBT",
    },
    Quote {
        text: "The cold is your teacher. Listen to it.",
        author: "Wim Hof",
    },
    Quote {
        text: "Discipline is choosing between what you want now and what you want most.",
        author: "Abraham Lincoln",
    },
    Quote {
        text: "You are one cold shower away from a better mood.",
        author: "Anonymous",
    },
    Quote {
        text: "Do something today that your future self will thank you for.",
        author: "Sean Patrick Flanery",
    },
    Quote {
        text: "The hard path is the easy path in disguise.",
        author: "Anonymous",
    },
    Quote {
        text: "A daily dose of discomfort builds a lifetime of resilience.",
        author: "BDBT",
    },
    Quote {
        text: "Willpower is a muscle. Cold water is the gym.",
        author: "Anonymous",
    },
    Quote {
        text: "Start where you are. Use what you have. Do what you can.",
        author: "Arthur Ashe",
    },
];

/// Quote for a given date. Deterministic so the dashboard shows the same
/// quote all day.
pub fn quote_of_the_day(date: NaiveDate) -> &'static Quote {
    let idx = date.ordinal0() as usize % QUOTES.len();
    &QUOTES[idx]
}
