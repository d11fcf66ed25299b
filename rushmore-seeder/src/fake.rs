use std::collections::HashSet;

use chrono::{DateTime, TimeDelta, Utc};
use rand::seq::IndexedRandom;
use rand::Rng;

const FIRST_NAMES: &[&str] = &[
    "James", "Mary", "Robert", "Patricia", "John", "Jennifer", "Michael", "Linda", "David",
    "Elizabeth", "William", "Barbara", "Richard", "Susan", "Joseph", "Jessica", "Thomas", "Sarah",
    "Charles", "Karen", "Daniel", "Lisa", "Matthew", "Nancy", "Anthony", "Betty", "Mark",
    "Margaret", "Steven", "Sandra", "Paul", "Ashley", "Andrew", "Emily", "Joshua", "Donna",
    "Kevin", "Michelle", "Brian", "Carol",
];

const LAST_NAMES: &[&str] = &[
    "Smith", "Johnson", "Williams", "Brown", "Jones", "Garcia", "Miller", "Davis", "Rodriguez",
    "Martinez", "Hernandez", "Lopez", "Gonzalez", "Wilson", "Anderson", "Thomas", "Taylor",
    "Moore", "Jackson", "Martin", "Lee", "Perez", "Thompson", "White", "Harris", "Sanchez",
    "Clark", "Ramirez", "Lewis", "Robinson", "Walker", "Young", "Allen", "King", "Wright",
    "Scott", "Torres", "Nguyen", "Hill", "Flores",
];

const STREET_NAMES: &[&str] = &[
    "Main", "Oak", "Pine", "Maple", "Cedar", "Elm", "Washington", "Lake", "Hill", "Park",
    "Sunset", "Highland", "Lincoln", "Jackson", "Church", "River", "Franklin", "Center",
];

const STREET_SUFFIXES: &[&str] = &[
    "Street", "Avenue", "Boulevard", "Road", "Lane", "Drive", "Court", "Place", "Way",
];

const FREE_EMAIL_DOMAINS: &[&str] = &["gmail.com", "yahoo.com", "hotmail.com"];

pub const MAX_PHONE_LEN: usize = 20;

/// Field-value generator backed by an injected random source.
pub struct FakeData<R> {
    rng: R,
    emails: EmailRegistry,
}

impl<R: Rng> FakeData<R> {
    pub fn new(rng: R) -> Self {
        Self {
            rng,
            emails: EmailRegistry::default(),
        }
    }

    pub fn rng(&mut self) -> &mut R {
        &mut self.rng
    }

    pub fn first_name(&mut self) -> String {
        pick(&mut self.rng, FIRST_NAMES).to_string()
    }

    pub fn last_name(&mut self) -> String {
        pick(&mut self.rng, LAST_NAMES).to_string()
    }

    pub fn street_address(&mut self) -> String {
        let number = self.rng.random_range(1..=9999);
        let street = pick(&mut self.rng, STREET_NAMES);
        let suffix = pick(&mut self.rng, STREET_SUFFIXES);
        if self.rng.random_bool(0.2) {
            let unit = self.rng.random_range(1..=999);
            format!("{} {} {} Apt. {}", number, street, suffix, unit)
        } else {
            format!("{} {} {}", number, street, suffix)
        }
    }

    /// North American number in one of a few common layouts, at most 20 chars.
    pub fn phone_number(&mut self) -> String {
        let area = self.rng.random_range(200..=999);
        let exchange = self.rng.random_range(200..=999);
        let line = self.rng.random_range(0..=9999);
        let phone = match self.rng.random_range(0..4) {
            0 => format!("({}) {}-{:04}", area, exchange, line),
            1 => format!("{}-{}-{:04}", area, exchange, line),
            2 => format!("+1-{}-{}-{:04}", area, exchange, line),
            _ => {
                let ext = self.rng.random_range(1..=99999);
                format!("{}.{}.{:04}x{}", area, exchange, line, ext)
            }
        };
        truncate(phone, MAX_PHONE_LEN)
    }

    /// Marks emails already taken elsewhere so `unique_email` steers clear of them.
    pub fn reserve_emails<I>(&mut self, emails: I)
    where
        I: IntoIterator<Item = String>,
    {
        for email in emails {
            self.emails.insert(email);
        }
    }

    pub fn free_email_domain(&mut self) -> &'static str {
        pick(&mut self.rng, FREE_EMAIL_DOMAINS)
    }

    /// Email derived from the name, unique across everything this generator
    /// has produced so far.
    pub fn unique_email(&mut self, first_name: &str, last_name: &str) -> String {
        let base = format!("{}.{}", first_name.to_lowercase(), last_name.to_lowercase());
        let domain = self.free_email_domain();
        let mut email = format!("{}@{}", base, domain);
        let mut counter = 1u32;
        while self.emails.contains(&email) {
            let domain = self.free_email_domain();
            email = format!("{}{}@{}", base, counter, domain);
            counter += 1;
        }
        self.emails.insert(email.clone());
        email
    }

    /// Uniform timestamp in `[start, end]`, at second resolution.
    pub fn date_time_between(&mut self, start: DateTime<Utc>, end: DateTime<Utc>) -> DateTime<Utc> {
        let span = (end - start).num_seconds();
        if span <= 0 {
            return start;
        }
        start + TimeDelta::seconds(self.rng.random_range(0..=span))
    }
}

#[derive(Default, Debug)]
pub struct EmailRegistry {
    seen: HashSet<String>,
}

impl EmailRegistry {
    pub fn contains(&self, email: &str) -> bool {
        self.seen.contains(email)
    }

    pub fn insert(&mut self, email: String) -> bool {
        self.seen.insert(email)
    }
}

fn pick<R: Rng>(rng: &mut R, values: &'static [&'static str]) -> &'static str {
    values.choose(rng).copied().unwrap_or_default()
}

fn truncate(mut value: String, max: usize) -> String {
    if let Some((idx, _)) = value.char_indices().nth(max) {
        value.truncate(idx);
    }
    value
}
