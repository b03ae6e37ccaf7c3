//! Builders shared by domain service tests.

use std::sync::Arc;

use chrono::{DateTime, Local, Utc};
use mockable::Clock;

use super::{Category, Title, Work, WorkDraft, WorkId};

/// Clock frozen at a fixed instant.
pub(crate) struct FixtureClock {
    utc_now: DateTime<Utc>,
}

impl Clock for FixtureClock {
    fn local(&self) -> DateTime<Local> {
        self.utc_now.with_timezone(&Local)
    }

    fn utc(&self) -> DateTime<Utc> {
        self.utc_now
    }
}

pub(crate) fn fixture_timestamp() -> DateTime<Utc> {
    DateTime::from_timestamp(1_710_000_000, 0).expect("valid fixture timestamp")
}

pub(crate) fn fixture_clock() -> Arc<dyn Clock> {
    Arc::new(FixtureClock {
        utc_now: fixture_timestamp(),
    })
}

pub(crate) fn sample_work(title: &str, category: Category) -> Work {
    Work::new(
        WorkId::random(),
        WorkDraft {
            title: Title::new(title).expect("valid title"),
            category,
        },
        fixture_timestamp(),
    )
}
