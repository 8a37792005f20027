//! Compiled-in digest configuration.
//!
//! There is no configuration file. The recency window, the per-topic item cap
//! and the eight-week topic table live here and are read through [`DIGEST`].

use crate::models::Topic;

/// Only articles published within this many days are requested.
pub const RECENCY_DAYS: u32 = 7;

/// Maximum number of items rendered per topic.
pub const MAX_ITEMS: usize = 7;

/// The fixed weekly topic table, in week order.
pub const TOPICS: [Topic; 8] = [
    Topic {
        week: 1,
        title: "Unethical Behaviors in Organizations",
        queries: &[
            r#"fraud OR bribery OR corruption OR whistleblower OR misconduct OR "ethics scandal""#,
        ],
    },
    Topic {
        week: 2,
        title: "Historical Perspective on Ethics",
        queries: &[r#""landmark case" ethics OR "years after" scandal OR "history of" business ethics"#],
    },
    Topic {
        week: 3,
        title: "Hiring Ethical People & Code of Conduct",
        queries: &[r#"hiring discrimination OR "code of conduct" company OR HR ethics lawsuit"#],
    },
    Topic {
        week: 4,
        title: "Ethical Decision Making & Training",
        queries: &[r#""ethics training" OR compliance training OR "culture of compliance""#],
    },
    Topic {
        week: 5,
        title: "Diversity and Ethics Reporting Systems",
        queries: &["DEI OR discrimination OR harassment AND (hotline OR reporting OR retaliation)"],
    },
    Topic {
        week: 6,
        title: "Managers as Ethical Leaders & Empowering Ethical Employees",
        queries: &["ethical leadership OR servant leadership OR toxic leadership OR empowerment"],
    },
    Topic {
        week: 7,
        title: "Community Outreach and Respect",
        queries: &[
            r#"CSR OR "community outreach" OR corporate philanthropy OR stakeholder engagement"#,
        ],
    },
    Topic {
        week: 8,
        title: "Final Reflections on Management Ethics",
        queries: &[
            "business ethics trust OR corporate governance integrity OR ethical leadership lessons",
        ],
    },
];

/// Parameters for one digest run.
#[derive(Debug, Clone, Copy)]
pub struct DigestConfig {
    pub recency_days: u32,
    pub max_items: usize,
    pub topics: &'static [Topic],
}

/// The configuration the binary runs with.
pub static DIGEST: DigestConfig = DigestConfig {
    recency_days: RECENCY_DAYS,
    max_items: MAX_ITEMS,
    topics: &TOPICS,
};
