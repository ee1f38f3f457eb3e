use crate::{MockMedia, MockPost};

const SITE: &str = "https://www.stepms.com";

struct Seed {
    id: u64,
    date: &'static str,
    slug: &'static str,
    title: &'static str,
    excerpt: &'static str,
    with_image: bool,
}

const SEEDS: [Seed; 9] = [
    Seed {
        id: 318,
        date: "2025-03-14T09:30:00",
        slug: "spring-admissions-open",
        title: "Spring admissions are now open",
        excerpt: "Applications for the spring intake are open across all foundation and diploma programmes. Our counsellors walk every family through eligibility, scholarships &amp; documents, and the key dates you should put in your calendar before the deadline closes.",
        with_image: true,
    },
    Seed {
        id: 305,
        date: "2025-02-27T14:00:00",
        slug: "staff-training-week",
        title: "Inside our <em>staff training</em> week",
        excerpt: "Five days of workshops on assessment design, classroom technology and student wellbeing.",
        with_image: true,
    },
    Seed {
        id: 297,
        date: "2025-02-03T08:15:00",
        slug: "partner-schools-2025",
        title: "Welcoming three new partner schools",
        excerpt: "We are expanding our partnership network with three schools in the region.",
        with_image: false,
    },
    Seed {
        id: 284,
        date: "2025-01-16T11:45:00",
        slug: "study-skills-guide",
        title: "A practical guide to study skills",
        excerpt: "Spaced repetition, active recall and honest self-testing beat re-reading every time.",
        with_image: true,
    },
    Seed {
        id: 271,
        date: "2024-12-19T10:00:00",
        slug: "year-in-review-2024",
        title: "2024 in review",
        excerpt: "A look back at the programmes, graduates and partners that shaped our year.",
        with_image: true,
    },
    Seed {
        id: 266,
        date: "2024-11-28T16:20:00",
        slug: "career-fair-recap",
        title: "Career fair recap",
        excerpt: "Over forty employers met our students on campus this November.",
        with_image: false,
    },
    Seed {
        id: 259,
        date: "2024-11-05T09:00:00",
        slug: "scholarship-results",
        title: "Scholarship results announced",
        excerpt: "Congratulations to this year&#8217;s merit scholarship recipients.",
        with_image: true,
    },
    Seed {
        id: 248,
        date: "2024-10-10T13:30:00",
        slug: "parent-information-evening",
        title: "Parent information evening",
        excerpt: "Join us to learn how our programmes prepare students for university.",
        with_image: false,
    },
    Seed {
        id: 233,
        date: "2024-09-02T08:00:00",
        slug: "welcome-back",
        title: "Welcome back to a new academic year",
        excerpt: "Timetables, orientation sessions and everything else new students need.",
        with_image: true,
    },
];

/// Демонстрационный набор постов, новые первыми.
pub fn sample_posts() -> Vec<MockPost> {
    SEEDS
        .iter()
        .map(|seed| {
            let path = format!("{}/{}", &seed.date[..7].replace('-', "/"), seed.slug);
            MockPost {
                id: seed.id,
                date: seed.date.to_string(),
                link: format!("{SITE}/{path}/"),
                title: seed.title.to_string(),
                excerpt: format!("<p>{}</p>\n", seed.excerpt),
                content: format!(
                    "<p>{}</p>\n<p>Read more about our programmes on the website.</p>\n",
                    seed.excerpt
                ),
                featured_media: seed.with_image.then(|| MockMedia {
                    source_url: format!("{SITE}/wp-content/uploads/{}.jpg", seed.slug),
                    alt_text: seed.title.to_string(),
                }),
            }
        })
        .collect()
}
