// Keyword classification of navigation links into marketing page categories

use crate::result::DiscoveredLink;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    Customer,
    Partner,
    RoleSolution,
    IndustrySolution,
    UseCase,
    Product,
}

impl Category {
    pub const ALL: [Category; 6] = [
        Category::Customer,
        Category::Partner,
        Category::RoleSolution,
        Category::IndustrySolution,
        Category::UseCase,
        Category::Product,
    ];

    pub fn key(self) -> &'static str {
        match self {
            Category::Customer => "customer_pages",
            Category::Partner => "partner_pages",
            Category::RoleSolution => "solutions_by_role",
            Category::IndustrySolution => "solutions_by_industry",
            Category::UseCase => "use_case_pages",
            Category::Product => "product_pages",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Category::Customer => "Customer pages",
            Category::Partner => "Partner pages",
            Category::RoleSolution => "Solutions by role",
            Category::IndustrySolution => "Solutions by industry",
            Category::UseCase => "Use-case pages",
            Category::Product => "Product pages",
        }
    }

    pub fn keywords(self) -> &'static [&'static str] {
        KEYWORD_TABLE
            .iter()
            .find(|(category, _)| *category == self)
            .map(|(_, keywords)| *keywords)
            .unwrap_or(&[])
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Lowercase trigger phrases per category. Phrases with spaces are also
/// matched against URLs in hyphenated slug form.
pub static KEYWORD_TABLE: [(Category, &[&str]); 6] = [
    (
        Category::Customer,
        &[
            "customer",
            "case stud",
            "success stor",
            "testimonial",
            "client stories",
            "our clients",
            "who we serve",
            "reviews",
        ],
    ),
    (
        Category::Partner,
        &[
            "partner",
            "affiliate",
            "reseller",
            "referral program",
            "alliances",
            "channel program",
            "agency program",
        ],
    ),
    (
        Category::RoleSolution,
        &[
            "by role",
            "for sales",
            "sales teams",
            "sales leaders",
            "for marketing",
            "marketing teams",
            "revops",
            "revenue operations",
            "sales development",
            "account executives",
            "enablement",
            "for founders",
            "for executives",
        ],
    ),
    (
        Category::IndustrySolution,
        &[
            "by industry",
            "industries",
            "healthcare",
            "financial services",
            "fintech",
            "insurance",
            "manufacturing",
            "real estate",
            "retail",
            "ecommerce",
            "education",
            "higher ed",
            "government",
            "nonprofit",
            "hospitality",
            "logistics",
            "telecom",
        ],
    ),
    (
        Category::UseCase,
        &[
            "use case",
            "use-case",
            "usecase",
            "lead generation",
            "prospecting",
            "pipeline generation",
            "outbound",
            "inbound",
            "forecasting",
            "deal management",
            "conversation intelligence",
            "coaching",
            "meeting scheduling",
        ],
    ),
    (
        Category::Product,
        &[
            "product",
            "platform",
            "features",
            "pricing",
            "integrations",
            "how it works",
            "overview",
            "what's new",
        ],
    ),
];

/// Links matching one category, in discovery order with no repeated URLs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Bucket {
    pub category: Category,
    pub links: Vec<DiscoveredLink>,
}

/// All six buckets, always in [`Category::ALL`] order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Classification {
    pub buckets: Vec<Bucket>,
}

impl Classification {
    pub fn empty() -> Self {
        Self {
            buckets: Category::ALL
                .iter()
                .map(|&category| Bucket {
                    category,
                    links: Vec::new(),
                })
                .collect(),
        }
    }

    pub fn bucket(&self, category: Category) -> &[DiscoveredLink] {
        self.buckets
            .iter()
            .find(|b| b.category == category)
            .map(|b| b.links.as_slice())
            .unwrap_or(&[])
    }

    pub fn count(&self, category: Category) -> usize {
        self.bucket(category).len()
    }

    /// Number of bucket entries; a link in two buckets counts twice.
    pub fn total(&self) -> usize {
        self.buckets.iter().map(|b| b.links.len()).sum()
    }

    /// Categories the given URL was placed in.
    pub fn categories_of(&self, url: &str) -> Vec<Category> {
        self.buckets
            .iter()
            .filter(|b| b.links.iter().any(|l| l.url == url))
            .map(|b| b.category)
            .collect()
    }
}

impl Default for Classification {
    fn default() -> Self {
        Self::empty()
    }
}

/// True when the link text contains a keyword, or the URL contains the
/// keyword's hyphenated slug form.
pub fn link_matches(link: &DiscoveredLink, keywords: &[&str]) -> bool {
    let text = link.text.to_lowercase();
    let url = link.url.to_lowercase();

    keywords.iter().any(|keyword| {
        let keyword = keyword.to_lowercase();
        text.contains(&keyword) || url.contains(&keyword.replace(' ', "-"))
    })
}

pub fn matching_categories(link: &DiscoveredLink) -> Vec<Category> {
    KEYWORD_TABLE
        .iter()
        .filter(|(_, keywords)| link_matches(link, keywords))
        .map(|(category, _)| *category)
        .collect()
}

/// Copy each link into every bucket it matches, dropping links that match
/// nothing, then dedupe each bucket by URL.
pub fn classify(links: &[DiscoveredLink]) -> Classification {
    let mut classification = Classification::empty();

    for link in links {
        for bucket in classification.buckets.iter_mut() {
            if link_matches(link, bucket.category.keywords()) {
                bucket.links.push(link.clone());
            }
        }
    }

    for bucket in classification.buckets.iter_mut() {
        bucket.links = dedupe_by_url(&bucket.links);
    }

    classification
}

/// Keep the first link for each URL, preserving order.
pub fn dedupe_by_url(links: &[DiscoveredLink]) -> Vec<DiscoveredLink> {
    let mut seen: HashSet<&str> = HashSet::new();
    links
        .iter()
        .filter(|link| seen.insert(link.url.as_str()))
        .cloned()
        .collect()
}
