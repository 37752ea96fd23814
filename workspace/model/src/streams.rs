/// A media channel the marketing budget can be spread over.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InvestmentStream {
    /// Key used by the budget predictor
    pub id: &'static str,
    pub name: &'static str,
    pub description: &'static str,
}

pub const INVESTMENT_STREAMS: [InvestmentStream; 8] = [
    InvestmentStream {
        id: "TV",
        name: "TV Advertising",
        description: "Television commercials and sponsorships",
    },
    InvestmentStream {
        id: "Digital",
        name: "Digital Advertising",
        description: "Online display and video ads",
    },
    InvestmentStream {
        id: "Sponsorship",
        name: "Sponsorships",
        description: "Event and content sponsorships",
    },
    InvestmentStream {
        id: "ContentMarketing",
        name: "Content Marketing",
        description: "Blog posts, videos, infographics",
    },
    InvestmentStream {
        id: "OnlineMarketing",
        name: "Online Marketing",
        description: "Social media and email campaigns",
    },
    InvestmentStream {
        id: "Affiliates",
        name: "Affiliate Marketing",
        description: "Commission-based partnerships",
    },
    InvestmentStream {
        id: "SEM",
        name: "Search Engine Marketing",
        description: "Google Ads, Bing Ads",
    },
    InvestmentStream {
        id: "Other",
        name: "Other Channels",
        description: "PR, events, and miscellaneous",
    },
];

pub fn stream(id: &str) -> Option<&'static InvestmentStream> {
    INVESTMENT_STREAMS.iter().find(|s| s.id == id)
}
