#![forbid(unsafe_code)]

//! Hard-coded content for the demo pages.

/// A creator row on the landing leaderboard and the dashboard feed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Influencer {
    pub username: &'static str,
    pub display_name: &'static str,
    pub zips: u32,
    pub trend: i8,
    pub posted: &'static str,
}

pub const INFLUENCERS: &[Influencer] = &[
    Influencer { username: "@VitalikButerin", display_name: "vitalik.eth", zips: 4235, trend: 23, posted: "2h" },
    Influencer { username: "@cz_binance", display_name: "CZ BNB", zips: 3891, trend: 18, posted: "4h" },
    Influencer { username: "@elonmusk", display_name: "Elon Musk", zips: 3156, trend: 31, posted: "1h" },
    Influencer { username: "@saylor", display_name: "Michael Saylor", zips: 2847, trend: 15, posted: "3h" },
    Influencer { username: "@brian_armstrong", display_name: "Brian Armstrong", zips: 2634, trend: 12, posted: "5h" },
    Influencer { username: "@blknoiz06", display_name: "Ansem", zips: 2401, trend: 27, posted: "30m" },
    Influencer { username: "@notthreadguy", display_name: "threadguy", zips: 2188, trend: -4, posted: "6h" },
    Influencer { username: "@cryptunez", display_name: "cryptunez", zips: 1975, trend: 9, posted: "8h" },
    Influencer { username: "@zachxbt", display_name: "ZachXBT", zips: 1843, trend: 21, posted: "2h" },
    Influencer { username: "@AlexOnchain", display_name: "Alex Onchain", zips: 1602, trend: -7, posted: "12h" },
];

/// One of the signed-in user's posts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Post {
    pub text: &'static str,
    pub zips: u32,
    pub posted: &'static str,
}

pub const TOP_ZIPS: &[Post] = &[
    Post {
        text: "The convergence of AI and Web3 is creating unprecedented opportunities for creators to monetize their content in ways we never imagined before.",
        zips: 1847,
        posted: "2h ago",
    },
    Post {
        text: "Building sustainable crypto communities isn't just about technology. It's about fostering genuine connections and shared value creation.",
        zips: 1234,
        posted: "6h ago",
    },
    Post {
        text: "The future of decentralized finance lies in making complex protocols accessible to everyday users through intuitive interfaces.",
        zips: 987,
        posted: "1d ago",
    },
];

pub const LATEST_POSTS: &[Post] = &[
    Post {
        text: "Just discovered a fascinating pattern in on-chain data that could predict the next wave of DeFi innovation...",
        zips: 234,
        posted: "3h ago",
    },
    Post {
        text: "The beauty of permissionless protocols is that innovation happens at the edges, where traditional finance fears to tread.",
        zips: 156,
        posted: "8h ago",
    },
    Post {
        text: "Crypto Twitter's energy today is unmatched. The builders are building and the vibes are immaculate.",
        zips: 89,
        posted: "12h ago",
    },
    Post {
        text: "Sometimes the best investment strategy is simply paying attention to what the smartest people in the space are actually building.",
        zips: 67,
        posted: "1d ago",
    },
    Post {
        text: "Web3 social platforms are finally reaching the tipping point where user experience matches user expectations.",
        zips: 45,
        posted: "2d ago",
    },
];

pub const USER_NAME: &str = "scene";
pub const USER_HANDLE: &str = "@scene999";
pub const TOTAL_EARNINGS: u32 = 6942;

/// `4235` → `"4,235"`.
pub fn thousands(n: u32) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

/// `23` → `"+23%"`, `-4` → `"-4%"`.
pub fn trend_label(trend: i8) -> String {
    if trend >= 0 {
        format!("+{trend}%")
    } else {
        format!("{trend}%")
    }
}
