#![forbid(unsafe_code)]

//! The ZIP tour storyboard.
//!
//! Dashboard steps come first, then the hand-over step, then the profile
//! steps. [`validate`] checks the ordering.

use std::fmt;

use crate::page::Page;
use crate::step::{Placement, Target, TutorialStep};

fn hand_over_to_profile() {
    tracing::debug!(target: "zip_tour::catalog", "handing tour over to the profile page");
}

static STEPS: [TutorialStep; 13] = [
    TutorialStep::new(
        "welcome",
        Target::WholePage,
        "Welcome to Zip!",
        "Welcome to your Zip dashboard! Here you can track trending tips, discover popular content, and manage your account. Let's take a quick tour of the key features.",
        Placement::Center,
        Page::Dashboard,
    )
    .hide_previous(),
    TutorialStep::new(
        "navigation",
        Target::Selector("nav"),
        "Main Navigation",
        "This is your main navigation bar. You can see the Zip logo, search for content, and access your profile here.",
        Placement::Bottom,
        Page::Dashboard,
    ),
    TutorialStep::new(
        "search",
        Target::Selector(r#"input[placeholder*="Search"]"#),
        "Search Functionality",
        "Use this search bar to find specific accounts or paste tweet links to see their tip activity and engagement metrics.",
        Placement::Bottom,
        Page::Dashboard,
    ),
    TutorialStep::new(
        "profile-section",
        Target::Selector(r#"a[href="/profile"]"#),
        "Your Profile",
        "This shows your connected account info. Click here to view your profile, earnings, and tip history.",
        Placement::Bottom,
        Page::Dashboard,
    ),
    TutorialStep::new(
        "tab-navigation",
        Target::Selector(r#"[data-tutorial="tab-navigation"]"#),
        "Trending Tabs",
        "Switch between different views: Trending shows hot content, Most Zipped Tweets displays popular posts, and Most Zipped Accounts shows top-earning creators.",
        Placement::Bottom,
        Page::Dashboard,
    )
    .fallbacks(&[r#"button[class*="text-[#5fb574]"]"#, "button"]),
    TutorialStep::new(
        "time-filters",
        Target::Selector(r#"[data-tutorial="time-filters"]"#),
        "Time Filters",
        "Filter trending data by different time periods (1h, 4h, 24h, 7d) to see real-time activity or historical trends.",
        Placement::Bottom,
        Page::Dashboard,
    )
    .fallbacks(&[r#"button[class*="bg-[#5fb574]"]"#, r#"div[class*="flex gap-2"]"#]),
    TutorialStep::new(
        "data-table",
        Target::Selector(r#"[data-tutorial="content-feed"]"#),
        "Content Feed",
        "This is your main content feed showing trending accounts and tweets. Click on any item to see detailed tip information and engagement metrics.",
        Placement::Top,
        Page::Dashboard,
    )
    .fallbacks(&[r#"div[class*="space-y-4"]"#]),
    TutorialStep::new(
        "profile-transition",
        Target::WholePage,
        "Let's Visit Your Profile",
        "Now let's explore your profile page where you can track your earnings and manage your content. Click Continue to go to your profile.",
        Placement::Center,
        Page::Dashboard,
    )
    .page_transition()
    .action(hand_over_to_profile),
    TutorialStep::new(
        "profile-overview",
        Target::Selector(r#"[data-tutorial="profile-overview"]"#),
        "Profile Overview",
        "This is your profile section showing your account details, profile picture, and connection status.",
        Placement::Bottom,
        Page::Profile,
    ),
    TutorialStep::new(
        "earnings-display",
        Target::Selector(r#"[data-tutorial="earnings-display"]"#),
        "Your Earnings",
        "Track your total ZIP earnings here. Your tips accumulate from all your content and can be claimed anytime.",
        Placement::Bottom,
        Page::Profile,
    ),
    TutorialStep::new(
        "claim-button",
        Target::Selector(r#"[data-tutorial="claim-button"]"#),
        "Claim Your Tips",
        "Use this button to claim your accumulated tips to your connected wallet. Earnings update in real-time as people tip your content.",
        Placement::Bottom,
        Page::Profile,
    ),
    TutorialStep::new(
        "top-zips",
        Target::Selector(r#"[data-tutorial="top-zips"]"#),
        "Top Performing Content",
        "See which of your tweets received the most tips and engagement. This helps you understand what content resonates with your audience.",
        Placement::Bottom,
        Page::Profile,
    ),
    TutorialStep::new(
        "latest-posts",
        Target::Selector(r#"[data-tutorial="latest-posts"]"#),
        "Recent Activity",
        "Monitor your recent posts and their tip performance to track engagement and optimize your content strategy.",
        Placement::Bottom,
        Page::Profile,
    )
    .hide_previous(),
];

/// The ZIP tour steps in display order.
pub fn tutorial_steps() -> &'static [TutorialStep] {
    &STEPS
}

/// A structural defect in a step list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CatalogError {
    Empty,
    DuplicateId(&'static str),
    /// A step on `page` appears after the tour already moved past it.
    PageOrder { index: usize, page: Page },
}

impl fmt::Display for CatalogError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CatalogError::Empty => write!(f, "tour has no steps"),
            CatalogError::DuplicateId(id) => write!(f, "duplicate step id: {id}"),
            CatalogError::PageOrder { index, page } => {
                write!(f, "step {index} returns to the {page} page")
            }
        }
    }
}

impl std::error::Error for CatalogError {}

/// Check that ids are unique and every page's steps are contiguous.
pub fn validate(steps: &[TutorialStep]) -> Result<(), CatalogError> {
    if steps.is_empty() {
        return Err(CatalogError::Empty);
    }
    let mut finished: Vec<Page> = Vec::new();
    for (index, step) in steps.iter().enumerate() {
        if steps[..index].iter().any(|s| s.id == step.id) {
            return Err(CatalogError::DuplicateId(step.id));
        }
        if index > 0 && steps[index - 1].page != step.page {
            finished.push(steps[index - 1].page);
        }
        if finished.contains(&step.page) {
            return Err(CatalogError::PageOrder {
                index,
                page: step.page,
            });
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn catalog_is_valid() {
        assert_eq!(validate(tutorial_steps()), Ok(()));
    }

    #[test]
    fn thirteen_steps_with_transition_at_seven() {
        let steps = tutorial_steps();
        assert_eq!(steps.len(), 13);
        assert_eq!(steps[7].id, "profile-transition");
        assert!(steps[7].page_transition);
        assert_eq!(steps[7].page, Page::Dashboard);
        assert_eq!(steps[8].page, Page::Profile);
        assert_eq!(steps.iter().filter(|s| s.page_transition).count(), 1);
    }

    #[test]
    fn dashboard_steps_precede_profile_steps() {
        let steps = tutorial_steps();
        let first_profile = steps.iter().position(|s| s.page == Page::Profile);
        assert_eq!(first_profile, Some(8));
        assert!(steps[8..].iter().all(|s| s.page == Page::Profile));
    }

    #[test]
    fn first_and_last_steps_hide_previous() {
        let steps = tutorial_steps();
        assert!(!steps[0].show_previous);
        assert!(!steps[12].show_previous);
        assert!(steps.iter().all(|s| s.show_skip));
    }

    #[test]
    fn centered_steps_target_whole_page() {
        for step in tutorial_steps() {
            if step.target == Target::WholePage {
                assert!(step.position.is_center(), "{} should be centered", step.id);
            }
        }
    }

    #[test]
    fn validate_rejects_return_to_earlier_page() {
        let mut steps = tutorial_steps().to_vec();
        steps.push(steps[0]);
        if let Some(last) = steps.last_mut() {
            last.id = "back-home";
        }
        assert_eq!(
            validate(&steps),
            Err(CatalogError::PageOrder {
                index: 13,
                page: Page::Dashboard
            })
        );
    }

    #[test]
    fn validate_rejects_duplicates_and_empty() {
        let mut steps = tutorial_steps().to_vec();
        steps[1].id = "welcome";
        assert_eq!(validate(&steps), Err(CatalogError::DuplicateId("welcome")));
        assert_eq!(validate(&[]), Err(CatalogError::Empty));
    }
}
