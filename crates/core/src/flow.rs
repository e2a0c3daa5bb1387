//! The suggestion-chip flow.
//!
//! Chips are grouped into topics. Each topic has a fixed list of options;
//! clicking one of them marks it as clicked, and the next rendering of that
//! list leaves the clicked chip out and offers "More Options" instead.
//! A few labels enter a topic from anywhere, see [`ENTRIES`].
//!
//! Everything here is plain data plus two small functions:
//! [`FlowState::transition`] and [`FlowState::suggestions`].

use std::fmt::{self, Display, Formatter};

use serde::{Serialize, Serializer};

/// The chip that leads back to the home topic without sending a message.
pub const MORE_OPTIONS: &str = "More Options";

const HOME_CHIPS: &[&str] =
    &["About Me", "Skills", "Experience", "Contact", "Resume"];

const ABOUT_ME_CHIPS: &[&str] = &[
    "How did Panth end up being a designer?",
    "Where is Panth from?",
    "What are my hobbies (what I do apart from design)?",
    "Where do I work?",
];

const SKILL_CHIPS: &[&str] = &[
    "Design",
    "Research",
    "How do I use AI in my design workflow",
    "Technical Skills & Tech Stack",
];

const COMPANY_CHIPS: &[&str] =
    &["FounderMatch", "FounderWay", "Northeastern University"];

const DETAIL_CHIPS: &[&str] =
    &["Problem Statement", "Design and Research", "Solutions", "Impact"];

/// Labels that enter a topic no matter which topic is active.
pub const ENTRIES: &[(&str, Topic)] = &[
    ("About Me", Topic::AboutMe),
    ("Skills", Topic::Skills),
    ("Experience", Topic::Experience),
    ("FounderMatch", Topic::CompanyDetails(Company::FounderMatch)),
    ("FounderWay", Topic::CompanyDetails(Company::FounderWay)),
    (
        "Northeastern University",
        Topic::CompanyDetails(Company::Northeastern),
    ),
];

/// A company with its own case-study topic.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Company {
    /// The co-founder matching platform.
    FounderMatch,
    /// The startup behind FounderMatch, and its design system.
    FounderWay,
    /// Northeastern University's Student Hub and accessibility audits.
    Northeastern,
}

impl Company {
    /// The chip label that opens this company's details.
    pub fn label(self) -> &'static str {
        match self {
            Company::FounderMatch => "FounderMatch",
            Company::FounderWay => "FounderWay",
            Company::Northeastern => "Northeastern University",
        }
    }
}

/// The active suggestion context.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Topic {
    /// The top level.
    #[default]
    Home,
    /// Follow-up questions about the designer.
    AboutMe,
    /// Skill areas.
    Skills,
    /// The list of companies.
    Experience,
    /// Case-study sections of one company.
    CompanyDetails(Company),
}

impl Topic {
    /// A stable identifier, independent of chip labels.
    pub fn id(self) -> &'static str {
        match self {
            Topic::Home => "home",
            Topic::AboutMe => "about-me-followup",
            Topic::Skills => "skills-followup",
            Topic::Experience => "experience-companies",
            Topic::CompanyDetails(Company::FounderMatch) => {
                "foundermatch-details"
            }
            Topic::CompanyDetails(Company::FounderWay) => "founderway-details",
            Topic::CompanyDetails(Company::Northeastern) => {
                "northeastern-details"
            }
        }
    }
}

impl Display for Topic {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        self.id().fmt(f)
    }
}

impl Serialize for Topic {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.id())
    }
}

/// Which clicked-chip marker a topic's options feed.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Marker {
    AboutMe,
    Skill,
    CompanyDetail,
}

struct TopicChips {
    options: &'static [&'static str],
    marker: Option<Marker>,
    // Whether "More Options" follows the list before anything is clicked.
    more_when_fresh: bool,
}

fn topic_chips(topic: Topic) -> TopicChips {
    match topic {
        Topic::Home => TopicChips {
            options: HOME_CHIPS,
            marker: None,
            more_when_fresh: false,
        },
        Topic::AboutMe => TopicChips {
            options: ABOUT_ME_CHIPS,
            marker: Some(Marker::AboutMe),
            more_when_fresh: false,
        },
        Topic::Skills => TopicChips {
            options: SKILL_CHIPS,
            marker: Some(Marker::Skill),
            more_when_fresh: true,
        },
        Topic::Experience => TopicChips {
            options: COMPANY_CHIPS,
            marker: None,
            more_when_fresh: true,
        },
        Topic::CompanyDetails(_) => TopicChips {
            options: DETAIL_CHIPS,
            marker: Some(Marker::CompanyDetail),
            more_when_fresh: true,
        },
    }
}

/// The most recently clicked chip of each flow.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize)]
pub struct ClickedChips {
    /// Within the about-me follow-ups.
    pub about_me: Option<&'static str>,
    /// Within the skill areas.
    pub skill: Option<&'static str>,
    /// The company whose details are (or were last) open.
    pub company: Option<&'static str>,
    /// Within the case-study sections.
    pub company_detail: Option<&'static str>,
}

/// The topic plus its clicked-chip markers. This is everything the chip
/// rail depends on.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct FlowState {
    /// The active topic.
    pub topic: Topic,
    /// Clicked-chip markers of every flow.
    pub clicked: ClickedChips,
}

impl FlowState {
    /// Evaluates the flow table against the label of a sent message.
    ///
    /// Returns `None` when the label means nothing to the flow, which is
    /// the case for free text typed by the visitor.
    pub fn transition(&self, label: &str) -> Option<FlowState> {
        if let Some(&(_, topic)) = ENTRIES.iter().find(|(l, _)| *l == label) {
            return Some(self.enter(topic));
        }

        let chips = topic_chips(self.topic);
        let marker = chips.marker?;
        let option = *chips.options.iter().find(|o| **o == label)?;

        let mut next = *self;
        match marker {
            Marker::AboutMe => next.clicked.about_me = Some(option),
            Marker::Skill => next.clicked.skill = Some(option),
            Marker::CompanyDetail => next.clicked.company_detail = Some(option),
        }
        Some(next)
    }

    fn enter(&self, topic: Topic) -> FlowState {
        let mut clicked = self.clicked;
        match topic {
            Topic::Home => clicked = ClickedChips::default(),
            Topic::AboutMe => clicked.about_me = None,
            Topic::Skills => clicked.skill = None,
            Topic::Experience => {
                clicked.company = None;
                clicked.company_detail = None;
            }
            Topic::CompanyDetails(company) => {
                clicked.company = Some(company.label());
                clicked.company_detail = None;
            }
        }
        FlowState { topic, clicked }
    }

    /// The clicked chip within the active topic's option list, if any.
    pub fn marker(&self) -> Option<&'static str> {
        match topic_chips(self.topic).marker? {
            Marker::AboutMe => self.clicked.about_me,
            Marker::Skill => self.clicked.skill,
            Marker::CompanyDetail => self.clicked.company_detail,
        }
    }

    /// The chips to show for this state.
    pub fn suggestions(&self) -> Vec<&'static str> {
        let chips = topic_chips(self.topic);
        match self.marker() {
            Some(clicked) => chips
                .options
                .iter()
                .copied()
                .filter(|o| *o != clicked)
                .chain([MORE_OPTIONS])
                .collect(),
            None if chips.more_when_fresh => {
                chips.options.iter().copied().chain([MORE_OPTIONS]).collect()
            }
            None => chips.options.to_vec(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn after(labels: &[&str]) -> FlowState {
        labels.iter().fold(FlowState::default(), |state, label| {
            state.transition(label).unwrap_or(state)
        })
    }

    #[test]
    fn test_home() {
        let state = FlowState::default();
        assert_eq!(state.topic.id(), "home");
        assert_eq!(state.suggestions(), HOME_CHIPS);
        assert_eq!(state.transition("Contact"), None);
        assert_eq!(state.transition("What's your favorite color?"), None);
    }

    #[test]
    fn test_skills_flow() {
        let state = after(&["Skills"]);
        assert_eq!(state.topic, Topic::Skills);
        assert_eq!(
            state.suggestions(),
            vec![
                "Design",
                "Research",
                "How do I use AI in my design workflow",
                "Technical Skills & Tech Stack",
                "More Options",
            ]
        );

        let state = after(&["Skills", "Design"]);
        assert_eq!(state.clicked.skill, Some("Design"));
        assert_eq!(
            state.suggestions(),
            vec![
                "Research",
                "How do I use AI in my design workflow",
                "Technical Skills & Tech Stack",
                "More Options",
            ]
        );

        // Re-entering the topic forgets the clicked chip.
        let state = after(&["Skills", "Design", "Skills"]);
        assert_eq!(state.clicked.skill, None);
        assert_eq!(state.suggestions().len(), 5);
    }

    #[test]
    fn test_about_me_has_no_more_options_until_clicked() {
        let state = after(&["About Me"]);
        assert_eq!(state.topic.id(), "about-me-followup");
        assert_eq!(state.suggestions(), ABOUT_ME_CHIPS);

        let state = after(&["About Me", "Where is Panth from?"]);
        assert_eq!(
            state.suggestions(),
            vec![
                "How did Panth end up being a designer?",
                "What are my hobbies (what I do apart from design)?",
                "Where do I work?",
                "More Options",
            ]
        );
    }

    #[test]
    fn test_experience_flow() {
        let state = after(&["Experience"]);
        assert_eq!(
            state.suggestions(),
            vec![
                "FounderMatch",
                "FounderWay",
                "Northeastern University",
                "More Options"
            ]
        );

        let state = after(&["Experience", "FounderWay", "Impact"]);
        assert_eq!(state.topic.id(), "founderway-details");
        assert_eq!(state.clicked.company, Some("FounderWay"));
        assert_eq!(state.clicked.company_detail, Some("Impact"));
        assert_eq!(
            state.suggestions(),
            vec![
                "Problem Statement",
                "Design and Research",
                "Solutions",
                "More Options"
            ]
        );

        // Switching companies starts the detail list over.
        let state = after(&["FounderWay", "Impact", "Northeastern University"]);
        assert_eq!(state.topic.id(), "northeastern-details");
        assert_eq!(state.clicked.company_detail, None);
        assert_eq!(state.suggestions().len(), 5);
    }

    #[test]
    fn test_options_only_match_the_active_topic() {
        // A skill chip typed while on the about-me topic changes nothing.
        let state = after(&["About Me"]);
        assert_eq!(state.transition("Design"), None);

        // Detail chips outside a company topic change nothing either.
        assert_eq!(FlowState::default().transition("Impact"), None);
        let state = after(&["Experience"]);
        assert_eq!(state.transition("Impact"), None);
    }

    #[test]
    fn test_entries_work_from_any_topic() {
        let state = after(&["Skills", "Research", "FounderMatch"]);
        assert_eq!(state.topic, Topic::CompanyDetails(Company::FounderMatch));
        // The skill marker is not shown anymore, but it is kept until the
        // skills topic is entered again.
        assert_eq!(state.clicked.skill, Some("Research"));
        assert_eq!(state.marker(), None);
    }

    #[test]
    fn test_topic_ids_are_unique() {
        let mut ids: Vec<_> = [Topic::Home]
            .into_iter()
            .chain(ENTRIES.iter().map(|(_, topic)| *topic))
            .map(Topic::id)
            .collect();
        ids.sort_unstable();
        ids.dedup();
        assert_eq!(ids.len(), 7);
    }

    #[test]
    fn test_at_most_six_chips() {
        for &(label, _) in ENTRIES {
            assert!(after(&[label]).suggestions().len() <= 6);
        }
    }
}
