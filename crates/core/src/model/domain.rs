//! Closed taxonomy of interview domains and specializations.
//!
//! Question generation only accepts pairs drawn from this catalog; callers
//! surface it as the selection menu.

/// One selectable interview domain with its specializations.
///
/// The icon slug is presentation metadata carried for callers; nothing in
/// the services layer interprets it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Domain {
    pub name: &'static str,
    pub icon: &'static str,
    pub specializations: &'static [&'static str],
}

/// The full caller-facing domain catalog.
pub const INTERVIEW_DOMAINS: [Domain; 4] = [
    Domain {
        name: "Tech & Engineering",
        icon: "fa-microchip",
        specializations: &[
            "Frontend Developer",
            "Backend Developer",
            "Fullstack Developer",
            "DevOps Engineer",
            "Data Scientist",
        ],
    },
    Domain {
        name: "Business & Management",
        icon: "fa-briefcase",
        specializations: &[
            "Product Manager",
            "Project Manager",
            "Business Analyst",
            "Marketing Manager",
            "Sales Director",
        ],
    },
    Domain {
        name: "Creativity & Communication",
        icon: "fa-lightbulb",
        specializations: &[
            "UI/UX Designer",
            "Content Strategist",
            "Public Relations",
            "Technical Writer",
            "Graphic Designer",
        ],
    },
    Domain {
        name: "Specialized Fields",
        icon: "fa-user-doctor",
        specializations: &[
            "Healthcare Professional",
            "Legal Advisor",
            "Educator",
            "Customer Support Rep",
            "Government Official",
        ],
    },
];

impl Domain {
    /// Look up a catalog entry by its exact name.
    #[must_use]
    pub fn find(name: &str) -> Option<&'static Domain> {
        INTERVIEW_DOMAINS.iter().find(|d| d.name == name)
    }

    /// Returns true when the specialization belongs to this domain.
    #[must_use]
    pub fn has_specialization(&self, specialization: &str) -> bool {
        self.specializations.contains(&specialization)
    }
}
