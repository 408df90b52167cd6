//! Result renderer: a pure view of an `AnalysisReport`.

use std::fmt;

use crate::models::analysis::AnalysisReport;

pub const EXCELLENT_THRESHOLD: i32 = 80;
pub const GOOD_THRESHOLD: i32 = 60;
/// Job recommendations at or above this match score are flagged as a match.
pub const STRONG_MATCH_THRESHOLD: u8 = 80;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScoreBand {
    Excellent,
    Good,
    NeedsImprovement,
}

/// Severity tier used for score badges.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BadgeVariant {
    Default,
    Secondary,
    Destructive,
}

impl ScoreBand {
    /// Inclusive lower bounds: 80 is excellent, 60 is good.
    pub fn from_score(score: i32) -> Self {
        if score >= EXCELLENT_THRESHOLD {
            ScoreBand::Excellent
        } else if score >= GOOD_THRESHOLD {
            ScoreBand::Good
        } else {
            ScoreBand::NeedsImprovement
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            ScoreBand::Excellent => "excellent",
            ScoreBand::Good => "good",
            ScoreBand::NeedsImprovement => "needs improvement",
        }
    }

    pub fn message(self) -> &'static str {
        match self {
            ScoreBand::Excellent => "Excellent! Your resume is in great shape.",
            ScoreBand::Good => "Good job! Some improvements can make it better.",
            ScoreBand::NeedsImprovement => {
                "There's room for improvement. Follow the suggestions below."
            }
        }
    }

    pub fn badge(self) -> BadgeVariant {
        match self {
            ScoreBand::Excellent => BadgeVariant::Default,
            ScoreBand::Good => BadgeVariant::Secondary,
            ScoreBand::NeedsImprovement => BadgeVariant::Destructive,
        }
    }
}

impl BadgeVariant {
    pub fn as_str(self) -> &'static str {
        match self {
            BadgeVariant::Default => "default",
            BadgeVariant::Secondary => "secondary",
            BadgeVariant::Destructive => "destructive",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JobCard<'a> {
    pub title: &'a str,
    pub match_score: u8,
    pub is_match: bool,
    pub required_skills: &'a [String],
}

/// Everything the result screen shows, borrowed from the report it was built from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedAnalysis<'a> {
    pub score: u8,
    pub band: ScoreBand,
    pub strengths: &'a [String],
    pub improvements: &'a [String],
    pub skill_gaps: &'a [String],
    pub jobs: Vec<JobCard<'a>>,
}

pub fn render(report: &AnalysisReport) -> RenderedAnalysis<'_> {
    RenderedAnalysis {
        score: report.overall_score,
        band: ScoreBand::from_score(i32::from(report.overall_score)),
        strengths: &report.strengths,
        improvements: &report.improvements,
        skill_gaps: &report.skill_gaps,
        jobs: report
            .job_recommendations
            .iter()
            .map(|job| JobCard {
                title: &job.title,
                match_score: job.match_score,
                is_match: job.match_score >= STRONG_MATCH_THRESHOLD,
                required_skills: &job.required_skills,
            })
            .collect(),
    }
}

impl fmt::Display for RenderedAnalysis<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Overall Score: {}/100 ({})", self.score, self.band.label())?;
        writeln!(f, "{}", self.band.message())?;

        writeln!(f, "\nStrengths")?;
        for strength in self.strengths {
            writeln!(f, "  + {strength}")?;
        }

        writeln!(f, "\nAreas for Improvement")?;
        for improvement in self.improvements {
            writeln!(f, "  ! {improvement}")?;
        }

        writeln!(f, "\nSkills to Learn")?;
        writeln!(
            f,
            "  {}",
            self.skill_gaps
                .iter()
                .map(|s| format!("[{s}]"))
                .collect::<Vec<_>>()
                .join(" ")
        )?;

        writeln!(f, "\nRecommended Roles")?;
        for job in &self.jobs {
            let tag = if job.is_match { " match" } else { "" };
            writeln!(f, "  {} ({}%{tag})", job.title, job.match_score)?;
            writeln!(f, "    {}", job.required_skills.join(", "))?;
        }
        Ok(())
    }
}
